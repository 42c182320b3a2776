//! Step-by-step calculation trace shown on the admin inspection screen
//!
//! The trace is display-only: values recorded here are rounded for reading
//! and are never fed back into the computation. Labels are in French, like
//! the rest of the admin payload.

use serde::{Deserialize, Serialize};

/// One named step of the premium formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    #[serde(rename = "etape")]
    pub step: String,
    pub description: String,
    #[serde(rename = "calcul")]
    pub formula: String,
    #[serde(rename = "resultat")]
    pub result: f64,
}

/// Ordered list of calculation steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step; steps are numbered in recording order
    pub fn record(&mut self, label: &str, description: &str, formula: String, result: f64) {
        let number = self.steps.len() + 1;
        self.steps.push(TraceStep {
            step: format!("{}. {}", number, label),
            description: description.to_string(),
            formula,
            result,
        });
    }

    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_numbered() {
        let mut trace = Trace::new();
        trace.record("Correction de l'effectif", "desc", "floor(50 × 1.1 + 1)".into(), 56.0);
        trace.record("Coefficient antécédents", "desc", "×1".into(), 1.0);

        let steps = trace.into_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step, "1. Correction de l'effectif");
        assert_eq!(steps[1].step, "2. Coefficient antécédents");
        assert_eq!(steps[0].result, 56.0);
    }

    #[test]
    fn test_step_wire_keys() {
        let step = TraceStep {
            step: "1. Correction de l'effectif".into(),
            description: "d".into(),
            formula: "f".into(),
            result: 1.5,
        };
        let value = serde_json::to_value(&step).unwrap();

        assert_eq!(value["etape"], "1. Correction de l'effectif");
        assert_eq!(value["calcul"], "f");
        assert_eq!(value["resultat"], 1.5);
    }
}
