//! Pricing input data structures

use serde::{Deserialize, Serialize};

/// Declared claims over the reference period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimsHistory {
    /// Partial incapacity, second class
    #[serde(rename = "ip2", alias = "class2", default)]
    pub class2: u32,

    /// Partial incapacity, third class
    #[serde(rename = "ip3", alias = "class3", default)]
    pub class3: u32,

    /// Fourth class
    #[serde(rename = "ip4", alias = "class4", default)]
    pub class4: u32,

    /// Fatalities
    #[serde(rename = "deces", alias = "fatality", default)]
    pub fatality: u32,
}

impl ClaimsHistory {
    pub fn none() -> Self {
        Self::default()
    }

    /// Any counter above zero flags the company as having antecedents
    pub fn has_antecedents(&self) -> bool {
        self.class2 > 0 || self.class3 > 0 || self.class4 > 0 || self.fatality > 0
    }
}

/// Input of a single pricing computation
///
/// Range constraints (headcount, sector eligibility, guarantee tiers) are
/// enforced by request validation before an input is built; the engine
/// prices any value it is handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Aggregate employee count across establishments
    pub headcount: u32,

    /// Sector (CTN) code; unknown codes price at a zero claim rate
    pub sector: String,

    pub claims: ClaimsHistory,

    /// Chosen guarantee amount in euros
    pub guarantee_amount: f64,
}

impl PricingInput {
    pub fn new(headcount: u32, sector: &str, claims: ClaimsHistory, guarantee_amount: f64) -> Self {
        Self {
            headcount,
            sector: sector.to_string(),
            claims,
            guarantee_amount,
        }
    }
}

/// Quote payload as submitted by the quoting wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "effectif_global")]
    pub headcount: u32,

    #[serde(rename = "ctn")]
    pub sector: String,

    #[serde(rename = "antecedents", default)]
    pub claims: ClaimsHistory,

    #[serde(rename = "choix_garantie")]
    pub guarantee_amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_code: Option<String>,
}

impl From<&QuoteRequest> for PricingInput {
    /// Build an input without range validation (admin inspection tool)
    fn from(request: &QuoteRequest) -> Self {
        Self {
            headcount: request.headcount,
            sector: request.sector.trim().to_string(),
            claims: request.claims,
            guarantee_amount: request.guarantee_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_antecedents() {
        assert!(!ClaimsHistory::none().has_antecedents());

        let claims = ClaimsHistory { fatality: 1, ..Default::default() };
        assert!(claims.has_antecedents());
    }

    #[test]
    fn test_request_wire_shape() {
        let json = r#"{
            "effectif_global": 50,
            "ctn": "C",
            "antecedents": {"ip2": 1, "ip3": 0, "ip4": 0, "deces": 0},
            "choix_garantie": 50000
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.headcount, 50);
        assert_eq!(request.sector, "C");
        assert_eq!(request.claims.class2, 1);
        assert_eq!(request.guarantee_amount, 50_000.0);
        assert!(request.broker_code.is_none());
    }

    #[test]
    fn test_claims_accept_english_aliases() {
        let claims: ClaimsHistory =
            serde_json::from_str(r#"{"class2": 0, "class3": 2, "fatality": 1}"#).unwrap();

        assert_eq!(claims.class3, 2);
        assert_eq!(claims.class4, 0);
        assert_eq!(claims.fatality, 1);
    }
}
