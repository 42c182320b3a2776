//! Sector (CTN) codes and their claim rates
//!
//! Rates are expressed per thousand employees. Sector `B` exists in the national
//! classification but is not offered; it is rejected during request validation
//! and is deliberately absent from this enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of quotable sector codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorCode {
    A,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl SectorCode {
    pub const ALL: [SectorCode; 8] = [
        SectorCode::A,
        SectorCode::C,
        SectorCode::D,
        SectorCode::E,
        SectorCode::F,
        SectorCode::G,
        SectorCode::H,
        SectorCode::I,
    ];

    /// Claim rate per thousand employees
    pub fn claim_rate_per_mille(self) -> f64 {
        match self {
            SectorCode::A => 0.29,
            SectorCode::C => 0.49,
            SectorCode::D => 0.39,
            SectorCode::E => 0.35,
            SectorCode::F => 0.40,
            SectorCode::G => 0.11,
            SectorCode::H => 0.11,
            SectorCode::I => 0.40,
        }
    }

    /// Claim probability per employee
    pub fn claim_probability(self) -> f64 {
        self.claim_rate_per_mille() / 1000.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectorCode::A => "A",
            SectorCode::C => "C",
            SectorCode::D => "D",
            SectorCode::E => "E",
            SectorCode::F => "F",
            SectorCode::G => "G",
            SectorCode::H => "H",
            SectorCode::I => "I",
        }
    }
}

impl fmt::Display for SectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(SectorCode::A),
            "C" => Ok(SectorCode::C),
            "D" => Ok(SectorCode::D),
            "E" => Ok(SectorCode::E),
            "F" => Ok(SectorCode::F),
            "G" => Ok(SectorCode::G),
            "H" => Ok(SectorCode::H),
            "I" => Ok(SectorCode::I),
            other => Err(format!("Unknown sector code: {}", other)),
        }
    }
}

/// Claim rate per mille for a raw sector code; unknown codes rate at zero
pub fn claim_rate_per_mille(code: &str) -> f64 {
    code.parse::<SectorCode>()
        .map(SectorCode::claim_rate_per_mille)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_rates() {
        assert_eq!(SectorCode::A.claim_rate_per_mille(), 0.29);
        assert_eq!(SectorCode::C.claim_rate_per_mille(), 0.49);
        assert_eq!(SectorCode::G.claim_rate_per_mille(), 0.11);
        assert_eq!(SectorCode::I.claim_rate_per_mille(), 0.40);
    }

    #[test]
    fn test_unknown_codes_rate_zero() {
        assert_eq!(claim_rate_per_mille("B"), 0.0);
        assert_eq!(claim_rate_per_mille("Z"), 0.0);
        assert_eq!(claim_rate_per_mille(""), 0.0);
        assert_eq!(claim_rate_per_mille("c"), 0.0);
    }

    #[test]
    fn test_round_trip_codes() {
        for code in SectorCode::ALL {
            assert_eq!(code.as_str().parse::<SectorCode>(), Ok(code));
        }
    }
}
