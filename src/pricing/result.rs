//! Pricing output structures
//!
//! Field names on the wire follow the quoting wizard's payloads
//! (`standard_ttc`, `premium_ttc`, `ht`, `taxes`, ...).

use super::trace::TraceStep;
use serde::{Deserialize, Serialize};

/// Intermediate values of the standard formula, rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    #[serde(rename = "effectif_corrige")]
    pub corrected_headcount: u32,
    #[serde(rename = "effectif_scaled")]
    pub scaled_headcount: f64,
    #[serde(rename = "taux_ctn")]
    pub claim_probability: f64,
    #[serde(rename = "prime_brute_ht")]
    pub gross_premium_ht: f64,
    #[serde(rename = "prime_brute_ttc")]
    pub gross_premium_ttc: f64,
    #[serde(rename = "plancher_applique")]
    pub standard_floor: f64,
    #[serde(rename = "antecedents_multiplier")]
    pub antecedent_multiplier: f64,
}

/// Standard and premium prices for one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    #[serde(rename = "standard_ttc")]
    pub standard_total: f64,

    #[serde(rename = "premium_ttc")]
    pub premium_total: f64,

    /// Net-of-tax part of the standard total
    #[serde(rename = "ht")]
    pub net_amount: f64,

    /// Tax part of the standard total
    #[serde(rename = "taxes")]
    pub tax_amount: f64,

    #[serde(rename = "promo_active")]
    pub promotion_applied: bool,

    #[serde(rename = "promo_label", default, skip_serializing_if = "Option::is_none")]
    pub promotion_label: Option<String>,

    #[serde(rename = "promo_expires", default, skip_serializing_if = "Option::is_none")]
    pub promotion_expires: Option<String>,

    #[serde(rename = "calculation_details", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CalculationDetails>,
}

/// Configuration values in effect for a traced computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersUsed {
    pub pivot_headcount: u32,
    pub slope: f64,
    #[serde(rename = "taux_ctn")]
    pub claim_probability: f64,
    pub taxes_percent: f64,
    #[serde(rename = "plancher_standard")]
    pub standard_floor: f64,
    #[serde(rename = "plancher_premium")]
    pub premium_floor: f64,
    /// Whether the premium floor came from the configured table
    pub premium_floor_configured: bool,
    pub promotion_active: bool,
    pub discount_percent: f64,
}

/// Final prices echoed at the end of a debug report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalPrices {
    #[serde(rename = "standard_ttc")]
    pub standard_total: f64,
    #[serde(rename = "premium_ttc")]
    pub premium_total: f64,
    #[serde(rename = "ht")]
    pub net_amount: f64,
    #[serde(rename = "taxes")]
    pub tax_amount: f64,
}

impl From<&PricingResult> for FinalPrices {
    fn from(result: &PricingResult) -> Self {
        Self {
            standard_total: result.standard_total,
            premium_total: result.premium_total,
            net_amount: result.net_amount,
            tax_amount: result.tax_amount,
        }
    }
}

/// Output of the debug/trace variant of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugReport {
    #[serde(rename = "etapes")]
    pub trace: Vec<TraceStep>,

    #[serde(rename = "parametres_utilises")]
    pub parameters_used: ParametersUsed,

    #[serde(rename = "tarifs_finaux")]
    pub final_prices: FinalPrices,

    /// Set by the caller when the computation ran on fallback configuration
    #[serde(default)]
    pub fallback: bool,
}
