//! Fixed pricing assumptions: sector claim rates, guarantee tiers, minimum prices
//! and the constants of the premium formula

mod sector;
mod guarantee;

pub use sector::{claim_rate_per_mille, SectorCode};
pub use guarantee::{GuaranteeTier, MinimumPriceTable};

/// Inflation applied to the declared headcount to compensate reporting undercounts
pub const HEADCOUNT_INFLATION: f64 = 1.10;

/// Added after inflation so a zero headcount never yields zero exposure
pub const HEADCOUNT_OFFSET: f64 = 1.0;

/// Insurance tax rate applied to every net-of-tax premium (9%)
pub const TAX_RATE: f64 = 0.09;

/// Net-of-tax to tax-inclusive multiplier
pub const TAX_MULTIPLIER: f64 = 1.09;

/// Multiplier applied to the gross premium when any prior claim is declared
pub const ANTECEDENT_MULTIPLIER: f64 = 2.0;

/// Extra coverage carried by the premium tier (+20% on the guarantee)
pub const PREMIUM_COVERAGE_FACTOR: f64 = 1.20;

/// Derived premium floor relative to the standard floor
pub const PREMIUM_FLOOR_FACTOR: f64 = 1.2;

/// Service surcharge on the premium tier, applied after the floor
pub const PREMIUM_SURCHARGE: f64 = 1.10;

/// Standard floor used when the guarantee is absent from the minimum-price table
pub const MISSING_TIER_FLOOR: f64 = 300.0;

/// Premium guard: a non-positive premium is replaced by the standard total times this factor
pub const PREMIUM_GUARD_FACTOR: f64 = 1.2;

/// Standard total returned when pricing configuration cannot be obtained at all
pub const FALLBACK_STANDARD_TOTAL: f64 = 500.0;

/// Premium total returned when pricing configuration cannot be obtained at all
pub const FALLBACK_PREMIUM_TOTAL: f64 = 650.0;

/// Tax rate expressed as a percentage, as echoed in debug reports
pub fn tax_percent() -> f64 {
    TAX_RATE * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tax_percent() {
        assert_abs_diff_eq!(tax_percent(), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(TAX_MULTIPLIER, 1.0 + TAX_RATE, epsilon = 1e-12);
    }

    #[test]
    fn test_premium_chain_factors() {
        // Floor and surcharge compound to +32% over the standard floor
        assert_abs_diff_eq!(PREMIUM_FLOOR_FACTOR * PREMIUM_SURCHARGE, 1.32, epsilon = 1e-12);
    }
}
