//! Admin-editable pricing, promotion and broker configuration
//!
//! Every document has a documented default that is used when nothing has been
//! stored yet. Stored documents keep the field names of the admin JSON files.

mod store;

pub use store::{ConfigSource, JsonConfigStore, StaticConfig};

use crate::assumptions::MinimumPriceTable;
use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format of `PromotionConfig::expires`
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tunable parameters of the premium formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Corrected headcount above which exposure grows at `slope`
    pub pivot_headcount: u32,

    /// Fraction of each employee above the pivot that counts toward exposure
    pub slope: f64,

    /// Minimum standard TTC price per guarantee amount
    #[serde(rename = "min_ttc_standard")]
    pub minimum_standard: MinimumPriceTable,

    /// Explicit minimum premium TTC price per guarantee amount.
    /// When absent the premium floor is derived from the standard floor.
    #[serde(rename = "min_ttc_premium", default)]
    pub minimum_premium: Option<MinimumPriceTable>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            pivot_headcount: 70,
            slope: 0.5,
            minimum_standard: MinimumPriceTable::standard_defaults(),
            minimum_premium: None,
        }
    }
}

impl PricingConfig {
    /// Reject values an administrator must not be able to store
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pivot_headcount == 0 {
            return Err(ConfigError::Invalid("pivot_headcount must be at least 1".into()));
        }
        if !self.slope.is_finite() || self.slope < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slope must be a non-negative number, got {}",
                self.slope
            )));
        }
        let premium_floors = self.minimum_premium.iter().flat_map(|t| t.iter());
        for (amount, floor) in self.minimum_standard.iter().chain(premium_floors) {
            if !floor.is_finite() || *floor < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "floor for guarantee {} must be a non-negative number, got {}",
                    amount, floor
                )));
            }
        }
        Ok(())
    }
}

/// Active promotion on the premium tier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub active: bool,

    /// Discount on the premium price, 0-100
    pub discount_percent: f64,

    /// Informational expiry date (`YYYY-MM-DD`), may be empty
    #[serde(default)]
    pub expires: String,

    #[serde(default)]
    pub label: String,
}

impl PromotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(ConfigError::Invalid(format!(
                "discount_percent must be between 0 and 100, got {}",
                self.discount_percent
            )));
        }
        Ok(())
    }

    /// Parsed expiry date; empty or unparseable means no expiry
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.expires.trim(), EXPIRY_DATE_FORMAT).ok()
    }

    /// Whether the promotion has passed its expiry date on `today`
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date().is_some_and(|expiry| expiry < today)
    }

    /// The promotion as it applies on `today`: an expired promotion is inactive.
    ///
    /// The pricing engine trusts `active` as given, so callers resolve expiry here.
    pub fn effective_on(&self, today: NaiveDate) -> PromotionConfig {
        let mut effective = self.clone();
        if effective.active && self.is_expired_on(today) {
            log::info!(
                "Promotion {:?} expired on {}, treating as inactive",
                self.label, self.expires
            );
            effective.active = false;
        }
        effective
    }
}

/// Referring broker and their commission rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broker {
    pub code: String,
    pub name: String,
    /// Commission as a percentage of the contract price
    pub rate: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrokersConfig {
    #[serde(default)]
    pub brokers: Vec<Broker>,
}

impl BrokersConfig {
    pub fn find(&self, code: &str) -> Option<&Broker> {
        let code = code.trim();
        self.brokers.iter().find(|b| b.code.eq_ignore_ascii_case(code))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for broker in &self.brokers {
            if broker.code.trim().is_empty() {
                return Err(ConfigError::Invalid("broker code must not be empty".into()));
            }
            if !(0.0..=100.0).contains(&broker.rate) {
                return Err(ConfigError::Invalid(format!(
                    "commission rate for broker {} must be between 0 and 100, got {}",
                    broker.code, broker.rate
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, EXPIRY_DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_default_pricing_config() {
        let config = PricingConfig::default();

        assert_eq!(config.pivot_headcount, 70);
        assert_eq!(config.slope, 0.5);
        assert_eq!(config.minimum_standard.floor_for(75_000.0), Some(800.0));
        assert!(config.minimum_premium.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pricing_config_json_shape() {
        let json = r#"{
            "pivot_headcount": 60,
            "slope": 0.25,
            "min_ttc_standard": {"5000": 310},
            "min_ttc_premium": null
        }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.pivot_headcount, 60);
        assert_eq!(config.slope, 0.25);
        assert_eq!(config.minimum_standard.floor_for(5_000.0), Some(310.0));
        assert!(config.minimum_premium.is_none());
    }

    #[test]
    fn test_invalid_pricing_config() {
        let mut config = PricingConfig::default();
        config.slope = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = PricingConfig::default();
        config.pivot_headcount = 0;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.minimum_premium = Some([(5_000, -1.0)].into_iter().collect());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_promotion_expiry() {
        let promo = PromotionConfig {
            active: true,
            discount_percent: 15.0,
            expires: "2025-12-31".into(),
            label: "Offre Spéciale".into(),
        };

        assert!(promo.effective_on(date("2025-12-31")).active);
        assert!(!promo.effective_on(date("2026-01-01")).active);
        assert_eq!(promo.effective_on(date("2026-01-01")).label, "Offre Spéciale");
    }

    #[test]
    fn test_promotion_without_expiry_never_expires() {
        let promo = PromotionConfig {
            active: true,
            discount_percent: 10.0,
            expires: String::new(),
            label: String::new(),
        };
        assert!(promo.effective_on(date("2099-01-01")).active);

        let promo = PromotionConfig { expires: "soon".into(), ..promo };
        assert!(promo.effective_on(date("2099-01-01")).active);
    }

    #[test]
    fn test_promotion_discount_bounds() {
        let promo = PromotionConfig { discount_percent: 120.0, ..Default::default() };
        assert!(promo.validate().is_err());
    }

    #[test]
    fn test_broker_lookup() {
        let brokers = BrokersConfig {
            brokers: vec![Broker {
                code: "BRK01".into(),
                name: "Cabinet Martin".into(),
                rate: 12.5,
                active: true,
            }],
        };

        assert_eq!(brokers.find(" brk01 ").map(|b| b.rate), Some(12.5));
        assert!(brokers.find("BRK02").is_none());
        assert!(brokers.validate().is_ok());
    }
}
