//! Configuration sources
//!
//! `ConfigSource` is the capability the quote service is handed to resolve
//! configuration. `JsonConfigStore` keeps one JSON document per concern in a
//! directory; `StaticConfig` serves already-resolved values.

use super::{BrokersConfig, PricingConfig, PromotionConfig};
use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const PRICING_FILE: &str = "pricing.json";
pub const PROMOTION_FILE: &str = "promo.json";
pub const BROKERS_FILE: &str = "brokers.json";

/// Resolves the configuration in effect for a quote
pub trait ConfigSource: Send + Sync {
    fn pricing(&self) -> Result<PricingConfig, ConfigError>;

    fn promotion(&self) -> Result<PromotionConfig, ConfigError>;

    fn brokers(&self) -> Result<BrokersConfig, ConfigError>;
}

/// Directory of JSON configuration documents
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    dir: PathBuf,
}

impl JsonConfigStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a document, falling back to `default` when it has never been stored
    fn load<T: DeserializeOwned>(&self, file: &str, default: T) -> Result<T, ConfigError> {
        let path = self.dir.join(file);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No stored {}, using defaults", path.display());
                return Ok(default);
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<(), ConfigError> {
        let path = self.dir.join(file);
        let data = serde_json::to_string_pretty(value)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, data))
            .map_err(|source| {
                log::error!("Failed to write config {}: {}", path.display(), source);
                ConfigError::Io { path, source }
            })
    }

    pub fn update_pricing(&self, config: &PricingConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.save(PRICING_FILE, config)
    }

    pub fn update_promotion(&self, config: &PromotionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.save(PROMOTION_FILE, config)
    }

    pub fn update_brokers(&self, config: &BrokersConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.save(BROKERS_FILE, config)
    }
}

// Stored documents may have been edited by hand, so they are validated on read too
impl ConfigSource for JsonConfigStore {
    fn pricing(&self) -> Result<PricingConfig, ConfigError> {
        let config: PricingConfig = self.load(PRICING_FILE, PricingConfig::default())?;
        config.validate()?;
        Ok(config)
    }

    fn promotion(&self) -> Result<PromotionConfig, ConfigError> {
        let config: PromotionConfig = self.load(PROMOTION_FILE, PromotionConfig::default())?;
        config.validate()?;
        Ok(config)
    }

    fn brokers(&self) -> Result<BrokersConfig, ConfigError> {
        let config: BrokersConfig = self.load(BROKERS_FILE, BrokersConfig::default())?;
        config.validate()?;
        Ok(config)
    }
}

/// In-memory configuration
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    pub pricing: PricingConfig,
    pub promotion: PromotionConfig,
    pub brokers: BrokersConfig,
}

impl StaticConfig {
    pub fn new(pricing: PricingConfig, promotion: PromotionConfig) -> Self {
        Self {
            pricing,
            promotion,
            brokers: BrokersConfig::default(),
        }
    }

    pub fn with_brokers(mut self, brokers: BrokersConfig) -> Self {
        self.brokers = brokers;
        self
    }
}

impl ConfigSource for StaticConfig {
    fn pricing(&self) -> Result<PricingConfig, ConfigError> {
        Ok(self.pricing.clone())
    }

    fn promotion(&self) -> Result<PromotionConfig, ConfigError> {
        Ok(self.promotion.clone())
    }

    fn brokers(&self) -> Result<BrokersConfig, ConfigError> {
        Ok(self.brokers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Broker;

    fn temp_store(name: &str) -> JsonConfigStore {
        let dir = std::env::temp_dir().join(format!(
            "premium_quote_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        JsonConfigStore::new(dir)
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let store = temp_store("defaults");

        assert_eq!(store.pricing().unwrap(), PricingConfig::default());
        assert_eq!(store.promotion().unwrap(), PromotionConfig::default());
        assert!(store.brokers().unwrap().brokers.is_empty());
    }

    #[test]
    fn test_update_then_read_back() {
        let store = temp_store("update");

        let mut pricing = PricingConfig::default();
        pricing.pivot_headcount = 80;
        pricing.minimum_premium = Some([(50_000, 900.0)].into_iter().collect());
        store.update_pricing(&pricing).unwrap();

        let promo = PromotionConfig {
            active: true,
            discount_percent: 15.0,
            expires: "2025-12-31".into(),
            label: "Offre Spéciale".into(),
        };
        store.update_promotion(&promo).unwrap();

        let brokers = BrokersConfig {
            brokers: vec![Broker {
                code: "BRK01".into(),
                name: "Cabinet Martin".into(),
                rate: 10.0,
                active: true,
            }],
        };
        store.update_brokers(&brokers).unwrap();

        assert_eq!(store.pricing().unwrap(), pricing);
        assert_eq!(store.promotion().unwrap(), promo);
        assert_eq!(store.brokers().unwrap(), brokers);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_invalid_update_is_rejected() {
        let store = temp_store("invalid");
        let promo = PromotionConfig { discount_percent: 150.0, ..Default::default() };

        assert!(matches!(store.update_promotion(&promo), Err(ConfigError::Invalid(_))));
        assert!(!store.dir().join(PROMOTION_FILE).exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let store = temp_store("malformed");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join(PRICING_FILE), "{ not json").unwrap();

        assert!(matches!(store.pricing(), Err(ConfigError::Parse { .. })));

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_hand_edited_values_are_validated_on_read() {
        let store = temp_store("hand_edited");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.dir().join(PRICING_FILE),
            r#"{"pivot_headcount": 0, "slope": 0.5, "min_ttc_standard": {"5000": 300}}"#,
        )
        .unwrap();
        fs::write(
            store.dir().join(PROMOTION_FILE),
            r#"{"active": true, "discount_percent": 120}"#,
        )
        .unwrap();
        fs::write(
            store.dir().join(BROKERS_FILE),
            r#"{"brokers": [{"code": "BRK01", "name": "Cabinet Martin", "rate": -5, "active": true}]}"#,
        )
        .unwrap();

        assert!(matches!(store.pricing(), Err(ConfigError::Invalid(_))));
        assert!(matches!(store.promotion(), Err(ConfigError::Invalid(_))));
        assert!(matches!(store.brokers(), Err(ConfigError::Invalid(_))));

        fs::write(
            store.dir().join(PRICING_FILE),
            r#"{"pivot_headcount": 70, "slope": -1, "min_ttc_standard": {"5000": 300}}"#,
        )
        .unwrap();
        assert!(matches!(store.pricing(), Err(ConfigError::Invalid(_))));

        let _ = fs::remove_dir_all(store.dir());
    }
}
