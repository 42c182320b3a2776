//! Premium Quote - deterministic pricing engine for company insurance quotes
//!
//! This library provides:
//! - Standard and premium price computation from headcount, sector, claims history and guarantee
//! - A step-by-step calculation trace for administrative inspection
//! - Pricing, promotion and broker configuration with documented fallbacks
//! - Request validation (headcount range, sector codes, guarantee tiers, SIREN/SIRET)
//! - Checkout amount derivation (billing cycle, cents, broker commission)

pub mod error;
pub mod assumptions;
pub mod config;
pub mod quote;
pub mod pricing;
pub mod billing;
pub mod service;

// Re-export commonly used types
pub use error::{BillingError, ConfigError, QuoteError, ValidationError};
pub use assumptions::{GuaranteeTier, MinimumPriceTable, SectorCode};
pub use config::{BrokersConfig, PricingConfig, PromotionConfig};
pub use quote::{ClaimsHistory, PricingInput, QuoteRequest};
pub use pricing::{DebugReport, PricingEngine, PricingResult, TraceStep};
pub use billing::{BillingCycle, CheckoutAmount, ContractTier};
pub use service::{CheckoutRequest, Quote, QuoteService};
