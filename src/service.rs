//! Quote service: configuration resolution and fallback policy around the engine
//!
//! Resolves configuration through a [`ConfigSource`] once per call, applies the
//! promotion expiry check and, when pricing configuration cannot be obtained,
//! substitutes the fixed fallback quote so a price is always produced.

use crate::assumptions::{FALLBACK_PREMIUM_TOTAL, FALLBACK_STANDARD_TOTAL, TAX_MULTIPLIER};
use crate::billing::{checkout_amount, resolve_broker, BillingCycle, CheckoutAmount, ContractTier};
use crate::config::{ConfigSource, PricingConfig, PromotionConfig};
use crate::error::QuoteError;
use crate::pricing::{round_cents, DebugReport, PricingEngine, PricingResult};
use crate::quote::{validate_quote_request, PricingInput, QuoteRequest};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Prices returned to the caller, flagged when they come from the fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(flatten)]
    pub pricing: PricingResult,

    /// True when pricing configuration was unavailable
    #[serde(default)]
    pub fallback: bool,
}

impl Quote {
    /// Fixed quote used when no pricing configuration can be obtained
    pub fn fallback() -> Self {
        let net_amount = round_cents(FALLBACK_STANDARD_TOTAL / TAX_MULTIPLIER);
        Self {
            pricing: PricingResult {
                standard_total: FALLBACK_STANDARD_TOTAL,
                premium_total: FALLBACK_PREMIUM_TOTAL,
                net_amount,
                tax_amount: round_cents(FALLBACK_STANDARD_TOTAL - net_amount),
                promotion_applied: false,
                promotion_label: None,
                promotion_expires: None,
                details: None,
            },
            fallback: true,
        }
    }
}

/// Contract creation request: the quote inputs again plus the purchase choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub quote: QuoteRequest,

    pub tier: ContractTier,

    #[serde(default)]
    pub billing_cycle: BillingCycle,

    #[serde(default)]
    pub currency: Option<String>,
}

/// Quote service over a configuration source
///
/// # Example
/// ```ignore
/// let service = QuoteService::new(JsonConfigStore::new("config"));
/// let quote = service.quote(&PricingInput::new(50, "C", ClaimsHistory::none(), 50000.0));
/// ```
#[derive(Debug, Clone)]
pub struct QuoteService<S> {
    source: S,
    as_of: Option<NaiveDate>,
}

impl<S: ConfigSource> QuoteService<S> {
    pub fn new(source: S) -> Self {
        Self { source, as_of: None }
    }

    /// Pin the date used for promotion expiry (defaults to today, UTC)
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }

    /// Promotion in effect today; inactive when unavailable
    fn promotion(&self) -> PromotionConfig {
        match self.source.promotion() {
            Ok(promotion) => promotion.effective_on(self.today()),
            Err(e) => {
                log::warn!("Promotion configuration unavailable, no promotion applied: {}", e);
                PromotionConfig::default()
            }
        }
    }

    /// Engine built from the current configuration, `None` when pricing config is unavailable
    fn engine(&self) -> Option<PricingEngine> {
        match self.source.pricing() {
            Ok(config) => Some(PricingEngine::new(config, self.promotion())),
            Err(e) => {
                log::warn!("Pricing configuration unavailable, using fallback prices: {}", e);
                None
            }
        }
    }

    /// Price one quote; never fails
    pub fn quote(&self, input: &PricingInput) -> Quote {
        let Some(engine) = self.engine() else {
            return Quote::fallback();
        };
        let pricing = engine.price(input);
        log::info!(
            "Quote for {} employees, sector {}: standard {:.2}, premium {:.2}",
            input.headcount, input.sector, pricing.standard_total, pricing.premium_total
        );
        Quote { pricing, fallback: false }
    }

    /// Validate a wizard request, then price it
    pub fn quote_request(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        let input = validate_quote_request(request)?;
        Ok(self.quote(&input))
    }

    /// Validate and price many requests against a single configuration snapshot
    ///
    /// Results keep the request order; a rejected request never reaches the engine.
    pub fn quote_batch(&self, requests: &[QuoteRequest]) -> Vec<Result<Quote, QuoteError>> {
        let engine = self.engine();
        let quotes: Vec<Result<Quote, QuoteError>> = requests
            .par_iter()
            .map(|request| {
                let input = validate_quote_request(request)?;
                Ok(match &engine {
                    Some(engine) => Quote {
                        pricing: engine.price(&input),
                        fallback: false,
                    },
                    None => Quote::fallback(),
                })
            })
            .collect();

        let rejected = quotes.iter().filter(|q| q.is_err()).count();
        log::info!("Priced batch of {} quotes, {} rejected", quotes.len() - rejected, rejected);
        quotes
    }

    /// Traced computation; runs on default configuration when none is available
    pub fn debug(&self, input: &PricingInput) -> DebugReport {
        match self.engine() {
            Some(engine) => engine.price_with_trace(input),
            None => {
                let engine = PricingEngine::new(PricingConfig::default(), PromotionConfig::default());
                let mut report = engine.price_with_trace(input);
                report.fallback = true;
                report
            }
        }
    }

    /// Recompute the price server-side and derive the amount to charge
    pub fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutAmount, QuoteError> {
        let quote = self.quote_request(&request.quote)?;

        let brokers;
        let broker = match request.quote.broker_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                brokers = self.source.brokers()?;
                Some(resolve_broker(&brokers, code)?)
            }
            _ => None,
        };

        let amount = checkout_amount(
            &quote.pricing,
            request.tier,
            request.billing_cycle,
            request.currency.as_deref(),
            broker,
        )?;
        log::info!(
            "Checkout {:?}/{:?}: {} cents ({})",
            amount.tier, amount.billing_cycle, amount.amount_cents, amount.currency
        );
        Ok(amount)
    }
}
