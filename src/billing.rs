//! Checkout amount derivation
//!
//! Turns a server-side price into the amount charged: tier selection, annual or
//! monthly billing, conversion to cents and broker commission.

use crate::config::{Broker, BrokersConfig};
use crate::error::BillingError;
use crate::pricing::{round_euros, PricingResult};
use serde::{Deserialize, Serialize};

/// Surcharge applied to the annual price when paying monthly
pub const MONTHLY_SURCHARGE_PERCENT: f64 = 20.0;

pub const DEFAULT_CURRENCY: &str = "eur";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractTier {
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Annual,
    Monthly,
}

/// Amount to charge for a contract, derived from a fresh price computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutAmount {
    pub tier: ContractTier,
    pub billing_cycle: BillingCycle,

    /// Annual TTC price of the chosen tier
    #[serde(rename = "tier_ttc")]
    pub tier_total: f64,

    /// Price per billing period in euros
    pub price_eur: f64,
    pub amount_cents: i64,
    pub currency: String,

    /// Net/tax split of the standard total, whichever tier is bought
    #[serde(rename = "ht")]
    pub net_amount: f64,
    #[serde(rename = "taxes")]
    pub tax_amount: f64,

    pub promotion_applied: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_commission_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_commission_amount: Option<f64>,
}

/// Euros to integer cents
pub fn euros_to_cents(euros: f64) -> Result<i64, BillingError> {
    if !euros.is_finite() {
        return Err(BillingError::InvalidAmount(euros));
    }
    Ok((euros * 100.0 + 0.5).floor() as i64)
}

/// Charged amount back in euros, exact to the cent
pub fn cents_to_euros(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Lowercased ISO-4217 code; `eur` when none is given
pub fn normalize_currency(currency: Option<&str>) -> Result<String, BillingError> {
    let Some(currency) = currency.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(DEFAULT_CURRENCY.to_string());
    };
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(BillingError::InvalidCurrency(currency.to_string()));
    }
    Ok(currency.to_ascii_lowercase())
}

/// Price per billing period for an annual tier total
///
/// Monthly payment carries a 20% surcharge spread over twelve months, rounded
/// to the whole euro.
pub fn billed_price(tier_total: f64, cycle: BillingCycle) -> f64 {
    match cycle {
        BillingCycle::Annual => tier_total,
        BillingCycle::Monthly => {
            round_euros(tier_total * (1.0 + MONTHLY_SURCHARGE_PERCENT / 100.0) / 12.0)
        }
    }
}

/// Active broker for a referral code
pub fn resolve_broker<'a>(brokers: &'a BrokersConfig, code: &str) -> Result<&'a Broker, BillingError> {
    let broker = brokers
        .find(code)
        .ok_or_else(|| BillingError::UnknownBroker(code.trim().to_string()))?;
    if !broker.active {
        return Err(BillingError::InactiveBroker(broker.code.clone()));
    }
    Ok(broker)
}

/// Broker commission in whole euros
pub fn broker_commission(tier_total: f64, broker: &Broker) -> f64 {
    round_euros(tier_total * broker.rate / 100.0)
}

/// Derive the checkout amount for the chosen tier and billing cycle
pub fn checkout_amount(
    pricing: &PricingResult,
    tier: ContractTier,
    billing_cycle: BillingCycle,
    currency: Option<&str>,
    broker: Option<&Broker>,
) -> Result<CheckoutAmount, BillingError> {
    let tier_total = match tier {
        ContractTier::Standard => pricing.standard_total,
        ContractTier::Premium => pricing.premium_total,
    };
    let price_eur = billed_price(tier_total, billing_cycle);
    let amount_cents = euros_to_cents(price_eur)?;
    if amount_cents <= 0 {
        return Err(BillingError::NonPositiveCents(amount_cents));
    }

    Ok(CheckoutAmount {
        tier,
        billing_cycle,
        tier_total,
        price_eur: cents_to_euros(amount_cents),
        amount_cents,
        currency: normalize_currency(currency)?,
        net_amount: pricing.net_amount,
        tax_amount: pricing.tax_amount,
        promotion_applied: pricing.promotion_applied,
        broker_code: broker.map(|b| b.code.clone()),
        broker_commission_percent: broker.map(|b| b.rate),
        broker_commission_amount: broker.map(|b| broker_commission(tier_total, b)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pricing() -> PricingResult {
        PricingResult {
            standard_total: 1495.48,
            premium_total: 1974.03,
            net_amount: 1372.0,
            tax_amount: 123.48,
            promotion_applied: false,
            promotion_label: None,
            promotion_expires: None,
            details: None,
        }
    }

    fn broker(active: bool) -> Broker {
        Broker {
            code: "BRK01".into(),
            name: "Cabinet Martin".into(),
            rate: 10.0,
            active,
        }
    }

    #[test]
    fn test_euros_to_cents() {
        assert_eq!(euros_to_cents(1495.48), Ok(149548));
        assert_eq!(euros_to_cents(197.0), Ok(19700));
        assert!(euros_to_cents(f64::NAN).is_err());
        assert!(euros_to_cents(f64::INFINITY).is_err());
        assert_abs_diff_eq!(cents_to_euros(149548), 1495.48, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency(None), Ok("eur".to_string()));
        assert_eq!(normalize_currency(Some(" EUR ")), Ok("eur".to_string()));
        assert_eq!(normalize_currency(Some("usd")), Ok("usd".to_string()));
        assert!(normalize_currency(Some("EURO")).is_err());
        assert!(normalize_currency(Some("E1R")).is_err());
    }

    #[test]
    fn test_monthly_billing() {
        // 1974.03 × 1.2 / 12 = 197.403 -> 197
        assert_eq!(billed_price(1974.03, BillingCycle::Monthly), 197.0);
        assert_eq!(billed_price(500.0, BillingCycle::Monthly), 50.0);
        assert_eq!(billed_price(1974.03, BillingCycle::Annual), 1974.03);
    }

    #[test]
    fn test_checkout_premium_annual() {
        let amount = checkout_amount(&pricing(), ContractTier::Premium, BillingCycle::Annual, None, None).unwrap();

        assert_eq!(amount.tier_total, 1974.03);
        assert_eq!(amount.amount_cents, 197403);
        assert_eq!(amount.price_eur, cents_to_euros(amount.amount_cents));
        assert_eq!(amount.currency, "eur");
        // Net/tax stay on the standard total
        assert_eq!(amount.net_amount, 1372.0);
        assert!(amount.broker_code.is_none());
    }

    #[test]
    fn test_checkout_with_broker() {
        let b = broker(true);
        let amount = checkout_amount(&pricing(), ContractTier::Standard, BillingCycle::Monthly, Some("EUR"), Some(&b)).unwrap();

        assert_eq!(amount.price_eur, 150.0);
        assert_eq!(amount.amount_cents, 15000);
        assert_eq!(amount.broker_commission_percent, Some(10.0));
        assert_eq!(amount.broker_commission_amount, Some(150.0));
    }

    #[test]
    fn test_resolve_broker() {
        let brokers = BrokersConfig { brokers: vec![broker(true)] };
        assert!(resolve_broker(&brokers, "brk01").is_ok());
        assert_eq!(resolve_broker(&brokers, "NOPE"), Err(BillingError::UnknownBroker("NOPE".into())));

        let brokers = BrokersConfig { brokers: vec![broker(false)] };
        assert_eq!(resolve_broker(&brokers, "BRK01"), Err(BillingError::InactiveBroker("BRK01".into())));
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let mut zero = pricing();
        zero.standard_total = 0.0;
        let err = checkout_amount(&zero, ContractTier::Standard, BillingCycle::Annual, None, None);
        assert_eq!(err, Err(BillingError::NonPositiveCents(0)));
    }
}
