//! Premium pricing engine
//!
//! Pure function of (input, pricing config, promotion). The trace variant runs
//! the same evaluation and records each step alongside, so both variants return
//! identical prices.

use super::result::{CalculationDetails, DebugReport, FinalPrices, ParametersUsed, PricingResult};
use super::rounding::round_cents;
use super::trace::Trace;
use crate::assumptions::{
    claim_rate_per_mille, tax_percent, ANTECEDENT_MULTIPLIER, HEADCOUNT_INFLATION,
    HEADCOUNT_OFFSET, MISSING_TIER_FLOOR, PREMIUM_COVERAGE_FACTOR, PREMIUM_FLOOR_FACTOR,
    PREMIUM_GUARD_FACTOR, PREMIUM_SURCHARGE, TAX_MULTIPLIER,
};
use crate::config::{PricingConfig, PromotionConfig};
use crate::quote::PricingInput;

/// Declared headcount inflated by 10% plus one, rounded down
pub fn corrected_headcount(headcount: u32) -> u32 {
    (headcount as f64 * HEADCOUNT_INFLATION + HEADCOUNT_OFFSET).floor() as u32
}

/// Exposure headcount: linear up to the pivot, `slope` per employee above it
pub fn scaled_headcount(corrected: u32, pivot: u32, slope: f64) -> f64 {
    let corrected = corrected as f64;
    let pivot = pivot as f64;
    corrected.min(pivot) + slope * (corrected - pivot).max(0.0)
}

/// Net-of-tax premium before any floor
pub fn gross_premium_ht(scaled: f64, claim_probability: f64, guarantee: f64, multiplier: f64) -> f64 {
    scaled * claim_probability * guarantee * multiplier
}

/// Where the premium-tier minimum comes from
#[derive(Debug, Clone, Copy, PartialEq)]
enum PremiumFloor {
    /// Standard floor × 1.2, applied before the surcharge
    Derived(f64),
    /// Explicit minimum premium TTC, applied after the surcharge
    Configured(f64),
}

impl PremiumFloor {
    fn amount(self) -> f64 {
        match self {
            PremiumFloor::Derived(floor) | PremiumFloor::Configured(floor) => floor,
        }
    }
}

struct Evaluation {
    result: PricingResult,
    parameters: ParametersUsed,
}

/// Record a step when a trace is being collected
fn note(trace: &mut Option<&mut Trace>, record: impl FnOnce(&mut Trace)) {
    if let Some(t) = trace.as_deref_mut() {
        record(t);
    }
}

/// Pricing engine bound to a resolved configuration
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
    promotion: PromotionConfig,
}

impl PricingEngine {
    /// Create an engine; the promotion is applied as given (expiry is resolved by the caller)
    pub fn new(config: PricingConfig, promotion: PromotionConfig) -> Self {
        Self { config, promotion }
    }

    /// Standard and premium prices for one input
    pub fn price(&self, input: &PricingInput) -> PricingResult {
        self.evaluate(input, None).result
    }

    /// Same prices as [`price`](Self::price), with every step of the formula recorded
    pub fn price_with_trace(&self, input: &PricingInput) -> DebugReport {
        let mut trace = Trace::new();
        let evaluation = self.evaluate(input, Some(&mut trace));

        DebugReport {
            trace: trace.into_steps(),
            parameters_used: evaluation.parameters,
            final_prices: FinalPrices::from(&evaluation.result),
            fallback: false,
        }
    }

    fn evaluate(&self, input: &PricingInput, mut trace: Option<&mut Trace>) -> Evaluation {
        let config = &self.config;
        let promotion = &self.promotion;
        let guarantee = input.guarantee_amount;

        let corrected = corrected_headcount(input.headcount);
        note(&mut trace, |t| {
            t.record(
                "Correction de l'effectif",
                "Ajout de 10 % + 1 pour tenir compte des variations, arrondi à l'entier inférieur",
                format!("floor({} × {} + {})", input.headcount, HEADCOUNT_INFLATION, HEADCOUNT_OFFSET),
                corrected as f64,
            )
        });

        let pivot = config.pivot_headcount;
        let scaled = scaled_headcount(corrected, pivot, config.slope);
        note(&mut trace, |t| {
            let formula = if corrected <= pivot {
                format!("{} (pas de scaling car ≤ {})", corrected, pivot)
            } else {
                format!("{} + {} × ({} − {})", pivot, config.slope, corrected, pivot)
            };
            t.record("Application du pivot", "Scaling pour les grands effectifs", formula, round_cents(scaled))
        });

        let rate = claim_rate_per_mille(&input.sector);
        let probability = rate / 1000.0;
        note(&mut trace, |t| {
            t.record(
                "Taux de sinistralité CTN",
                "Probabilité de sinistre selon le secteur d'activité",
                format!("{}‰ = {}", rate, probability),
                probability,
            )
        });

        let has_antecedents = input.claims.has_antecedents();
        let multiplier = if has_antecedents { ANTECEDENT_MULTIPLIER } else { 1.0 };
        note(&mut trace, |t| {
            let formula = if has_antecedents {
                format!("×{} (antécédents détectés)", ANTECEDENT_MULTIPLIER)
            } else {
                "×1 (pas d'antécédents)".to_string()
            };
            t.record("Coefficient antécédents", "Majoration en cas de sinistres antérieurs", formula, multiplier)
        });

        // Standard tier
        let gross_ht = gross_premium_ht(scaled, probability, guarantee, multiplier);
        note(&mut trace, |t| {
            t.record(
                "Prime brute HT standard",
                "Effectif × probabilité × garantie × coefficient",
                format!("{} × {} × {} × {}", round_cents(scaled), probability, guarantee, multiplier),
                round_cents(gross_ht),
            )
        });

        let gross_ttc = gross_ht * TAX_MULTIPLIER;
        note(&mut trace, |t| {
            t.record(
                "Ajout des taxes",
                "Taxe d'assurance sur la prime brute",
                format!("{} × {}", round_cents(gross_ht), TAX_MULTIPLIER),
                round_cents(gross_ttc),
            )
        });

        let standard_floor = config
            .minimum_standard
            .floor_for(guarantee)
            .unwrap_or(MISSING_TIER_FLOOR);
        let mut standard_total = gross_ttc.max(standard_floor);
        note(&mut trace, |t| {
            t.record(
                "Application du plancher standard",
                "Prix minimum pour la garantie choisie",
                format!("max({}, {})", round_cents(gross_ttc), standard_floor),
                round_cents(standard_total),
            )
        });

        if standard_total <= 0.0 {
            log::warn!("Non-positive standard total {} for {:?}, forcing floor", standard_total, input);
            standard_total = MISSING_TIER_FLOOR;
            note(&mut trace, |t| {
                t.record("Garde-fou standard", "Prix non positif remplacé", format!("{}", MISSING_TIER_FLOOR), standard_total)
            });
        }

        // Premium tier: same exposure on a larger guarantee
        let premium_guarantee = guarantee * PREMIUM_COVERAGE_FACTOR;
        note(&mut trace, |t| {
            t.record(
                "Garantie premium",
                "La formule premium couvre 20 % de garantie en plus",
                format!("{} × {}", guarantee, PREMIUM_COVERAGE_FACTOR),
                round_cents(premium_guarantee),
            )
        });

        let premium_ttc = gross_premium_ht(scaled, probability, premium_guarantee, multiplier) * TAX_MULTIPLIER;
        note(&mut trace, |t| {
            t.record(
                "Prime brute TTC premium",
                "Même formule sur la garantie premium, taxes incluses",
                format!(
                    "{} × {} × {} × {} × {}",
                    round_cents(scaled),
                    probability,
                    round_cents(premium_guarantee),
                    multiplier,
                    TAX_MULTIPLIER
                ),
                round_cents(premium_ttc),
            )
        });

        let premium_floor = match config.minimum_premium.as_ref().and_then(|t| t.floor_for(guarantee)) {
            Some(floor) => PremiumFloor::Configured(floor),
            None => PremiumFloor::Derived(standard_floor * PREMIUM_FLOOR_FACTOR),
        };

        let mut premium_total = match premium_floor {
            PremiumFloor::Derived(floor) => {
                let base = premium_ttc.max(floor);
                note(&mut trace, |t| {
                    t.record(
                        "Plancher premium",
                        "Plancher standard majoré de 20 %",
                        format!("max({}, {} × {})", round_cents(premium_ttc), standard_floor, PREMIUM_FLOOR_FACTOR),
                        round_cents(base),
                    )
                });
                let surcharged = base * PREMIUM_SURCHARGE;
                note(&mut trace, |t| {
                    t.record(
                        "Majoration premium",
                        "Majoration de 10 % après le plancher",
                        format!("{} × {}", round_cents(base), PREMIUM_SURCHARGE),
                        round_cents(surcharged),
                    )
                });
                surcharged
            }
            PremiumFloor::Configured(floor) => {
                let surcharged = premium_ttc * PREMIUM_SURCHARGE;
                note(&mut trace, |t| {
                    t.record(
                        "Majoration premium",
                        "Majoration de 10 % sur la prime brute",
                        format!("{} × {}", round_cents(premium_ttc), PREMIUM_SURCHARGE),
                        round_cents(surcharged),
                    )
                });
                let floored = surcharged.max(floor);
                note(&mut trace, |t| {
                    t.record(
                        "Plancher premium",
                        "Prix minimum premium configuré",
                        format!("max({}, {})", round_cents(surcharged), floor),
                        round_cents(floored),
                    )
                });
                floored
            }
        };

        // Promotions discount the premium tier only
        if promotion.active {
            let before = premium_total;
            premium_total *= 1.0 - promotion.discount_percent / 100.0;
            note(&mut trace, |t| {
                t.record(
                    "Promotion",
                    "Remise sur le prix premium",
                    format!("{} × (1 − {}/100)", round_cents(before), promotion.discount_percent),
                    round_cents(premium_total),
                )
            });
        }

        if premium_total <= 0.0 {
            log::warn!("Non-positive premium total {} for {:?}, deriving from standard", premium_total, input);
            premium_total = standard_total * PREMIUM_GUARD_FACTOR;
            note(&mut trace, |t| {
                t.record(
                    "Garde-fou premium",
                    "Prix non positif remplacé",
                    format!("{} × {}", round_cents(standard_total), PREMIUM_GUARD_FACTOR),
                    round_cents(premium_total),
                )
            });
        }

        // Net/tax split is always taken from the standard total
        let net = standard_total / TAX_MULTIPLIER;
        let tax = standard_total - net;
        note(&mut trace, |t| {
            t.record(
                "Montant HT",
                "Prix standard décomposé en HT et taxes",
                format!("{} / {}", round_cents(standard_total), TAX_MULTIPLIER),
                round_cents(net),
            )
        });

        log::debug!(
            "Priced headcount={} sector={} guarantee={}: corrected={} scaled={} gross_ht={} standard={} premium={}",
            input.headcount, input.sector, guarantee, corrected, scaled, gross_ht, standard_total, premium_total
        );

        let result = PricingResult {
            standard_total: round_cents(standard_total),
            premium_total: round_cents(premium_total),
            net_amount: round_cents(net),
            tax_amount: round_cents(tax),
            promotion_applied: promotion.active,
            promotion_label: promotion.active.then(|| promotion.label.clone()),
            promotion_expires: promotion.active.then(|| promotion.expires.clone()),
            details: Some(CalculationDetails {
                corrected_headcount: corrected,
                scaled_headcount: round_cents(scaled),
                claim_probability: probability,
                gross_premium_ht: round_cents(gross_ht),
                gross_premium_ttc: round_cents(gross_ttc),
                standard_floor,
                antecedent_multiplier: multiplier,
            }),
        };

        let parameters = ParametersUsed {
            pivot_headcount: pivot,
            slope: config.slope,
            claim_probability: probability,
            taxes_percent: tax_percent(),
            standard_floor,
            premium_floor: premium_floor.amount(),
            premium_floor_configured: matches!(premium_floor, PremiumFloor::Configured(_)),
            promotion_active: promotion.active,
            discount_percent: promotion.discount_percent,
        };

        Evaluation { result, parameters }
    }
}
