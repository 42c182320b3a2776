//! Premium pricing engine, trace output and rounding policy

mod engine;
mod result;
mod rounding;
mod trace;

pub use engine::{corrected_headcount, gross_premium_ht, scaled_headcount, PricingEngine};
pub use result::{CalculationDetails, DebugReport, FinalPrices, ParametersUsed, PricingResult};
pub use rounding::{round_cents, round_euros};
pub use trace::{Trace, TraceStep};
