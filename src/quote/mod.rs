//! Quote inputs: pricing input types, request validation, company identifiers
//! and batch loading

mod data;
mod siren;
mod validation;
pub mod loader;

pub use data::{ClaimsHistory, PricingInput, QuoteRequest};
pub use siren::{luhn_check, siren_from_siret, validate_siren, validate_siret};
pub use validation::{validate_quote_request, MAX_HEADCOUNT, MIN_HEADCOUNT};
pub use loader::{load_quote_rows, load_quote_rows_from_reader, QuoteRow};
