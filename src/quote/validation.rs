//! Validation of quote requests before they reach the pricing engine

use super::{PricingInput, QuoteRequest};
use crate::assumptions::{GuaranteeTier, SectorCode};
use crate::error::ValidationError;

/// Smallest quotable aggregate headcount
pub const MIN_HEADCOUNT: u32 = 20;

/// Largest quotable aggregate headcount
pub const MAX_HEADCOUNT: u32 = 100;

/// Sector code that exists in the classification but is never quoted
const EXCLUDED_SECTOR: &str = "B";

/// Check a wizard payload and build the engine input from it
pub fn validate_quote_request(request: &QuoteRequest) -> Result<PricingInput, ValidationError> {
    if !(MIN_HEADCOUNT..=MAX_HEADCOUNT).contains(&request.headcount) {
        return Err(ValidationError::HeadcountOutOfRange(request.headcount));
    }

    let code = request.sector.trim().to_ascii_uppercase();
    if code == EXCLUDED_SECTOR {
        return Err(ValidationError::ExcludedSector(code));
    }
    let sector: SectorCode = code
        .parse()
        .map_err(|_| ValidationError::UnknownSector(code.clone()))?;

    let tier = GuaranteeTier::from_amount(request.guarantee_amount)
        .ok_or(ValidationError::UnsupportedGuarantee(request.guarantee_amount))?;

    Ok(PricingInput {
        headcount: request.headcount,
        sector: sector.as_str().to_string(),
        claims: request.claims,
        guarantee_amount: tier.amount() as f64,
    })
}
