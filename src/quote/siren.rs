//! SIREN / SIRET company identifier checks (Luhn checksum)

use crate::error::ValidationError;

/// Luhn (mod 10) checksum over a string of ASCII digits
pub fn luhn_check(number: &str) -> bool {
    let digits = number.trim();
    if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = (b - b'0') as u32;
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Strip the separators users commonly type (spaces, dashes, dots)
fn clean(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .collect()
}

fn check_identifier(identifier: &str, len: usize) -> Option<String> {
    let cleaned = clean(identifier);
    let well_formed = cleaned.len() == len && cleaned.bytes().all(|b| b.is_ascii_digit());
    (well_formed && luhn_check(&cleaned)).then_some(cleaned)
}

/// Validate a 9-digit SIREN, returning it without separators
pub fn validate_siren(siren: &str) -> Result<String, ValidationError> {
    check_identifier(siren, 9).ok_or_else(|| ValidationError::InvalidSiren(siren.to_string()))
}

/// Validate a 14-digit SIRET, returning it without separators
pub fn validate_siret(siret: &str) -> Result<String, ValidationError> {
    check_identifier(siret, 14).ok_or_else(|| ValidationError::InvalidSiret(siret.to_string()))
}

/// SIREN part (first 9 digits) of a well-formed SIRET; the checksum is not verified
pub fn siren_from_siret(siret: &str) -> Option<String> {
    let cleaned = clean(siret);
    if cleaned.len() != 14 || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(cleaned[..9].to_string())
}
