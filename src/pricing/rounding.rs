//! Monetary rounding policy
//!
//! Intermediate values stay unrounded; only returned figures (and trace
//! display values) go through these helpers.

/// Round to the cent, half-up
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Round to the whole euro, half-up
pub fn round_euros(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_cents() {
        assert_abs_diff_eq!(round_cents(2885.36625), 2885.37, epsilon = 1e-9);
        assert_abs_diff_eq!(round_cents(1974.0336), 1974.03, epsilon = 1e-9);
        assert_abs_diff_eq!(round_cents(0.125), 0.13, epsilon = 1e-9);
        assert_eq!(round_cents(300.0), 300.0);
    }

    #[test]
    fn test_round_euros() {
        assert_eq!(round_euros(49.5), 50.0);
        assert_eq!(round_euros(49.49), 49.0);
        assert_eq!(round_euros(150.0), 150.0);
    }
}
