/// Round a value to a fixed number of decimal places.
/// Used for display stability of reported index values.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_three_places() {
        assert_eq!(round_to(0.71962, 3), 0.72);
        assert_eq!(round_to(0.1234, 3), 0.123);
        assert_eq!(round_to(-0.29951, 3), -0.3);
    }

    #[test]
    fn test_round_to_is_stable_for_exact_values() {
        assert_eq!(round_to(0.0, 3), 0.0);
        assert_eq!(round_to(0.6, 3), 0.6);
    }
}
