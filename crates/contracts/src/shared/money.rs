/// Rounds an amount to 2 decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `base`, rounded.
pub fn percent_of(base: f64, percent: f64) -> f64 {
    round2(base * percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(-2.346), -2.35);
        assert_eq!(round2(3.0), 3.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(200.0, 15.0), 30.0);
        assert_eq!(percent_of(99.99, 0.0), 0.0);
    }
}
