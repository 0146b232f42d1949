/// Percentage change of `current` against `previous`.
///
/// A zero or negative baseline cannot anchor a ratio: any growth from
/// nothing is capped at 100%, no growth from nothing is 0%. Used uniformly
/// for revenue, order count, AOV, conversion rate and per-product trends.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_baseline_is_capped() {
        assert_eq!(percent_change(150.0, 0.0), 100.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(10.0, -5.0), 100.0);
    }

    #[test]
    fn regular_ratios() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
        assert_eq!(percent_change(0.0, 100.0), -100.0);
    }
}
