//! Fixed significant-digit rounding applied to every value before it is reported.

/// Significant digits used for reductions and most metrics.
pub const DEFAULT_PRECISION: u32 = 3;

/// Significant digits used for the Rule of 72.
pub const RULE_72_PRECISION: u32 = 4;

/// Rounds `value` to `digits` significant digits, half away from zero.
///
/// Zero and non-finite values are returned unchanged. `digits == 0` is
/// treated as 1.
pub fn round_sig(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = digits.max(1) as i32;
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits - 1 - magnitude;
    // Scale by an exact power of ten in whichever direction keeps the divisor integral.
    if shift >= 0 {
        let factor = 10f64.powi(shift);
        let rounded = (value * factor).round() / factor;
        if rounded.is_finite() {
            rounded
        } else {
            value
        }
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}

/// Rounds at [`DEFAULT_PRECISION`].
pub fn round_default(value: f64) -> f64 {
    round_sig(value, DEFAULT_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_digits() {
        assert_eq!(round_sig(1234.5678, 3), 1230.0);
        assert_eq!(round_sig(189.84, 3), 190.0);
        assert_eq!(round_sig(12.345, 3), 12.3);
        assert_eq!(round_sig(0.0456789, 3), 0.0457);
    }

    #[test]
    fn rounds_negative_values() {
        assert_eq!(round_sig(-1234.5678, 3), -1230.0);
        assert_eq!(round_sig(-0.0456789, 3), -0.0457);
    }

    #[test]
    fn rule_of_72_precision() {
        assert_eq!(round_sig(14.285714, RULE_72_PRECISION), 14.29);
        assert_eq!(round_sig(0.72, RULE_72_PRECISION), 0.72);
    }

    #[test]
    fn passes_through_zero_and_non_finite() {
        assert_eq!(round_sig(0.0, 3), 0.0);
        assert!(round_sig(f64::NAN, 3).is_nan());
        assert_eq!(round_sig(f64::INFINITY, 3), f64::INFINITY);
        assert_eq!(round_sig(f64::NEG_INFINITY, 3), f64::NEG_INFINITY);
    }

    #[test]
    fn integers_within_precision_are_unchanged() {
        assert_eq!(round_sig(100.0, 3), 100.0);
        assert_eq!(round_sig(5.0, 3), 5.0);
        assert_eq!(round_sig(999.0, 3), 999.0);
    }

    #[test]
    fn carry_into_next_magnitude() {
        assert_eq!(round_sig(999.6, 3), 1000.0);
        assert_eq!(round_sig(0.09996, 3), 0.1);
    }

    #[test]
    fn rounding_is_idempotent() {
        let samples = [
            1234.5678, 0.0456789, 189.84, -73.219, 1.0e-7 * 3.14159, 6.02e23, 0.5, 42.0,
        ];
        for digits in [3, 4] {
            for &v in &samples {
                let once = round_sig(v, digits);
                assert_eq!(round_sig(once, digits), once, "value {v} digits {digits}");
            }
        }
    }

    #[test]
    fn zero_digits_behaves_like_one() {
        assert_eq!(round_sig(456.0, 0), 500.0);
    }
}
