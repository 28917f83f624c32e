//! Display formatting for converted values
//!
//! Mid-range magnitudes print fixed-point with at most four fractional
//! digits; everything else prints in scientific notation with four
//! significant digits so extreme conversions stay readable.

/// Smallest magnitude rendered fixed-point
pub const FIXED_MIN: f64 = 0.0001;

/// Magnitudes at or above this render in scientific notation
pub const FIXED_MAX: f64 = 1_000_000.0;

/// Fractional digits kept in fixed-point output
pub const FIXED_DECIMALS: usize = 4;

/// Significant digits in scientific output
pub const SCIENTIFIC_SIGFIGS: usize = 4;

/// Format a converted value for display
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (FIXED_MIN..FIXED_MAX).contains(&magnitude) {
        format_fixed(value)
    } else {
        format_scientific(value)
    }
}

fn format_fixed(value: f64) -> String {
    let s = format!("{:.prec$}", value, prec = FIXED_DECIMALS);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_scientific(value: f64) -> String {
    format!("{:.prec$e}", value, prec = SCIENTIFIC_SIGFIGS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "0");
    }

    #[test]
    fn test_fixed_trims_trailing_zeros() {
        assert_eq!(format_value(212.0), "212");
        assert_eq!(format_value(-273.15), "-273.15");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(1024.0), "1024");
    }

    #[test]
    fn test_fixed_rounds_to_four_places() {
        assert_eq!(format_value(3.280839895013123), "3.2808");
        assert_eq!(format_value(0.45359237), "0.4536");
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn test_large_values_use_scientific() {
        assert_eq!(format_value(1_234_567.0), "1.235e6");
        assert_eq!(format_value(1_000_000.0), "1.000e6");
        assert_eq!(format_value(-2_500_000.0), "-2.500e6");
    }

    #[test]
    fn test_small_values_use_scientific() {
        assert_eq!(format_value(0.00005), "5.000e-5");
        assert_eq!(format_value(0.0000123456), "1.235e-5");
    }

    #[test]
    fn test_just_below_threshold() {
        assert_eq!(format_value(999_999.0), "999999");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }
}
