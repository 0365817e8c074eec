//! Human-readable byte size formatting

/// Units for [`format_size`], scaled in steps of 1024.
const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display: `0` -> `"0 Bytes"`, `1536` -> `"1.5 KB"`,
/// `1048576` -> `"1 MB"`.
///
/// Values scale in 1024 steps and round to at most two decimal places with
/// trailing zeros dropped. Sizes of 1024 GB and above stay in GB instead of
/// moving to units the display never defined.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    // f64 Display prints the shortest round-trip form, so 1.50 comes out
    // as "1.5" and 1.00 as "1".
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_bytes() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn test_sub_kilobyte_stays_in_bytes() {
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(500), "500 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
    }

    #[test]
    fn test_kilobytes() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(format_size(1048576), "1 MB");
        assert_eq!(format_size(1234567), "1.18 MB");
    }

    #[test]
    fn test_gigabytes() {
        assert_eq!(format_size(1073741824), "1 GB");
        assert_eq!(format_size(1610612736), "1.5 GB");
    }

    #[test]
    fn test_oversized_values_clamp_to_gb() {
        assert_eq!(format_size(1024 * 1073741824), "1024 GB");
        assert_eq!(format_size(5 * 1024 * 1073741824), "5120 GB");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1126 / 1024 = 1.0996... -> 1.1
        assert_eq!(format_size(1126), "1.1 KB");
        // 1127 / 1024 = 1.1005... -> 1.1
        assert_eq!(format_size(1127), "1.1 KB");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: values below 1 KB format as whole byte counts
        #[test]
        fn sub_kilobyte_is_whole_bytes(bytes in 1u64..1024) {
            prop_assert_eq!(format_size(bytes), format!("{} Bytes", bytes));
        }

        /// Property: output always ends with a defined unit
        #[test]
        fn always_ends_with_known_unit(bytes: u64) {
            let formatted = format_size(bytes);
            prop_assert!(SIZE_UNITS.iter().any(|unit| formatted.ends_with(unit)));
        }

        /// Property: the numeric part never carries more than two decimals
        #[test]
        fn at_most_two_decimals(bytes: u64) {
            let formatted = format_size(bytes);
            let number = formatted.split(' ').next().unwrap();
            if let Some((_, frac)) = number.split_once('.') {
                prop_assert!(frac.len() <= 2, "too many decimals in {}", formatted);
            }
        }
    }
}
