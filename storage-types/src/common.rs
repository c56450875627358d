//! Common helpers shared across models

use num_format::{Locale, ToFormattedString};

/// Format a byte count for humans (e.g. "100.00 GB")
pub fn bytes_to_pretty(bytes: u64, add_bytes: bool) -> String {
    let mut steps = 0;
    let mut val: f64 = bytes as f64;

    while val >= 1024. && steps < 6 {
        val /= 1024.;
        steps += 1;
    }

    let unit = match steps {
        0 => "B",
        1 => "KB",
        2 => "MB",
        3 => "GB",
        4 => "TB",
        5 => "PB",
        _ => "EB",
    };

    if add_bytes {
        let bytes_str = bytes.to_formatted_string(&Locale::en);
        format!("{:.2} {} ({} bytes)", val, unit, bytes_str)
    } else {
        format!("{:.2} {}", val, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_binary_units() {
        assert_eq!(bytes_to_pretty(512, false), "512.00 B");
        assert_eq!(bytes_to_pretty(1024 * 1024, false), "1.00 MB");
        assert_eq!(bytes_to_pretty(107_374_182_400, false), "100.00 GB");
    }

    #[test]
    fn pretty_includes_grouped_byte_count() {
        assert_eq!(
            bytes_to_pretty(1_048_576, true),
            "1.00 MB (1,048,576 bytes)"
        );
    }
}
