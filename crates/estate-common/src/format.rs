//! Number formatting for narrative text.

/// Formats a value rounded to whole units with `,` thousands separators.
///
/// ```
/// use estate_common::format_grouped;
///
/// assert_eq!(format_grouped(1234567.4), "1,234,567");
/// assert_eq!(format_grouped(-9876.5), "-9,876");
/// assert_eq!(format_grouped(999.0), "999");
/// ```
pub fn format_grouped(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        // inf / NaN
        return rounded;
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Rounds to two decimal places for chart payloads.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(12345.0), "12,345");
        assert_eq!(format_grouped(5_500_000.0), "5,500,000");
    }

    #[test]
    fn passes_through_non_finite() {
        assert_eq!(format_grouped(f64::INFINITY), "inf");
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(7000.0), 7000.0);
        assert_eq!(round2(-2.5), -2.5);
    }
}
