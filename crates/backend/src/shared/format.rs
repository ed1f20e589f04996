/// Formats a byte count with dot thousand separators
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string(), '.', false)
}

/// Formats an order amount for display.
///
/// Currency 1 is INR and uses Indian grouping (12,34,567.00); every other
/// currency is shown in USD with groups of three.
pub fn format_amount(value: f64, currency_id: i64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let (symbol, indian) = if currency_id == 1 {
        ("₹", true)
    } else {
        ("$", false)
    };
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!(
        "{}{}{}.{}",
        sign,
        symbol,
        group_digits(int_part, ',', indian),
        frac_part
    )
}

/// Inserts `sep` between digit groups; Indian grouping is 3 then 2s
fn group_digits(digits: &str, sep: char, indian: bool) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        let boundary = if indian {
            i == 3 || (i > 3 && (i - 3) % 2 == 0)
        } else {
            i > 0 && i % 3 == 0
        };
        if boundary {
            result.push(sep);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_amount_inr() {
        assert_eq!(format_amount(0.0, 1), "₹0.00");
        assert_eq!(format_amount(999.5, 1), "₹999.50");
        assert_eq!(format_amount(1000.0, 1), "₹1,000.00");
        assert_eq!(format_amount(1234567.0, 1), "₹12,34,567.00");
        assert_eq!(format_amount(-150000.0, 1), "-₹1,50,000.00");
    }

    #[test]
    fn test_format_amount_export() {
        assert_eq!(format_amount(1234567.891, 2), "$1,234,567.89");
        assert_eq!(format_amount(f64::NAN, 2), "$0.00");
    }
}
