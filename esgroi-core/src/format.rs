//! German-locale number formatting for reports ("1.234,5 €").

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "CHF" => "CHF",
        other => other,
    }
}

/// Formats `value` with `.` as thousands separator and `,` as decimal mark.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

pub fn format_currency(value: f64, decimals: usize, currency: &str) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{} {}", format_number(value, decimals), currency_symbol(currency))
}

/// Formats a fraction as a percentage, e.g. `0.123` as "12,3 %".
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{} %", format_number(value * 100.0, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_uses_decimal_comma() {
        assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1.000");
        assert_eq!(format_number(-12500.5, 1), "-12.500,5");
        assert_eq!(format_number(-0.0001, 2), "0,00");
    }

    #[test]
    fn currency_and_percent() {
        assert_eq!(format_currency(25000.0, 0, "EUR"), "25.000 €");
        assert_eq!(format_currency(-1.5, 2, "USD"), "-1,50 $");
        assert_eq!(format_percent(0.1307, 1), "13,1 %");
        assert_eq!(format_percent(f64::NAN, 1), "n/a");
    }
}
