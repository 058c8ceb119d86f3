use once_cell::sync::Lazy;
use regex::Regex;

static NON_NUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("Invalid non-numeric regex"));

/// Best-effort numeric value of a price cell such as "$12,500" or "¥ 1,200,000".
pub fn parse_price(price_text: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC_REGEX.replace_all(price_text, "");
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Whole parts at or above this no longer fit a `u64`.
const MAX_EXACT_WHOLE: f64 = 18_446_744_073_709_551_616.0;

/// Formats numeric prices for display with a currency symbol and thousands separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, value: f64) -> String {
        let negative = value < 0.0;
        let abs = value.abs();
        let rounded = if abs < MAX_EXACT_WHOLE {
            (abs * 100.0).round() / 100.0
        } else {
            abs
        };
        let whole = if rounded < MAX_EXACT_WHOLE {
            (rounded.trunc() as u64).to_string()
        } else {
            format!("{:.0}", rounded.trunc())
        };
        let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

        let mut formatted = group_thousands(&whole);
        if cents > 0 {
            formatted = format!("{}.{:02}", formatted, cents);
        }

        if negative {
            format!("-{}{}", self.symbol, formatted)
        } else {
            format!("{}{}", self.symbol, formatted)
        }
    }

    /// Format a raw cell if it holds a price, otherwise hand the text back untouched.
    pub fn format_cell(&self, text: &str) -> String {
        if !text.chars().any(|c| c.is_ascii_digit()) {
            return text.to_string();
        }
        match parse_price(text) {
            Some(value) if value.abs() < MAX_EXACT_WHOLE => self.format(value),
            _ => text.to_string(),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$12,500"), Some(12500.0));
        assert_eq!(parse_price("USD 8,999.50"), Some(8999.5));
        assert_eq!(parse_price("-300"), Some(-300.0));
        assert_eq!(parse_price("ask us"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("1.2.3"), None);
        assert_eq!(parse_price("--"), None);
    }

    #[test]
    fn test_format() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format(0.0), "$0");
        assert_eq!(fmt.format(950.0), "$950");
        assert_eq!(fmt.format(12500.0), "$12,500");
        assert_eq!(fmt.format(1234567.5), "$1,234,567.50");
        assert_eq!(fmt.format(-300.0), "-$300");
        assert_eq!(CurrencyFormatter::new("¥").format(1200000.0), "¥1,200,000");
    }

    #[test]
    fn test_format_cell() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format_cell("1500"), "$1,500");
        assert_eq!(fmt.format_cell("On request"), "On request");
        assert_eq!(fmt.format_cell(""), "");
    }

    #[test]
    fn test_oversized_values_do_not_saturate() {
        let fmt = CurrencyFormatter::default();
        let huge = "100000000000000000000000";
        assert_eq!(fmt.format_cell(huge), huge);
        let formatted = fmt.format(1e23);
        assert!(!formatted.contains("18,446,744,073,709,551,615"));
        assert!(formatted.starts_with("$99,999,999,999,999,991,611,392"));
    }
}
