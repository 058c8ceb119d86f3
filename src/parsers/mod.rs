pub mod image;
pub mod price;

pub use image::*;
pub use price::*;

/// Trim and collapse internal whitespace runs to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Equality key used by the grid filters. Never displayed.
pub fn match_key(text: &str) -> String {
    clean_text(text).to_lowercase()
}

/// Parse a year cell. Blank or non-numeric cells give `None`.
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(year) = text.parse::<i32>() {
        return Some(year);
    }

    // Spreadsheet proxies sometimes hand numbers back as "2024.0"
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => {
            if value >= i32::MIN as f64 && value <= i32::MAX as f64 {
                Some(value as i32)
            } else {
                None
            }
        }
        _ => None,
    }
}
