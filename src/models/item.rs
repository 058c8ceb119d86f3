use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which fallback tier produced a [`ContentBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    RemoteSheet,
    LocalJson,
    Embedded,
}

impl Tier {
    pub fn key(&self) -> &'static str {
        match self {
            Tier::RemoteSheet => "remote_sheet",
            Tier::LocalJson => "local_json",
            Tier::Embedded => "embedded",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A displayable vehicle record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    /// Resolved display URL, never the raw cell.
    pub image_source: String,
    pub image_candidates: Vec<String>,
    pub market_price_raw: Option<String>,
    pub market_price: Option<f64>,
    /// Equality-only filter keys.
    pub brand_key: String,
    pub category_key: String,
}

impl CatalogItem {
    /// Card/alt title: name, else "brand category", else a generic label.
    pub fn title(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let joined = [self.brand.as_deref(), self.category.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if joined.trim().is_empty() {
            "Vehicle".to_string()
        } else {
            joined
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub caption: Option<String>,
    pub image_source: String,
    pub image_candidates: Vec<String>,
}

/// One fee table row. Columns are whatever the source currently has, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRow(pub Map<String, Value>);

impl FeeRow {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Display text of a cell; missing and null cells are empty.
    pub fn cell_text(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactChannels {
    pub whatsapp: Option<String>,
    pub tiktok: Option<String>,
}

impl ContactChannels {
    /// Digits of the WhatsApp number, as used by wa.me links.
    pub fn whatsapp_digits(&self) -> Option<String> {
        let digits: String = self
            .whatsapp
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            None
        } else {
            Some(digits)
        }
    }
}

/// Result of one load cycle. Immutable once built; components borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub tier: Tier,
    pub contact: ContactChannels,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub catalog_items: Vec<CatalogItem>,
    pub delivery_items: Vec<DeliveryItem>,
    pub fee_rows: Vec<FeeRow>,
}
