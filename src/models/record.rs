//! Input record shapes, one per source tier.
//!
//! Spreadsheet rows use capitalised headers, the JSON file and the embedded
//! defaults use lowercase config keys. Each record picks its fields from a
//! fixed key list, lowercase first, so the normalizer never probes keys and a
//! row carrying both casings still resolves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Read any scalar cell as text. Null, empty strings, arrays and objects become `None`.
pub fn de_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| cell_to_string(&v)))
}

fn cell_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read a list of labels, skipping anything that is not a usable scalar.
pub fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(cell_to_string)
            .map(|s| s.trim().to_string())
            .collect(),
        _ => Vec::new(),
    })
}

/// Read a list of raw values. Anything other than an array becomes an empty list.
pub fn de_value_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}

fn de_galleries<'de, D>(deserializer: D) -> Result<Option<Galleries>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Decode each row on its own; a malformed row becomes an empty record.
pub fn rows_from_values<T>(values: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned + Default,
{
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                debug!("Defaulting malformed row: {}", e);
                T::default()
            })
        })
        .collect()
}

/// A row object kept as-is. Record fields are picked from it by key list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CellRow(Map<String, Value>);

impl CellRow {
    /// First usable cell among `keys`, tried in order. Blank cells fall through.
    pub fn pick(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(cell_to_string))
    }
}

// Lowercase key first, then the capitalised header, then older aliases.
const NAME_KEYS: &[&str] = &["name", "Name"];
const BRAND_KEYS: &[&str] = &["brand", "Brand"];
const CATEGORY_KEYS: &[&str] = &["category", "Category"];
const YEAR_KEYS: &[&str] = &["year", "Year"];
const SHEET_IMAGE_KEYS: &[&str] = &["imageUrl", "ImageURL", "image", "Image", "src"];
const SHEET_PRICE_KEYS: &[&str] = &["marketPrice", "MarketPrice", "price", "Price"];
const SHEET_CAPTION_KEYS: &[&str] = &["caption", "Caption", "name", "Name"];
const CONFIG_IMAGE_KEYS: &[&str] = &["src", "image", "Image", "imageUrl", "ImageURL"];
const CONFIG_PRICE_KEYS: &[&str] = &["price", "Price", "marketPrice", "MarketPrice"];
const CONFIG_CAPTION_KEYS: &[&str] = &["name", "Name", "caption", "Caption"];

/// A catalog row from the spreadsheet (`Name`, `Brand`, `ImageURL`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CellRow")]
pub struct SheetCarRow {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub image_url: Option<String>,
    pub market_price: Option<String>,
}

impl From<CellRow> for SheetCarRow {
    fn from(row: CellRow) -> Self {
        Self {
            name: row.pick(NAME_KEYS),
            brand: row.pick(BRAND_KEYS),
            category: row.pick(CATEGORY_KEYS),
            year: row.pick(YEAR_KEYS),
            image_url: row.pick(SHEET_IMAGE_KEYS),
            market_price: row.pick(SHEET_PRICE_KEYS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CellRow")]
pub struct SheetDeliveryRow {
    pub caption: Option<String>,
    pub image_url: Option<String>,
}

impl From<CellRow> for SheetDeliveryRow {
    fn from(row: CellRow) -> Self {
        Self {
            caption: row.pick(SHEET_CAPTION_KEYS),
            image_url: row.pick(SHEET_IMAGE_KEYS),
        }
    }
}

/// A car entry from the JSON file or the embedded defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CellRow")]
pub struct ConfigCar {
    pub src: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub price: Option<String>,
}

impl From<CellRow> for ConfigCar {
    fn from(row: CellRow) -> Self {
        Self {
            src: row.pick(CONFIG_IMAGE_KEYS),
            name: row.pick(NAME_KEYS),
            brand: row.pick(BRAND_KEYS),
            category: row.pick(CATEGORY_KEYS),
            year: row.pick(YEAR_KEYS),
            price: row.pick(CONFIG_PRICE_KEYS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CellRow")]
pub struct ConfigDelivery {
    pub src: Option<String>,
    pub caption: Option<String>,
}

impl From<CellRow> for ConfigDelivery {
    fn from(row: CellRow) -> Self {
        Self {
            src: row.pick(CONFIG_IMAGE_KEYS),
            caption: row.pick(CONFIG_CAPTION_KEYS),
        }
    }
}

/// A raw car record tagged with the tier it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCar {
    Sheet(SheetCarRow),
    Local(ConfigCar),
    Embedded(ConfigCar),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDelivery {
    Sheet(SheetDeliveryRow),
    Local(ConfigDelivery),
    Embedded(ConfigDelivery),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Galleries {
    #[serde(deserialize_with = "de_value_list")]
    pub cars: Vec<Value>,
    #[serde(deserialize_with = "de_value_list")]
    pub deliveries: Vec<Value>,
}

/// The local JSON document served next to the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocalDocument {
    #[serde(rename = "WHATSAPP", deserialize_with = "de_cell")]
    pub whatsapp: Option<String>,
    #[serde(rename = "TIKTOK", deserialize_with = "de_cell")]
    pub tiktok: Option<String>,
    #[serde(rename = "BRANDS", deserialize_with = "de_string_list")]
    pub brands: Vec<String>,
    #[serde(rename = "CATEGORIES", deserialize_with = "de_string_list")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "de_value_list")]
    pub cars: Vec<Value>,
    #[serde(deserialize_with = "de_value_list")]
    pub deliveries: Vec<Value>,
    #[serde(rename = "FEES", deserialize_with = "de_value_list")]
    pub fees: Vec<Value>,
    /// Older documents nest the item lists under `GALLERIES`.
    #[serde(rename = "GALLERIES", deserialize_with = "de_galleries")]
    pub galleries: Option<Galleries>,
}

impl LocalDocument {
    pub fn car_values(&self) -> Vec<Value> {
        match &self.galleries {
            Some(g) if self.cars.is_empty() => g.cars.clone(),
            _ => self.cars.clone(),
        }
    }

    pub fn delivery_values(&self) -> Vec<Value> {
        match &self.galleries {
            Some(g) if self.deliveries.is_empty() => g.deliveries.clone(),
            _ => self.deliveries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sheet_row_accepts_both_casings() {
        let upper: SheetCarRow = serde_json::from_value(json!({
            "Name": "Land Cruiser", "Brand": "Toyota", "Year": 2024, "ImageURL": "x"
        }))
        .unwrap();
        let lower: SheetCarRow = serde_json::from_value(json!({
            "name": "Land Cruiser", "brand": "Toyota", "year": "2024", "image": "x"
        }))
        .unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_cells_tolerate_odd_values() {
        let row: SheetCarRow = serde_json::from_value(json!({
            "Name": "  ", "Brand": null, "Category": ["SUV"], "MarketPrice": 12000.5
        }))
        .unwrap();
        assert_eq!(row.name, None);
        assert_eq!(row.brand, None);
        assert_eq!(row.category, None);
        assert_eq!(row.market_price.as_deref(), Some("12000.5"));
    }

    #[test]
    fn test_malformed_rows_default() {
        let rows: Vec<SheetDeliveryRow> =
            rows_from_values(vec![json!("not a row"), json!({"Caption": "Kampala"})]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], SheetDeliveryRow::default());
        assert_eq!(rows[1].caption.as_deref(), Some("Kampala"));
    }

    #[test]
    fn test_local_document_reads_nested_galleries() {
        let doc: LocalDocument = serde_json::from_value(json!({
            "WHATSAPP": "+81 80",
            "BRANDS": ["Toyota", 7, null],
            "GALLERIES": {"cars": [{"src": "a"}], "deliveries": []}
        }))
        .unwrap();
        assert_eq!(doc.brands, vec!["Toyota", "7"]);
        assert_eq!(doc.car_values().len(), 1);
        assert!(doc.delivery_values().is_empty());
    }

    #[test]
    fn test_rows_with_both_casings_resolve_in_order() {
        let rows: Vec<SheetCarRow> = rows_from_values(vec![
            json!({
                "brand": "Toyota", "Brand": "Honda", "Name": "Harrier",
                "ImageURL": "https://example.com/h.jpg"
            }),
            json!({
                "Name": "Harrier", "ImageURL": "https://example.com/h.jpg", "Image": "",
                "MarketPrice": "$1", "Price": ""
            }),
        ]);
        assert_eq!(rows[0].brand.as_deref(), Some("Toyota"));
        assert_eq!(rows[0].name.as_deref(), Some("Harrier"));
        assert_eq!(rows[0].image_url.as_deref(), Some("https://example.com/h.jpg"));
        assert_eq!(rows[1].image_url.as_deref(), Some("https://example.com/h.jpg"));
        assert_eq!(rows[1].market_price.as_deref(), Some("$1"));

        let cars: Vec<ConfigCar> = rows_from_values(vec![json!({
            "src": " ", "image": "https://example.com/a.jpg", "name": "CX-5", "Name": "Other"
        })]);
        assert_eq!(cars[0].src.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(cars[0].name.as_deref(), Some("CX-5"));
    }

    #[test]
    fn test_local_document_tolerates_odd_lists() {
        let doc: LocalDocument = serde_json::from_value(json!({
            "WHATSAPP": "+81",
            "cars": [{"src": "https://e.com/a.jpg"}],
            "deliveries": {"src": "not a list"},
            "FEES": null,
            "GALLERIES": "gone"
        }))
        .unwrap();
        assert_eq!(doc.car_values().len(), 1);
        assert!(doc.delivery_values().is_empty());
        assert!(doc.fees.is_empty());
        assert!(doc.galleries.is_none());
    }
}
