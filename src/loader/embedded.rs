use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::local::bundle_from_document;
use super::ContentTier;
use crate::error::LoadResult;
use crate::models::{ContentBundle, LocalDocument, Tier, DEFAULT_BRANDS, DEFAULT_CATEGORIES};

pub const EMBEDDED_WHATSAPP: &str = "+81 80 4790 9663";
pub const EMBEDDED_TIKTOK: &str = "https://www.tiktok.com/@carju-auto";

/// Built-in content with the same shape as the local JSON document.
pub fn embedded_document() -> LocalDocument {
    LocalDocument {
        whatsapp: Some(EMBEDDED_WHATSAPP.to_string()),
        tiktok: Some(EMBEDDED_TIKTOK.to_string()),
        brands: DEFAULT_BRANDS.iter().map(|s| s.to_string()).collect(),
        categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        cars: vec![
            json!({
                "src": "https://drive.google.com/uc?export=view&id=1Seq0srl3-KYkD5MqETVoUXAL7_SiHKSu",
                "name": "Toyota Land Cruiser",
                "brand": "Toyota",
                "category": "SUV",
                "year": 2024
            }),
            json!({
                "src": "https://drive.google.com/uc?export=view&id=1wbt8GNQUVV-iq8PEbsqL4PKOHEDr7XLo",
                "name": "Toyota Land Cruiser",
                "brand": "Toyota",
                "category": "SUV",
                "year": 2018
            }),
            json!({
                "src": "https://drive.google.com/uc?export=view&id=1_loCpFmT7jIUcUfCD5SnStzVHdWmQVXi/view",
                "name": "Toyota Harrier",
                "brand": "Toyota",
                "category": "SUV",
                "year": 2018
            }),
        ],
        deliveries: Vec::new(),
        fees: Vec::new(),
        galleries: None,
    }
}

pub fn embedded_bundle() -> ContentBundle {
    bundle_from_document(embedded_document(), Tier::Embedded)
}

/// Last tier of the chain. Always succeeds.
pub struct EmbeddedTier;

#[async_trait]
impl ContentTier for EmbeddedTier {
    fn tier(&self) -> Tier {
        Tier::Embedded
    }

    async fn load(&self, _client: &Client) -> LoadResult<ContentBundle> {
        Ok(embedded_bundle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_bundle() {
        let bundle = embedded_bundle();
        assert_eq!(bundle.tier, Tier::Embedded);
        assert_eq!(bundle.catalog_items.len(), 3);
        assert_eq!(bundle.brands.len(), DEFAULT_BRANDS.len());
        assert_eq!(bundle.categories.len(), DEFAULT_CATEGORIES.len());
        assert!(bundle.fee_rows.is_empty());
        assert!(bundle
            .catalog_items
            .iter()
            .all(|item| item.image_candidates.len() == 3));
        assert_eq!(bundle.contact.whatsapp.as_deref(), Some(EMBEDDED_WHATSAPP));
    }
}
