//! Layered content loading: remote sheet, then local JSON, then embedded defaults.
//!
//! The first tier that succeeds supplies the whole bundle. Nothing from a
//! failed tier is ever merged into the result.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::LoadResult;
use crate::models::{
    CatalogItem, ContactChannels, ContentBundle, FeeRow, RawCar, RawDelivery, Tier,
    DEFAULT_BRANDS, DEFAULT_CATEGORIES,
};
use crate::normalizer::{normalize_car, normalize_delivery};
use crate::parsers::{clean_text, match_key};

mod embedded;
mod local;
mod sheet;

pub use embedded::{embedded_bundle, EmbeddedTier};
pub use local::LocalJsonTier;
pub use sheet::SheetTier;

#[async_trait]
pub trait ContentTier: Send + Sync {
    fn tier(&self) -> Tier;
    async fn load(&self, client: &Client) -> LoadResult<ContentBundle>;
}

pub struct ContentLoader {
    client: Client,
    tiers: Vec<Box<dyn ContentTier>>,
}

impl ContentLoader {
    /// The standard chain for a configured site.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self::with_tiers(
            client,
            vec![
                Box::new(SheetTier::new(config.clone())),
                Box::new(LocalJsonTier::new(config)),
                Box::new(EmbeddedTier),
            ],
        )
    }

    pub fn with_tiers(client: Client, tiers: Vec<Box<dyn ContentTier>>) -> Self {
        Self { client, tiers }
    }

    /// Resolves once a tier has produced a bundle. Never fails.
    pub async fn load(&self) -> ContentBundle {
        for tier in &self.tiers {
            match tier.load(&self.client).await {
                Ok(bundle) => {
                    info!(
                        "Loaded content from {} tier: {} cars, {} deliveries, {} fee rows",
                        tier.tier(),
                        bundle.catalog_items.len(),
                        bundle.delivery_items.len(),
                        bundle.fee_rows.len()
                    );
                    return bundle;
                }
                Err(e) => warn!("Content tier {} failed: {}", tier.tier(), e),
            }
        }

        warn!("Every content tier failed, using embedded defaults");
        embedded_bundle()
    }
}

/// Everything a tier hands over before normalization.
pub(crate) struct TierContent {
    pub tier: Tier,
    pub contact: ContactChannels,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub cars: Vec<RawCar>,
    pub deliveries: Vec<RawDelivery>,
    pub fees: Vec<Value>,
}

/// Normalize a tier's records and build the bundle.
///
/// Items without a resolved image are dropped here. Brand and category lists
/// are the defaults, then the tier's own list, then values seen on kept items.
pub(crate) fn assemble(content: TierContent) -> ContentBundle {
    let catalog_items: Vec<CatalogItem> = content
        .cars
        .iter()
        .map(normalize_car)
        .filter(|item| !item.image_source.is_empty())
        .collect();

    let delivery_items = content
        .deliveries
        .iter()
        .map(normalize_delivery)
        .filter(|item| !item.image_source.is_empty())
        .collect();

    let observed_brands: Vec<&str> = catalog_items.iter().filter_map(|i| i.brand.as_deref()).collect();
    let observed_categories: Vec<&str> = catalog_items
        .iter()
        .filter_map(|i| i.category.as_deref())
        .collect();

    let brands = merge_labels(
        DEFAULT_BRANDS,
        content.brands.iter().map(String::as_str).chain(observed_brands),
    );
    let categories = merge_labels(
        DEFAULT_CATEGORIES,
        content
            .categories
            .iter()
            .map(String::as_str)
            .chain(observed_categories),
    );

    ContentBundle {
        tier: content.tier,
        contact: content.contact,
        brands,
        categories,
        catalog_items,
        delivery_items,
        fee_rows: fee_rows_from_values(content.fees),
    }
}

/// Defaults first, then new labels in discovery order. Duplicates compare by match key.
pub fn merge_labels<'a>(defaults: &[&'a str], discovered: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for label in defaults.iter().copied().chain(discovered) {
        let label = clean_text(label);
        if label.is_empty() {
            continue;
        }
        if seen.insert(match_key(&label)) {
            merged.push(label);
        }
    }

    merged
}

/// Keep object rows only; their column order is preserved.
pub fn fee_rows_from_values(values: Vec<Value>) -> Vec<FeeRow> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) if !map.is_empty() => Some(FeeRow(map)),
            _ => None,
        })
        .collect()
}
