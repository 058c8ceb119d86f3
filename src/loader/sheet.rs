use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::{assemble, ContentTier, TierContent};
use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::models::{
    rows_from_values, ContactChannels, ContentBundle, RawCar, RawDelivery, SheetCarRow,
    SheetDeliveryRow, Tier,
};
use crate::utils::http::fetch_rows;

/// Remote spreadsheet tier. The catalog table is mandatory; the other two degrade to empty.
pub struct SheetTier {
    config: Arc<Config>,
}

impl SheetTier {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.sheet.base_url.trim_end_matches('/'),
            utf8_percent_encode(self.config.sheet.id.trim(), NON_ALPHANUMERIC),
            utf8_percent_encode(table, NON_ALPHANUMERIC)
        )
    }
}

#[async_trait]
impl ContentTier for SheetTier {
    fn tier(&self) -> Tier {
        Tier::RemoteSheet
    }

    async fn load(&self, client: &Client) -> LoadResult<ContentBundle> {
        let sheet = &self.config.sheet;
        if sheet.id.trim().is_empty() {
            return Err(LoadError::NotConfigured("sheet id"));
        }

        let retries = self.config.http.max_retries;
        let catalog_url = self.table_url(&sheet.catalog_table);
        let delivery_url = self.table_url(&sheet.delivery_table);
        let fees_url = self.table_url(&sheet.fees_table);
        info!("Fetching sheet tables from {}", sheet.base_url);

        let (cars, deliveries, fees) = futures::join!(
            fetch_rows(client, &catalog_url, retries),
            fetch_rows(client, &delivery_url, retries),
            fetch_rows(client, &fees_url, retries),
        );

        let cars = cars?;
        let deliveries = optional_table(&sheet.delivery_table, deliveries);
        let fees = optional_table(&sheet.fees_table, fees);

        let contact = &self.config.contact;
        Ok(assemble(TierContent {
            tier: Tier::RemoteSheet,
            contact: ContactChannels {
                whatsapp: non_empty(&contact.whatsapp),
                tiktok: non_empty(&contact.tiktok),
            },
            brands: Vec::new(),
            categories: Vec::new(),
            cars: rows_from_values::<SheetCarRow>(cars)
                .into_iter()
                .map(RawCar::Sheet)
                .collect(),
            deliveries: rows_from_values::<SheetDeliveryRow>(deliveries)
                .into_iter()
                .map(RawDelivery::Sheet)
                .collect(),
            fees,
        }))
    }
}

fn optional_table(name: &str, result: LoadResult<Vec<Value>>) -> Vec<Value> {
    result.unwrap_or_else(|e| {
        warn!("Sheet table {} unavailable, continuing without it: {}", name, e);
        Vec::new()
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let mut config = Config::default();
        config.sheet.base_url = "https://opensheet.elk.sh/".into();
        config.sheet.id = "1AbC".into();
        let tier = SheetTier::new(Arc::new(config));
        assert_eq!(tier.table_url("Cars"), "https://opensheet.elk.sh/1AbC/Cars");
        assert_eq!(tier.table_url("Fee List"), "https://opensheet.elk.sh/1AbC/Fee%20List");
    }

    #[tokio::test]
    async fn test_unconfigured_sheet_fails_fast() {
        let tier = SheetTier::new(Arc::new(Config::default()));
        let result = tier.load(&Client::new()).await;
        assert!(matches!(result, Err(LoadError::NotConfigured(_))));
    }
}
