use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use super::{assemble, ContentTier, TierContent};
use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::models::{
    rows_from_values, ConfigCar, ConfigDelivery, ContactChannels, ContentBundle, LocalDocument,
    RawCar, RawDelivery, Tier,
};
use crate::utils::http::fetch_json;

/// JSON document served next to the site (`data.json` by default).
pub struct LocalJsonTier {
    config: Arc<Config>,
}

impl LocalJsonTier {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ContentTier for LocalJsonTier {
    fn tier(&self) -> Tier {
        Tier::LocalJson
    }

    async fn load(&self, client: &Client) -> LoadResult<ContentBundle> {
        let url = self.config.local_data_url()?;
        info!("Fetching local content document {}", url);

        let value = fetch_json(client, url.as_str(), self.config.http.max_retries).await?;
        let document: LocalDocument =
            serde_json::from_value(value).map_err(|source| LoadError::Decode {
                url: url.to_string(),
                source,
            })?;

        Ok(bundle_from_document(document, Tier::LocalJson))
    }
}

pub(crate) fn bundle_from_document(document: LocalDocument, tier: Tier) -> ContentBundle {
    let cars = rows_from_values::<ConfigCar>(document.car_values());
    let deliveries = rows_from_values::<ConfigDelivery>(document.delivery_values());
    let tag_car = |car| match tier {
        Tier::Embedded => RawCar::Embedded(car),
        _ => RawCar::Local(car),
    };
    let tag_delivery = |delivery| match tier {
        Tier::Embedded => RawDelivery::Embedded(delivery),
        _ => RawDelivery::Local(delivery),
    };

    assemble(TierContent {
        tier,
        contact: ContactChannels {
            whatsapp: document.whatsapp,
            tiktok: document.tiktok,
        },
        brands: document.brands,
        categories: document.categories,
        cars: cars.into_iter().map(tag_car).collect(),
        deliveries: deliveries.into_iter().map(tag_delivery).collect(),
        fees: document.fees,
    })
}
