use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::parsers::CurrencyFormatter;

/// Settings file looked up in the working directory (extension optional).
pub const CONFIG_FILE: &str = "carju";
pub const ENV_PREFIX: &str = "CARJU";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet: SheetConfig,
    pub site: SiteConfig,
    pub contact: ContactConfig,
    pub slider: SliderConfig,
    pub grid: GridConfig,
    pub http: HttpConfig,
    pub currency: CurrencyConfig,
    pub sections: PageSections,
    pub default_language: LanguageDefault,
}

/// Public spreadsheet proxy, one URL per named table: `{base_url}/{id}/{table}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub base_url: String,
    /// Empty disables the remote tier.
    pub id: String,
    pub catalog_table: String,
    pub delivery_table: String,
    pub fees_table: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensheet.elk.sh".to_string(),
            id: String::new(),
            catalog_table: "Cars".to_string(),
            delivery_table: "Deliveries".to_string(),
            fees_table: "Fees".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub base_url: String,
    /// Local JSON document, relative to `base_url`.
    pub local_data_path: String,
    pub output_path: String,
    pub preferences_db: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "CARJU Auto".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            local_data_path: "data.json".to_string(),
            output_path: "index.html".to_string(),
            preferences_db: "carju_site.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub whatsapp: String,
    pub tiktok: String,
    pub email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp: "+81 80 4790 9663".to_string(),
            tiktok: "https://www.tiktok.com/@carju-auto".to_string(),
            email: "sales@carju-auto.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub interval_ms: u64,
    pub exit_delay_ms: u64,
    pub enter_duration_ms: u64,
    pub swipe_threshold_px: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            interval_ms: 6000,
            exit_delay_ms: 200,
            enter_duration_ms: 520,
            swipe_threshold_px: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub card_count: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { card_count: 6 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 25,
            max_retries: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
        }
    }
}

impl CurrencyConfig {
    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(self.symbol.clone())
    }
}

/// Which mount points the page has. A disabled section is simply left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSections {
    pub cars_slider: bool,
    pub deliveries_slider: bool,
    pub catalog_grid: bool,
    pub fees_table: bool,
    pub promo_banner: bool,
    pub callback_form: bool,
}

impl Default for PageSections {
    fn default() -> Self {
        Self {
            cars_slider: true,
            deliveries_slider: true,
            catalog_grid: true,
            fees_table: true,
            promo_banner: true,
            callback_form: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageDefault(pub String);

impl Default for LanguageDefault {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl Config {
    /// Defaults, then `carju.{toml,json,yaml}` if present, then `CARJU_*` variables
    /// (nested keys joined by `__`, e.g. `CARJU_SHEET__ID`).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    pub fn local_data_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.site.base_url)?.join(&self.site.local_data_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.slider.interval_ms, 6000);
        assert_eq!(config.grid.card_count, 6);
        assert_eq!(config.default_language.0, "en");
        assert!(config.sheet.id.is_empty());
        assert_eq!(
            config.local_data_url().unwrap().as_str(),
            "http://localhost:8080/data.json"
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"sheet": {"id": "abc"}, "grid": {}}"#).unwrap();
        assert_eq!(config.sheet.id, "abc");
        assert_eq!(config.sheet.catalog_table, "Cars");
        assert_eq!(config.grid.card_count, 6);
    }
}
