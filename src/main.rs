use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::sync::Arc;
use tracing::{info, warn};

use carju_site::chrome::{load_state, LanguageCode};
use carju_site::config::Config;
use carju_site::loader::ContentLoader;
use carju_site::page::{render_page, PageContext};
use carju_site::storage::{PreferenceStore, SessionMarker, SqlitePreferences};
use carju_site::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carju_site=info".parse()?),
        )
        .init();

    info!("Starting CARJU site build");

    // Load configuration
    let config = Arc::new(Config::load()?);

    // Language preference
    let preferences = SqlitePreferences::new(&config.site.preferences_db).await?;
    preferences.migrate().await?;
    let default_lang = LanguageCode::parse(&config.default_language.0).unwrap_or_else(|| {
        warn!("Invalid default language {:?}, using en", config.default_language.0);
        LanguageCode::default()
    });
    let state = load_state(&preferences, &default_lang).await;
    info!("Rendering in language {}", state.lang);

    // Load content; this resolves only once a tier has produced a bundle
    let client = utils::http::create_client(&config.http)?;
    let loader = ContentLoader::new(config.clone(), client);
    let bundle = loader.load().await;

    let ctx = PageContext {
        config: &config,
        state: &state,
        year: Local::now().year(),
    };
    let mut session = SessionMarker::new();
    let html = render_page(&bundle, &ctx, &mut session, &mut rand::thread_rng());

    tokio::fs::write(&config.site.output_path, html)
        .await
        .with_context(|| format!("Failed to write {}", config.site.output_path))?;

    info!(
        "Wrote {} from {} tier at {}",
        config.site.output_path,
        bundle.tier,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
