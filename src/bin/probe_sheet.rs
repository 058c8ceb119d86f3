use anyhow::Result;
use serde_json::Value;

use carju_site::config::Config;
use carju_site::loader::SheetTier;
use carju_site::utils::http::{create_client, fetch_rows};

#[tokio::main]
async fn main() -> Result<()> {
    let config = std::sync::Arc::new(Config::load()?);
    if config.sheet.id.trim().is_empty() {
        println!("No sheet id configured (set CARJU_SHEET__ID)");
        return Ok(());
    }

    let client = create_client(&config.http)?;
    let tier = SheetTier::new(config.clone());

    for table in [
        &config.sheet.catalog_table,
        &config.sheet.delivery_table,
        &config.sheet.fees_table,
    ] {
        let url = tier.table_url(table);
        println!("\nFetching {} ({})...", table, url);

        let rows = match fetch_rows(&client, &url, config.http.max_retries).await {
            Ok(rows) => rows,
            Err(e) => {
                println!("  failed: {}", e);
                continue;
            }
        };
        println!("  {} rows", rows.len());

        match rows.first() {
            Some(Value::Object(first)) => {
                let columns: Vec<&str> = first.keys().map(String::as_str).collect();
                println!("  columns: {}", columns.join(", "));
            }
            Some(other) => println!("  first row is not an object: {}", other),
            None => println!("  table is empty"),
        }
    }

    Ok(())
}
