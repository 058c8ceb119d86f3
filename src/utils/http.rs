use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::HttpConfig;
use crate::error::{LoadError, LoadResult};

pub fn create_client(config: &HttpConfig) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(6)
        .build()
}

pub async fn fetch_with_retry(client: &Client, url: &str, max_retries: u32) -> LoadResult<Response> {
    let max_retries = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match client.get(url).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    return Ok(response);
                }
                let status = response.status();
                warn!("HTTP error {}: {}", status, url);
                last_error = Some(LoadError::Http {
                    url: url.to_string(),
                    status,
                });
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                last_error = Some(e.into());
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = Duration::from_secs(2u64.pow(attempts));
            warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_retries);
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| LoadError::RetriesExhausted(url.to_string())))
}

/// GET a JSON document. Decoding failures are reported with the URL attached.
pub async fn fetch_json(client: &Client, url: &str, max_retries: u32) -> LoadResult<Value> {
    let response = fetch_with_retry(client, url, max_retries).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| LoadError::Decode {
        url: url.to_string(),
        source,
    })
}

/// GET a JSON array of row objects. Anything other than an array is a decode failure.
pub async fn fetch_rows(client: &Client, url: &str, max_retries: u32) -> LoadResult<Vec<Value>> {
    match fetch_json(client, url, max_retries).await? {
        Value::Array(rows) => Ok(rows),
        other => Err(LoadError::Decode {
            url: url.to_string(),
            source: serde::de::Error::custom(format!(
                "expected an array of rows, got {}",
                json_kind(&other)
            )),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
