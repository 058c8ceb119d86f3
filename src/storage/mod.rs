use async_trait::async_trait;
use anyhow::Result;

mod session;
mod sqlite;
pub use session::SessionMarker;
pub use sqlite::SqlitePreferences;

/// Key under which the chosen language is kept.
pub const LANG_KEY: &str = "carju_lang";

/// Client-local key/value preferences that survive between sessions.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn migrate(&self) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
