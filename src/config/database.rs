use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// PostgreSQL schema holding all control-plane tables. Ignored for
    /// SQLite urls (used by the test suite).
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            schema: default_schema(),
        }
    }
}

fn default_url() -> String {
    "postgres://localhost:5432/weir".to_string()
}

fn default_schema() -> String {
    "metadata".to_string()
}
