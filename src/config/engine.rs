use serde::{Deserialize, Serialize};

/// Where to find the compiled sync engine and how long to wait for it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_binary_path")]
    pub binary_path: String,

    /// Deadline for one engine invocation; the child is killed on expiry
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_binary_path() -> String {
    "datasync".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
