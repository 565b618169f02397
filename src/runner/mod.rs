use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use strum_macros::{Display, EnumString};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::errors::{Error, Result};

/// Mode flag the sync engine binary is invoked with. One invocation serves
/// exactly one mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EngineMode {
    Security,
    Catalog,
    Maintenance,
    Monitoring,
}

impl EngineMode {
    pub fn flag(&self) -> &'static str {
        match self {
            EngineMode::Security => "--security",
            EngineMode::Catalog => "--catalog",
            EngineMode::Maintenance => "--maintenance",
            EngineMode::Monitoring => "--monitoring",
        }
    }
}

/// RPC stub around the compiled sync engine. The wire contract: one JSON
/// request `{operation, ...}` on stdin, one JSON object on stdout with a
/// `success` flag and exit code 0, or diagnostics on stderr and a non-zero
/// exit. Every invocation runs under a deadline; on expiry the child is
/// killed rather than leaving the HTTP request hanging.
pub struct EngineRunner {
    binary_path: String,
    timeout: Duration,
}

impl EngineRunner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            binary_path: config.binary_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub async fn run(&self, mode: EngineMode, request: &Value) -> Result<Value> {
        let invocation = uuid::Uuid::new_v4();
        debug!("Invoking sync engine in {} mode (invocation {})", mode, invocation);

        let mut child = Command::new(&self.binary_path)
            .arg(mode.flag())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Upstream(format!("failed to spawn '{}': {}", self.binary_path, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Upstream("engine stdin was not captured".to_string()))?;

        let payload = serde_json::to_vec(request)
            .map_err(|e| Error::Upstream(format!("unserializable engine request: {}", e)))?;
        stdin
            .write_all(&payload)
            .await
            .map_err(|e| Error::Upstream(format!("failed to write engine request: {}", e)))?;
        // Closing stdin signals the engine to start working
        drop(stdin);

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| Error::Upstream(format!("failed to await engine exit: {}", e)))?,
            Err(_) => {
                // Dropping the in-flight future reaps the child via
                // kill_on_drop
                warn!(
                    "Sync engine exceeded its {}s deadline in {} mode (invocation {})",
                    self.timeout.as_secs(),
                    mode,
                    invocation
                );
                return Err(Error::UpstreamTimeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::Upstream(detail));
        }

        let reply: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::Upstream(format!("invalid engine reply: {}", e)))?;

        match reply.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(reply),
            Some(false) => Err(Error::Upstream(
                reply
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("engine reported failure without detail")
                    .to_string(),
            )),
            None => Err(Error::Upstream(
                "engine reply is missing the success field".to_string(),
            )),
        }
    }
}
