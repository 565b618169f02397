use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::config::{DatabaseConfig, EngineConfig, LogConfig, ServerConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn get_env_file_name() -> String {
    if let Ok(weir_env) = std::env::var("WEIR_ENV_FILE") {
        return weir_env;
    }
    if let Ok(weir_env) = std::env::var("WEIR_ENV") {
        match weir_env.as_str().to_lowercase().as_str() {
            "dev" => return ".env.dev".to_string(),
            "test" => return ".env.test".to_string(),
            "prod" => return ".env".to_string(),
            _ => return ".env".to_string(),
        }
    }
    ".env".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file using `WEIR_ENV` env var
        dotenvy::from_filename(get_env_file_name()).ok();

        let settings = Config::builder()
            // Environment variables use the WEIR prefix with `__` separating
            // nested struct fields, e.g. WEIR__DATABASE__URL
            .add_source(
                Environment::with_prefix("WEIR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;

        Ok(settings)
    }

    pub fn print_config(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize settings: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    #[serial]
    fn test_env_file_var_set() {
        unsafe {
            env::set_var("WEIR_ENV_FILE", ".env.override");
        }
        assert_eq!(get_env_file_name(), ".env.override");
        unsafe {
            env::remove_var("WEIR_ENV_FILE");
        }
    }

    #[test]
    #[serial]
    fn test_weir_env_selects_file() {
        for (value, expected) in [
            ("dev", ".env.dev"),
            ("test", ".env.test"),
            ("prod", ".env"),
            ("staging", ".env"),
        ] {
            unsafe {
                env::set_var("WEIR_ENV", value);
            }
            assert_eq!(get_env_file_name(), expected);
        }
        unsafe {
            env::remove_var("WEIR_ENV");
        }
    }

    #[test]
    #[serial]
    fn test_no_env_set() {
        unsafe {
            env::remove_var("WEIR_ENV_FILE");
            env::remove_var("WEIR_ENV");
        }
        assert_eq!(get_env_file_name(), ".env");
    }

    #[test]
    #[serial]
    fn test_settings_from_env_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "WEIR__DATABASE__URL=sqlite::memory:").unwrap();
        writeln!(temp_file, "WEIR__SERVER__PORT=9191").unwrap();
        writeln!(temp_file, "WEIR__SERVER__ENVIRONMENT=production").unwrap();
        writeln!(temp_file, "WEIR__ENGINE__TIMEOUT_SECS=5").unwrap();

        unsafe {
            env::set_var("WEIR_ENV_FILE", temp_file.path());
        }

        let settings = Settings::new().unwrap();

        unsafe {
            env::remove_var("WEIR_ENV_FILE");
            env::remove_var("WEIR__DATABASE__URL");
            env::remove_var("WEIR__SERVER__PORT");
            env::remove_var("WEIR__SERVER__ENVIRONMENT");
            env::remove_var("WEIR__ENGINE__TIMEOUT_SECS");
        }

        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.database.schema, "metadata");
        assert_eq!(settings.server.port, 9191);
        assert!(settings.server.is_production());
        assert_eq!(settings.engine.timeout_secs, 5);
        assert_eq!(settings.engine.binary_path, "datasync");
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        unsafe {
            env::remove_var("WEIR_ENV_FILE");
            env::remove_var("WEIR_ENV");
        }

        let settings = Settings::default();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert!(settings.server.allowed_origins.is_none());
        assert_eq!(settings.database.schema, "metadata");
        assert_eq!(settings.engine.timeout_secs, 30);
    }
}
