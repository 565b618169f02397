use anyhow::Result;
use tempfile::NamedTempFile;
use weir::{config::Settings, db, services::AppServices};

pub fn sqlite_settings(file: &NamedTempFile) -> Settings {
    let mut settings = Settings::default();
    settings.database.url = "sqlite://".to_string() + file.path().to_str().unwrap();
    settings.logs.file_enabled = false;
    settings
}

pub async fn init_services(settings: &Settings) -> Result<AppServices> {
    let services = AppServices::new(settings).await?;
    db::migrations::up(&services.db).await?;
    Ok(services)
}
