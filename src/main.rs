use weir::{api, config::Settings, utils};

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Failed to load configuration");

    utils::logger::init_logging(&settings.logs);

    if let Err(e) = api::serve(settings).await {
        tracing::error!("Control plane exited with error: {:#}", e);
        std::process::exit(1);
    }
}
