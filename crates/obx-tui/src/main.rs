mod app;
mod keymap;
mod scan;
mod screens;
mod theme;

use obx_core::catalog;
use obx_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_default();

    let data_dir = config.paths.data_dir.clone();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("obx.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("obx log: {}", log_path.display());

    tracing::info!("obx starting…");

    let catalog = catalog::load_catalog(&config.paths.channels_toml);
    catalog.validate()?;

    app::App::new(config, catalog).run().await
}
