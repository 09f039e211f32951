pub mod camera;
mod demo;
pub mod metrics;
pub mod models;
pub mod overlay;
pub mod permission;
pub mod scanning;
pub mod settings;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::time::Duration;

use settings::{ScannerSettings, SettingsStore};

const SETTINGS_ENV_VAR: &str = "SCANFRAME_SETTINGS";
const DEMO_RUN_SECS: u64 = 5;

pub use demo::run_demo;

fn load_settings() -> Result<ScannerSettings> {
    let settings = match std::env::var_os(SETTINGS_ENV_VAR) {
        Some(path) => {
            let store = SettingsStore::new(PathBuf::from(path))?;
            store.scanner()
        }
        None => ScannerSettings::default(),
    };
    Ok(settings.with_env_overrides())
}

pub fn run() -> Result<()> {
    // RUST_LOG wins over the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("scanframe starting up...");

    let settings = load_settings()?;
    log::info!(
        "frame cap {} fps, scan area {}, formats {:?}",
        settings.frame_rate_cap,
        settings.scan_area_size,
        settings.detector.formats
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("scanframe")
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run_demo(settings, Duration::from_secs(DEMO_RUN_SECS)))
}
