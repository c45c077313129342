use std::sync::Arc;

use anyhow::Context;
use app_launcher::config::SettingsManager;
use app_launcher::log_collector::{ensure_logs_dir_exists, get_global_logs_path};
use app_launcher::ui::threading::AsyncBridge;
use app_launcher::ui::{LauncherController, LauncherUI};
use app_launcher::LogCollector;

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // =========================================================================
    // LOGGING - MUST BE FIRST
    // =========================================================================
    let log_dir = get_global_logs_path().map_err(anyhow::Error::msg)?;
    ensure_logs_dir_exists(&log_dir).map_err(anyhow::Error::msg)?;
    let log_collector = Arc::new(
        LogCollector::new(log_dir)
            .map_err(anyhow::Error::msg)
            .context("LogCollector initialization failed")?,
    );

    if let Err(e) = log::set_boxed_logger(Box::new((*log_collector).clone()))
        .map(|()| log::set_max_level(log::LevelFilter::Info))
    {
        eprintln!("[Main] WARNING: Failed to register LogCollector as global logger: {}", e);
    }
    log::info!(
        "[Main] App Launcher {} logging to {}",
        app_launcher::VERSION,
        log_collector.session_log_path().display()
    );

    // =========================================================================
    // SETTINGS
    // =========================================================================
    let settings = SettingsManager::load().context("Failed to load launcher settings")?;
    if settings.debug_logging {
        log::set_max_level(log::LevelFilter::Debug);
        log::debug!("[Main] Debug logging enabled");
    }

    // =========================================================================
    // CONTROLLER AND CHANNELS
    // =========================================================================
    let (bridge, event_rx) = AsyncBridge::new(EVENT_CHANNEL_CAPACITY);
    let controller = LauncherController::new_production(settings, bridge, tokio::runtime::Handle::current())
        .context("Failed to initialize the catalog client")?;
    let app_ui = LauncherUI::new(Arc::new(controller), event_rx);

    // =========================================================================
    // LAUNCH EGUI
    // =========================================================================
    log::info!("[Main] Launching egui frontend");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("App Launcher")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "App Launcher",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(app_ui)
        }),
    );

    // =========================================================================
    // SHUTDOWN
    // =========================================================================
    log::info!("[Main] Shutting down");
    if let Err(e) = log_collector.wait_for_empty().await {
        eprintln!("[Main] WARNING: Failed to flush logs: {}", e);
    }

    result.map_err(|e| anyhow::anyhow!("eframe exited with an error: {}", e))
}
