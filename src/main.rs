mod app;
mod config;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use showcase_ui::{run_with_app, EventLoop, ShowcaseWindow};

use crate::app::DemoApp;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "showcase", about = "Pointer-tilted image showcase demo")]
struct Cli {
    /// Path to the configuration file (default: showcase.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    // --- 1. LOAD CONFIG ---
    let loaded = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded config: {:?}", config.showcase);

    // --- 2. CREATE WINDOW ---
    let event_loop = EventLoop::new();
    let window = match ShowcaseWindow::new(&event_loop, config.window_config()) {
        Ok(window) => window,
        Err(e) => {
            log::error!("Failed to create window: {}", e);
            std::process::exit(1);
        }
    };

    // --- 3. RUN ---
    let app = DemoApp::new(&config);
    run_with_app(window, event_loop, app);
}
