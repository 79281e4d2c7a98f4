use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pomo_cli::{Config, GlyphTable, Terminal, config, run_menu};

fn main() -> anyhow::Result<()> {
    init_logging();
    info!("pomo-cli {} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let mut terminal = Terminal::new()?;

    run_menu(&mut terminal, &config.presets, GlyphTable::shared())?;

    info!("pomo-cli exiting");
    Ok(())
}

/// Log to a file; the terminal belongs to the timer display
fn init_logging() {
    let log_path = config::config_dir()
        .map(|dir| dir.join("pomo-cli.log"))
        .unwrap_or_else(|| PathBuf::from("pomo-cli.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
