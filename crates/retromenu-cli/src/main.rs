//! RetroMenu - in-game menu for terminal-hosted emulators
//!
//! Runs a small demo game under the RetroMenu navigation core:
//! - Keyboard, mouse (as touch) and gamepad input
//! - Nine save slots persisted to disk
//! - Pause/resume with post-close key interception

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use retromenu_core::{FileSaveStateStore, MenuConfig, SaveStateStore};

mod tui;

/// RetroMenu - in-game menu demo host
#[derive(Parser)]
#[command(name = "retromenu")]
#[command(about = "In-game emulator menu, hosted in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Data directory for saves and logs (defaults to the platform data dir)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// ROM name shown in the About screen and stored with saves
    #[arg(short, long, global = true, default_value = "demo.rom")]
    rom_name: String,

    /// Config file (defaults to ~/.config/retromenu/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo game with the menu (default)
    Play,

    /// List the nine save slots
    Slots,

    /// Print the effective configuration
    Config,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::DisableMouseCapture,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

fn init_logging(data_dir: &std::path::Path) -> Result<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join("retromenu.log"))
        .context("creating log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<MenuConfig> {
    let config = match &cli.config {
        Some(path) => MenuConfig::load(path),
        None => MenuConfig::load_default(),
    };
    config.context("loading configuration")
}

fn print_slots(store: &dyn SaveStateStore) {
    println!("Save slots:");
    println!();
    for slot in store.get_all_slots() {
        if slot.is_empty {
            println!("  {}  -", slot.slot_number);
            continue;
        }
        println!(
            "  {}  {:<24} {:<16} {}",
            slot.slot_number,
            slot.name,
            slot.formatted_timestamp(),
            slot.rom_name
        );
    }
    println!();
    match store.first_empty_slot() {
        Some(n) => println!("  Next free slot: {}", n),
        None => println!("  All slots in use"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    if let Some(dir) = &cli.data_dir {
        config.saves_dir = Some(dir.clone());
    }
    let data_dir = config.saves_root();

    // Log to file (stdout belongs to the TUI)
    init_logging(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    match cli.command {
        Some(Commands::Slots) => {
            let store = FileSaveStateStore::open(data_dir.clone())?;
            print_slots(&store);
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        Some(Commands::Play) | None => {
            let store = FileSaveStateStore::open(data_dir.clone())?;
            let mut app = tui::App::new(config, store, cli.rom_name);
            app.run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debounce_window_ms = 120\nquick_jump_keys = false\n")
            .expect("write config");

        let cli = Cli::parse_from(["retromenu", "--config", path.to_str().expect("utf8")]);
        let config = load_config(&cli).expect("config");
        assert_eq!(config.debounce_window_ms, 120);
        assert!(!config.quick_jump_keys);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debounce_window_ms = \"soon\"").expect("write config");

        let cli = Cli::parse_from(["retromenu", "-c", path.to_str().expect("utf8"), "slots"]);
        assert!(load_config(&cli).is_err());
        assert!(matches!(cli.command, Some(Commands::Slots)));
    }
}
