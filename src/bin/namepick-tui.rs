// Namepick TUI
// Interactive people picker over a JSON candidate list

#[path = "../tui/mod.rs"]
mod tui;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use namepick_core::{load_candidates, Config, FilterEngine};

/// Interactive layout and transliteration aware people picker
#[derive(Parser, Debug)]
#[command(name = "namepick-tui")]
#[command(author = "namepick contributors")]
#[command(version)]
#[command(about = "Pick people by name in the terminal", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/namepick/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// JSON file with a list of {id, first_name, last_name} records
    #[arg(short, long, value_name = "FILE")]
    users: PathBuf,

    /// Write logs to this file; the terminal belongs to the picker
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default().context("failed to load default config")?,
    };
    let layouts = config.layout_table().context("invalid layout table")?;
    let dictionary = config.dictionary().context("invalid transliteration table")?;

    let mut app = tui::App::new(
        FilterEngine::from_tables(layouts, dictionary),
        config.viewport(),
        config.debounce(),
        args.users.display().to_string(),
    );

    match load_candidates(&args.users) {
        Ok(records) => app.load(records),
        Err(err) => {
            log::warn!("Failed to load {}: {}", args.users.display(), err);
            app.load_failed(err.to_string());
        }
    }

    let selected = tui::run(app).context("terminal UI failed")?;
    for id in selected {
        println!("{}", id);
    }
    Ok(())
}
