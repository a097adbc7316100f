/// Bookshoe Terminal - design a book shoe tray in the terminal
///
/// Controls:
///   - WASD / Arrow Keys: Rotate the shoe
///   - E/R: Roll rotation, Space: toggle auto-spin
///   - Tab / Shift-Tab: Select a dimension, +/- and ]/[ to change it
///   - V: Next variant, X: Export STL, P/I: Export/import settings, 0: Reset
///   - Q/ESC: Quit
use bookshoe_core::{Designer, Variant};
use bookshoe_terminal::{import_file, FileStore, TerminalApp};
use clap::Parser;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, Level};

const LOG_FILE: &str = "bookshoe.log";

#[derive(Parser)]
#[command(name = "bookshoe-terminal")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shoe variant: full, withoutOuterWalls or pagesOnly
    #[arg(long)]
    variant: Option<Variant>,

    /// Directory holding the saved settings and the log file
    #[arg(long, default_value = ".bookshoe")]
    state_dir: PathBuf,

    /// Directory STL and settings exports are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Settings file to apply at startup
    #[arg(long)]
    import: Option<PathBuf>,

    /// Log debug events
    #[arg(long, short)]
    verbose: bool,
}

/// The terminal is in raw mode while running, so logs go to a file
fn init_logging(state_dir: &Path, verbose: bool) -> io::Result<()> {
    fs::create_dir_all(state_dir)?;
    let file = File::create(state_dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .without_time()
        .compact()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args.state_dir, args.verbose)?;

    let mut designer = Designer::open(FileStore::new(&args.state_dir), args.variant);
    info!(variant = %designer.variant(), state_dir = %args.state_dir.display(), "session opened");

    if let Some(path) = &args.import {
        if let Err(message) = import_file(&mut designer, path) {
            eprintln!("{message}");
        }
    }

    let mut app = TerminalApp::new(designer, args.out_dir)?;
    app.run()?;

    println!("Settings saved to {}", args.state_dir.display());
    Ok(())
}
