mod app;
mod clipboard;
mod config;
mod document;
mod input;
mod search;
mod snippets;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use document::Document;
use ratatui::prelude::*;
use std::fs::{self, File};
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BUNNYIDE_LOG";

#[derive(Parser, Debug)]
#[command(name = "bunnyide")]
#[command(author, version, about = "Terminal editor for Bash Bunny payloads", long_about = None)]
struct Args {
    /// Payload file to open (created on first save if missing)
    path: Option<PathBuf>,

    /// Command catalog file, overriding the configured one
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Lint PATH, print diagnostics and exit
    #[arg(long, requires = "path")]
    check: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.check {
        init_logging(None)?;
        let path = args.path.context("--check needs a file")?;
        return check(path, args.catalog);
    }

    init_logging(Some(Config::data_dir()?.join("bunnyide.log")))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut app = App::new(args.path, args.catalog)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "editor loop failed");
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to `file` when given, otherwise to stderr
fn init_logging(file: Option<PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }
    Ok(())
}

/// Non-interactive lint: one `path:line:col: message` per issue
fn check(path: PathBuf, catalog_override: Option<PathBuf>) -> Result<ExitCode> {
    let config = Config::load()?;
    let catalog_path = match catalog_override {
        Some(p) => p,
        None => config.catalog_path()?,
    };
    let catalog = app::load_catalog(&catalog_path);

    let doc = Document::open(&path)?;
    let result = bunnyide::lint(&doc.content(), doc.is_shell(), catalog.as_ref());

    for diag in &result.diagnostics {
        println!(
            "{}:{}:{}: {}",
            path.display(),
            diag.line + 1,
            diag.line_span.start + 1,
            diag.message
        );
    }

    Ok(if result.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let timeout = app.poll_timeout(Instant::now());
        let action = input::handle_event(app, timeout)?;
        app.tick(Instant::now());

        match action {
            input::Action::Quit => break,
            input::Action::Save => app.save(),
            input::Action::None => {}
        }
    }
    tracing::info!("exiting");
    Ok(())
}
