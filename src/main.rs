mod app;
mod calendar;
mod config;
mod holidays;
mod output;
mod sheet;
mod theme;
mod ui;
mod workbook;

use anyhow::{bail, Result};
use app::App;
use config::AppConfig;
use std::path::{Path, PathBuf};
use theme::ThemeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "\
usage: sheetcal [FILE.xlsx]             open the calendar (upload screen without FILE)
       sheetcal print FILE.xlsx [--json] print the month grid of FILE's first sheet
       sheetcal sheets FILE.xlsx         list FILE's sheet names
       sheetcal resolve SHEET-NAME       resolve a name such as STYCZEŃ'07
       sheetcal months                   show the month-name table";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cfg = AppConfig::load().unwrap_or_default();

    match args.get(1).map(|s| s.as_str()) {
        // ── sheetcal print FILE [--json] ──────────────────────────────────────
        Some("print") => {
            init_stderr_logging(&cfg);
            let Some(file) = args.get(2) else { bail!(USAGE) };
            let json = args.iter().skip(3).any(|a| a == "--json");
            cmd_print(Path::new(file), json).await
        }
        // ── sheetcal sheets FILE ──────────────────────────────────────────────
        Some("sheets") => {
            init_stderr_logging(&cfg);
            let Some(file) = args.get(2) else { bail!(USAGE) };
            cmd_sheets(Path::new(file)).await
        }
        // ── sheetcal resolve NAME ─────────────────────────────────────────────
        Some("resolve") => {
            init_stderr_logging(&cfg);
            let Some(name) = args.get(2) else { bail!(USAGE) };
            let period = sheet::resolve(name)?;
            println!("{period}");
            Ok(())
        }
        Some("months") => {
            for entry in &sheet::POLISH_MONTHS {
                println!("{:<12} {:>2}  {}", entry.token, entry.month_index(), entry.canonical_name());
            }
            Ok(())
        }
        Some("-h") | Some("--help") | Some("help") => {
            println!("{USAGE}");
            Ok(())
        }
        // ── sheetcal [FILE] (TUI) ─────────────────────────────────────────────
        file => run_tui(cfg, file.map(PathBuf::from)).await,
    }
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// `RUST_LOG` wins over the configured level.
fn env_filter(cfg: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_level()))
}

fn init_stderr_logging(cfg: &AppConfig) {
    // Logging to stderr so it doesn't interfere with stdout output
    tracing_subscriber::registry()
        .with(env_filter(cfg))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ─── One-shot commands ────────────────────────────────────────────────────────

async fn cmd_print(file: &Path, json: bool) -> Result<()> {
    let (sheet_name, period) = app::load_period(file).await?;
    let grid = calendar::build_grid(period);
    tracing::info!(sheet = %sheet_name, %period, leading = grid.leading(), "resolved");
    if json {
        println!("{}", output::render_json(&grid)?);
    } else {
        print!("{}", output::render_text(&grid));
    }
    Ok(())
}

async fn cmd_sheets(file: &Path) -> Result<()> {
    let wb = app::read_workbook(file).await?;
    for name in wb.sheet_names() {
        println!("{name}");
    }
    Ok(())
}

// ─── TUI ─────────────────────────────────────────────────────────────────────

async fn run_tui(cfg: AppConfig, file: Option<PathBuf>) -> Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sheetcal");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "sheetcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(env_filter(&cfg))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!("Starting SheetCal");

    let theme = ThemeConfig::load()?;
    let mut app = App::new(cfg, theme);
    if let Some(path) = file {
        app.load_file(path).await;
    }

    app.run().await?;
    Ok(())
}
