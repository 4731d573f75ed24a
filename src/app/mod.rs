use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

use crate::{
    calendar::{build_grid, CalendarGrid},
    config::AppConfig,
    holidays::{self, Holiday},
    sheet::{self, ResolvedPeriod},
    theme::ThemeConfig,
    ui::draw,
    workbook::Workbook,
};

// ─── Loading ──────────────────────────────────────────────────────────────────

/// Decodes the workbook at `path` on a blocking worker thread.
pub async fn read_workbook(path: &Path) -> Result<Workbook> {
    let owned = path.to_owned();
    let wb = tokio::task::spawn_blocking(move || Workbook::open(owned)).await?
        .with_context(|| format!("Error parsing {}", path.display()))?;
    Ok(wb)
}

/// Workbook → first sheet name → month and year.
pub async fn load_period(path: &Path) -> Result<(String, ResolvedPeriod)> {
    let sheet_name = read_workbook(path).await?.first_sheet_name().to_owned();
    tracing::debug!(sheet = %sheet_name, "first sheet");
    let period = sheet::resolve(&sheet_name)?;
    Ok((sheet_name, period))
}

// ─── Screen model ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Calendar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text:     String,
    pub is_error: bool,
}

impl Message {
    pub fn ok(text: impl Into<String>)    -> Self { Self { text: text.into(), is_error: false } }
    pub fn error(text: impl Into<String>) -> Self { Self { text: text.into(), is_error: true } }
}

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub cfg:            AppConfig,
    pub theme:          ThemeConfig,
    pub screen:         Screen,
    pub show_help:      bool,
    pub path_input:     String,
    pub message:        Option<Message>,
    pub sheet_name:     Option<String>,
    pub grid:           Option<CalendarGrid>,
    pub month_holidays: Vec<(u32, Holiday)>,
    pub today:          NaiveDate,
    pub running:        bool,
}

impl App {
    pub fn new(cfg: AppConfig, theme: ThemeConfig) -> Self {
        Self {
            cfg, theme,
            screen:         Screen::Upload,
            show_help:      false,
            path_input:     String::new(),
            message:        None,
            sheet_name:     None,
            grid:           None,
            month_holidays: Vec::new(),
            today:          Local::now().date_naive(),
            running:        true,
        }
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term).await;

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen)?;
        term.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        term: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick = std::time::Duration::from_millis(50);
        while self.running {
            term.draw(|f| draw(f, self))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key).await;
                    }
                }
            }
        }
        tracing::info!("Exiting");
        Ok(())
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Loads a workbook and switches to its month. Any failure lands back on
    /// the upload screen with the reason shown.
    pub async fn load_file(&mut self, path: PathBuf) {
        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_period(&path).await {
            Ok((sheet_name, period)) => {
                tracing::info!(file = %path.display(), sheet = %sheet_name, %period, "loaded");
                self.sheet_name = Some(sheet_name);
                self.show_period(period);
                self.screen     = Screen::Calendar;
                self.path_input.clear();
                self.message    = Some(Message::ok(
                    format!("File \"{file_name}\" has been processed successfully!"),
                ));
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), "load failed: {e:#}");
                self.screen  = Screen::Upload;
                self.message = Some(Message::error(format!("{e:#}")));
            }
        }
    }

    pub fn show_period(&mut self, period: ResolvedPeriod) {
        self.month_holidays = holidays::holidays_in_month(period.year(), period.month().number_from_month());
        self.grid           = Some(build_grid(period));
    }

    pub fn period(&self) -> Option<ResolvedPeriod> {
        self.grid.as_ref().map(CalendarGrid::period)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub async fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.screen {
            Screen::Upload   => self.key_upload(key).await,
            Screen::Calendar => self.key_calendar(key),
        }
    }

    async fn key_upload(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') if self.path_input.is_empty() => self.show_help = true,
            KeyCode::Char(c)   => self.path_input.push(c),
            KeyCode::Backspace => { self.path_input.pop(); }
            KeyCode::Enter => {
                let input = self.path_input.trim();
                if input.is_empty() {
                    self.message = Some(Message::error("Please select an Excel file (.xlsx or .xls)"));
                } else {
                    let path = PathBuf::from(input);
                    self.load_file(path).await;
                }
            }
            KeyCode::Esc => {
                if !self.path_input.is_empty() {
                    self.path_input.clear();
                } else if self.grid.is_some() {
                    self.screen = Screen::Calendar;
                }
            }
            _ => {}
        }
    }

    fn key_calendar(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(']') | KeyCode::Right => self.shift_month(ResolvedPeriod::next),
            KeyCode::Char('[') | KeyCode::Left  => self.shift_month(ResolvedPeriod::prev),
            KeyCode::Char('t') => self.show_period(ResolvedPeriod::containing(self.today)),
            KeyCode::Char('u') | KeyCode::Esc => {
                self.message = None;
                self.screen  = Screen::Upload;
            }
            // T (Shift+T) — cycle through themes
            KeyCode::Char('T') => {
                let themes = ThemeConfig::all_themes();
                let idx    = ThemeConfig::next_index(&self.theme.name);
                self.theme = themes[idx].clone();
                if let Err(e) = self.theme.save() {
                    tracing::warn!("could not save theme: {e:#}");
                }
            }
            _ => {}
        }
    }

    fn shift_month(&mut self, step: fn(&ResolvedPeriod) -> Option<ResolvedPeriod>) {
        if let Some(next) = self.period().as_ref().and_then(step) {
            self.show_period(next);
        }
    }
}
