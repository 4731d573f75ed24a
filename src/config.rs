use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub log:     Option<LogConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. "debug" or "sheetcal=trace".
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    pub show_holidays:   Option<bool>,
    pub highlight_today: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Self::parse(&std::fs::read_to_string(&path)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn log_level(&self) -> &str {
        self.log.as_ref().and_then(|l| l.level.as_deref()).unwrap_or("info")
    }

    pub fn show_holidays(&self) -> bool {
        self.display.as_ref().and_then(|d| d.show_holidays).unwrap_or(true)
    }

    pub fn highlight_today(&self) -> bool {
        self.display.as_ref().and_then(|d| d.highlight_today).unwrap_or(true)
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sheetcal")
}
