use anyhow::Result;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

use crate::config::config_dir;

pub fn hex_to_color(hex: &str) -> Color {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() { return Color::Reset; }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Color::Rgb(r, g, b)
}

fn default_holiday_fg()   -> String { "#f9e2af".to_owned() }
fn default_border_style() -> String { "rounded".to_owned() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    // Backgrounds
    pub bg_primary: String, pub bg_secondary: String, pub bg_popup: String,
    // Borders
    pub border_normal: String, pub border_focused: String,
    // Text
    pub text_primary: String, pub text_muted: String, pub text_accent: String,
    // Day cells
    pub today_bg: String, pub today_fg: String,
    /// Days borrowed from the neighbouring months.
    pub filler_fg: String,
    pub weekend_fg: String,
    #[serde(default = "default_holiday_fg")]
    pub holiday_fg: String,
    // Messages
    pub success: String, pub error: String,
    /// Border style: "rounded" | "double" | "thick" | "plain"
    #[serde(default = "default_border_style")]
    pub border_style: String,
}

impl ThemeConfig {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn bg(&self)            -> Color { hex_to_color(&self.bg_primary) }
    pub fn bg2(&self)           -> Color { hex_to_color(&self.bg_secondary) }
    pub fn popup_bg(&self)      -> Color { hex_to_color(&self.bg_popup) }
    pub fn border(&self)        -> Color { hex_to_color(&self.border_normal) }
    pub fn border_active(&self) -> Color { hex_to_color(&self.border_focused) }
    pub fn fg(&self)            -> Color { hex_to_color(&self.text_primary) }
    pub fn fg_dim(&self)        -> Color { hex_to_color(&self.text_muted) }
    pub fn accent(&self)        -> Color { hex_to_color(&self.text_accent) }
    pub fn filler(&self)        -> Color { hex_to_color(&self.filler_fg) }
    pub fn weekend_color(&self) -> Color { hex_to_color(&self.weekend_fg) }
    pub fn holiday(&self)       -> Color { hex_to_color(&self.holiday_fg) }
    pub fn ok(&self)            -> Color { hex_to_color(&self.success) }
    pub fn error(&self)         -> Color { hex_to_color(&self.error) }

    pub fn today_highlight(&self) -> (Color, Color) {
        (hex_to_color(&self.today_bg), hex_to_color(&self.today_fg))
    }

    pub fn border_type(&self) -> BorderType {
        match self.border_style.as_str() {
            "double" => BorderType::Double,
            "thick"  => BorderType::Thick,
            "plain"  => BorderType::Plain,
            _        => BorderType::Rounded,
        }
    }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn load() -> Result<Self> {
        let path = config_dir().join("theme.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            let t = ThemeConfig::default();
            t.save()?;
            Ok(t)
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("theme.toml"), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Theme catalogue ───────────────────────────────────────────────────────
    pub fn all_themes() -> Vec<ThemeConfig> {
        vec![
            ThemeConfig::default(),    // Catppuccin Mocha
            ThemeConfig::nord(),
            ThemeConfig::gruvbox(),
            ThemeConfig::polska(),
        ]
    }

    /// Index of the next theme in the catalogue, wrapping around.
    pub fn next_index(current: &str) -> usize {
        let all = Self::all_themes();
        let idx = all.iter().position(|t| t.name == current).unwrap_or(0);
        (idx + 1) % all.len()
    }

    pub fn nord() -> Self { Self {
        name: "nord".into(),
        bg_primary: "#2e3440".into(), bg_secondary: "#3b4252".into(), bg_popup: "#434c5e".into(),
        border_normal: "#4c566a".into(), border_focused: "#88c0d0".into(),
        text_primary: "#eceff4".into(), text_muted: "#4c566a".into(), text_accent: "#88c0d0".into(),
        today_bg: "#88c0d0".into(), today_fg: "#2e3440".into(),
        filler_fg: "#4c566a".into(), weekend_fg: "#bf616a".into(), holiday_fg: "#ebcb8b".into(),
        success: "#a3be8c".into(), error: "#bf616a".into(),
        border_style: "rounded".into(),
    }}

    pub fn gruvbox() -> Self { Self {
        name: "gruvbox".into(),
        bg_primary: "#282828".into(), bg_secondary: "#1d2021".into(), bg_popup: "#3c3836".into(),
        border_normal: "#504945".into(), border_focused: "#d79921".into(),
        text_primary: "#ebdbb2".into(), text_muted: "#7c6f64".into(), text_accent: "#d79921".into(),
        today_bg: "#d79921".into(), today_fg: "#282828".into(),
        filler_fg: "#665c54".into(), weekend_fg: "#fb4934".into(), holiday_fg: "#fabd2f".into(),
        success: "#b8bb26".into(), error: "#fb4934".into(),
        border_style: "rounded".into(),
    }}

    /// White and crimson, double-line borders.
    pub fn polska() -> Self { Self {
        name: "polska".into(),
        bg_primary: "#1a0008".into(), bg_secondary: "#12000a".into(), bg_popup: "#2a0010".into(),
        border_normal: "#5c0018".into(), border_focused: "#ffffff".into(),
        text_primary: "#f5f0f0".into(), text_muted: "#7a4050".into(), text_accent: "#ffffff".into(),
        today_bg: "#dc143c".into(), today_fg: "#ffffff".into(),
        filler_fg: "#5c3040".into(), weekend_fg: "#ff4d6a".into(), holiday_fg: "#ffd0d8".into(),
        success: "#9be39b".into(), error: "#ff3355".into(),
        border_style: "double".into(),
    }}
}

impl Default for ThemeConfig {
    fn default() -> Self { Self {
        name: "catppuccin-mocha".into(),
        bg_primary: "#1e1e2e".into(), bg_secondary: "#181825".into(), bg_popup: "#313244".into(),
        border_normal: "#45475a".into(), border_focused: "#89b4fa".into(),
        text_primary: "#cdd6f4".into(), text_muted: "#6c7086".into(), text_accent: "#89b4fa".into(),
        today_bg: "#cba6f7".into(), today_fg: "#1e1e2e".into(),
        filler_fg: "#585b70".into(), weekend_fg: "#f38ba8".into(), holiday_fg: "#f9e2af".into(),
        success: "#a6e3a1".into(), error: "#f38ba8".into(),
        border_style: "rounded".into(),
    }}
}
