//! Terminal styling and value formatting.
//!
//! Color decisions are made once from the command line and environment
//! (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY detection) and then passed
//! around as an [`OutputFormatter`].

mod money;

use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::affordability::SeverityColor;

pub use money::{
    format_count, format_money, format_percent, format_signed_money, normalize_url,
    NOT_AVAILABLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        Self::from_env_values(
            env::var("NO_COLOR").ok().as_deref(),
            env::var("CLICOLOR").ok().as_deref(),
            env::var("CLICOLOR_FORCE").ok().as_deref(),
        )
    }

    /// Resolve the color mode from the conventional variables.
    ///
    /// `CLICOLOR_FORCE=1` wins over `NO_COLOR` and `CLICOLOR=0`.
    pub fn from_env_values(
        no_color: Option<&str>,
        clicolor: Option<&str>,
        clicolor_force: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if no_color.is_some() || clicolor == Some("0") {
            config.color = ColorMode::Never;
        }
        if clicolor_force == Some("1") {
            config.color = ColorMode::Always;
        }

        config
    }

    /// No colors, regardless of terminal
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// Paint `text` in the terminal color for a severity bucket
    fn severity(&self, text: &str, color: SeverityColor) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn enabled(&self) -> bool {
        self.config.color.should_use_color()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        if self.enabled() {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.enabled() {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.enabled() {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        if self.enabled() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.enabled() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn severity(&self, text: &str, color: SeverityColor) -> String {
        if !self.enabled() {
            return text.to_string();
        }
        match color {
            SeverityColor::Neutral => text.dimmed().to_string(),
            SeverityColor::Low => text.green().to_string(),
            SeverityColor::Medium => text.yellow().to_string(),
            SeverityColor::High => text.truecolor(255, 140, 0).to_string(),
            SeverityColor::Critical => text.red().bold().to_string(),
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn severity(&self, text: &str, _color: SeverityColor) -> String {
        text.to_string()
    }
}

/// Pick the formatter for a resolved configuration
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color.should_use_color() {
        Box::new(ColoredFormatter::new(config))
    } else {
        colored::control::set_override(false);
        Box::new(PlainFormatter)
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
