use anyhow::{Context, Result};
use std::path::PathBuf;

use super::context::AppContext;
use crate::cli::OutputFormat;
use crate::core::IncomeBracket;
use crate::output::{self, json};

#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub id: String,
    pub bracket: IncomeBracket,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run_show(ctx: &AppContext, config: ShowConfig) -> Result<()> {
    let store = ctx.open_store()?;
    let school = store
        .fetch_one(config.id.trim())
        .with_context(|| format!("Could not load school {}", config.id))?;

    let report = ctx.assessor.report(&school, config.bracket);
    let rendered = match config.format {
        OutputFormat::Json => json::to_json(&report)?,
        OutputFormat::Terminal => ctx.renderer().report(&report),
    };
    output::emit(&rendered, config.output.as_deref())?;
    Ok(())
}
