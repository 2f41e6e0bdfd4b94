use anyhow::{bail, Result};
use std::path::PathBuf;

use super::context::AppContext;
use crate::cli::OutputFormat;
use crate::data::{SchoolQuery, SearchCriteria, SearchSession};
use crate::output::{self, json, SchoolRow, SearchView};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub criteria: SearchCriteria,
    pub limit: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Run an affordability search and render the outcome.
///
/// A failed query is rendered as such (never as "no results") and then
/// reported as an error so the exit status reflects it.
pub fn run_search(ctx: &AppContext, config: SearchConfig) -> Result<()> {
    let view = search_view(ctx, &config)?;

    let rendered = match config.format {
        OutputFormat::Json => json::to_json(&view)?,
        OutputFormat::Terminal => ctx.renderer().search(&view),
    };
    output::emit(&rendered, config.output.as_deref())?;

    if let Some(message) = &view.error {
        bail!("Search failed: {}", message);
    }
    Ok(())
}

pub fn search_view(ctx: &AppContext, config: &SearchConfig) -> Result<SearchView> {
    let store = ctx.open_store()?;
    let limit = config.limit.unwrap_or_else(|| ctx.search_limit());
    let query = SchoolQuery::affordability_search(&config.criteria, limit);

    let mut session = SearchSession::new();
    session.run(store.as_ref(), &query);
    let state = session.into_state();

    let saved = saved_ids(ctx);
    let rows = state
        .schools()
        .iter()
        .map(|school| {
            let cost = ctx.assessor.cost_view(school, config.criteria.bracket);
            SchoolRow::new(school, cost, saved.contains(&school.id))
        })
        .collect();

    Ok(SearchView::new(config.criteria.clone(), &state, rows))
}

/// Saved compare ids, or none if the list cannot be read
pub(crate) fn saved_ids(ctx: &AppContext) -> Vec<String> {
    match ctx.compare_list().and_then(|list| Ok(list.ids()?)) {
        Ok(ids) => ids,
        Err(e) => {
            log::warn!("Could not read compare list: {:#}", e);
            Vec::new()
        }
    }
}
