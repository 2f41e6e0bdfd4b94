use anyhow::{Context, Result};
use serde::Serialize;

use super::context::AppContext;
use super::search::saved_ids;
use crate::cli::{CompareAction, OutputFormat};
use crate::compare::{AddOutcome, CompareList, KeyValueStore, ToggleOutcome, MAX_COMPARE};
use crate::core::IncomeBracket;
use crate::data::{self, SchoolQuery};
use crate::formatting::OutputFormatter;
use crate::output::{self, json, ComparisonView};

/// Shown when a fifth school is added
pub const CAPACITY_MESSAGE: &str = "You can compare up to 4 schools at a time";

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub action: CompareAction,
    pub bracket: IncomeBracket,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ListAction {
    Add,
    Remove,
    Toggle,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ChangeOutcome {
    Added,
    AlreadyPresent,
    CapacityExceeded,
    Removed,
    NotPresent,
    Cleared,
}

impl From<AddOutcome> for ChangeOutcome {
    fn from(outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => Self::Added,
            AddOutcome::AlreadyPresent => Self::AlreadyPresent,
            AddOutcome::CapacityExceeded => Self::CapacityExceeded,
        }
    }
}

impl From<ToggleOutcome> for ChangeOutcome {
    fn from(outcome: ToggleOutcome) -> Self {
        match outcome {
            ToggleOutcome::Added => Self::Added,
            ToggleOutcome::Removed => Self::Removed,
            ToggleOutcome::CapacityExceeded => Self::CapacityExceeded,
        }
    }
}

/// Result of a list mutation, for JSON output
#[derive(Debug, Clone, Serialize)]
struct ListChange {
    action: ListAction,
    id: Option<String>,
    outcome: ChangeOutcome,
    ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct NameMatch {
    id: String,
    name: String,
    location: String,
    in_compare: bool,
}

pub fn run_compare(ctx: &AppContext, config: CompareConfig) -> Result<()> {
    match &config.action {
        CompareAction::Show => show_comparison(ctx, &config),
        CompareAction::Find { query } => find_schools(ctx, &config, query),
        action => {
            let list = ctx.compare_list()?;
            let change = apply_change(&list, action)?;
            print_change(ctx, &config, &change)
        }
    }
}

fn apply_change<S: KeyValueStore>(list: &CompareList<S>, action: &CompareAction) -> Result<ListChange> {
    let (name, id, outcome) = match action {
        CompareAction::Add { id } => (
            ListAction::Add,
            Some(id.trim().to_string()),
            list.add(id)?.into(),
        ),
        CompareAction::Remove { id } => {
            let outcome = if list.remove(id)? {
                ChangeOutcome::Removed
            } else {
                ChangeOutcome::NotPresent
            };
            (ListAction::Remove, Some(id.trim().to_string()), outcome)
        }
        CompareAction::Toggle { id } => (
            ListAction::Toggle,
            Some(id.trim().to_string()),
            list.toggle(id)?.into(),
        ),
        CompareAction::Clear => {
            list.clear()?;
            (ListAction::Clear, None, ChangeOutcome::Cleared)
        }
        CompareAction::Show | CompareAction::Find { .. } => {
            anyhow::bail!("{:?} does not change the compare list", action)
        }
    };

    Ok(ListChange {
        action: name,
        id,
        outcome,
        ids: list.ids()?,
    })
}

fn change_message(change: &ListChange) -> String {
    let id = change.id.as_deref().unwrap_or_default();
    let count = format!("({}/{})", change.ids.len(), MAX_COMPARE);
    match change.outcome {
        ChangeOutcome::Added => format!("Added {} to your compare list {}", id, count),
        ChangeOutcome::AlreadyPresent => {
            format!("{} is already in your compare list {}", id, count)
        }
        ChangeOutcome::Removed => format!("Removed {} from your compare list {}", id, count),
        ChangeOutcome::NotPresent => format!("{} was not in your compare list", id),
        ChangeOutcome::CapacityExceeded => format!("{}. Remove one first.", CAPACITY_MESSAGE),
        ChangeOutcome::Cleared => "Cleared your compare list".to_string(),
    }
}

fn print_change(ctx: &AppContext, config: &CompareConfig, change: &ListChange) -> Result<()> {
    let rendered = match config.format {
        OutputFormat::Json => json::to_json(change)?,
        OutputFormat::Terminal => {
            let renderer = ctx.renderer();
            let formatter: &dyn OutputFormatter = renderer.formatter();
            let message = change_message(change);
            match change.outcome {
                ChangeOutcome::CapacityExceeded => formatter.warning(&message),
                ChangeOutcome::NotPresent | ChangeOutcome::AlreadyPresent => {
                    formatter.dim(&message)
                }
                ChangeOutcome::Added | ChangeOutcome::Removed | ChangeOutcome::Cleared => {
                    formatter.success(&message)
                }
            }
        }
    };
    output::emit(&rendered, None)?;
    Ok(())
}

fn show_comparison(ctx: &AppContext, config: &CompareConfig) -> Result<()> {
    let ids = ctx.compare_list()?.ids()?;

    let (schools, missing) = if ids.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let store = ctx.open_store()?;
        let schools = store
            .fetch_many(&ids)
            .context("Failed to load schools in your compare list")?;
        let missing = data::missing_ids(&ids, &schools);
        if !missing.is_empty() {
            log::warn!("Compare list ids not found: {}", missing.join(", "));
        }
        (schools, missing)
    };

    let view = ComparisonView {
        bracket: config.bracket,
        schools: schools
            .iter()
            .map(|school| ctx.assessor.report(school, config.bracket))
            .collect(),
        missing,
    };

    let rendered = match config.format {
        OutputFormat::Json => json::to_json(&view)?,
        OutputFormat::Terminal => ctx.renderer().comparison(&view),
    };
    output::emit(&rendered, None)?;
    Ok(())
}

fn find_schools(ctx: &AppContext, config: &CompareConfig, query: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let schools = store
        .fetch(&SchoolQuery::name_search(query, ctx.quick_search_limit()))
        .with_context(|| format!("Search for \"{}\" failed", query))?;
    let saved = saved_ids(ctx);

    let rendered = match config.format {
        OutputFormat::Json => {
            let matches: Vec<NameMatch> = schools
                .iter()
                .map(|school| NameMatch {
                    id: school.id.clone(),
                    name: school.name.clone(),
                    location: school.location(),
                    in_compare: saved.contains(&school.id),
                })
                .collect();
            json::to_json(&matches)?
        }
        OutputFormat::Terminal => ctx.renderer().name_matches(query, &schools, &saved),
    };
    output::emit(&rendered, None)?;
    Ok(())
}
