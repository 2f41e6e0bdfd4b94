//! Rendering of view models, as terminal text or JSON.
//!
//! Renderers return strings; [`emit`] decides where they go.

pub mod json;
pub mod terminal;

use serde::Serialize;
use std::path::Path;

use crate::affordability::{CostView, SchoolReport};
use crate::core::{IncomeBracket, School, TravelMode};
use crate::data::{SearchCriteria, SearchState};
use crate::errors::Result;

pub use terminal::TerminalRenderer;

/// One line of a result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub control: &'static str,
    pub no_loan_policy: bool,
    pub travel: Option<TravelMode>,
    pub in_compare: bool,
    pub cost: CostView,
}

impl SchoolRow {
    pub fn new(school: &School, cost: CostView, in_compare: bool) -> Self {
        Self {
            id: school.id.clone(),
            name: school.name.clone(),
            location: school.location(),
            control: school.control_label(),
            no_loan_policy: school.no_loan_policy,
            travel: school.travel_type,
            in_compare,
            cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStatus {
    Idle,
    Loading,
    Empty,
    Failed,
    Loaded,
}

/// A finished search, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub criteria: SearchCriteria,
    pub status: SearchStatus,
    pub error: Option<String>,
    pub results: Vec<SchoolRow>,
}

impl SearchView {
    pub fn new(criteria: SearchCriteria, state: &SearchState, results: Vec<SchoolRow>) -> Self {
        let (status, error) = match state {
            SearchState::Idle => (SearchStatus::Idle, None),
            SearchState::Loading => (SearchStatus::Loading, None),
            SearchState::Empty => (SearchStatus::Empty, None),
            SearchState::Failed(message) => (SearchStatus::Failed, Some(message.clone())),
            SearchState::Loaded(_) => (SearchStatus::Loaded, None),
        };
        Self {
            criteria,
            status,
            error,
            results,
        }
    }
}

/// Side-by-side view of the saved compare list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub bracket: IncomeBracket,
    pub schools: Vec<SchoolReport>,
    /// Saved ids with no record in the data store
    pub missing: Vec<String>,
}

/// Write `content` to `output_file`, or print it
pub fn emit(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            crate::io::write_file_atomic(path, content)?;
            log::info!("Wrote output to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
