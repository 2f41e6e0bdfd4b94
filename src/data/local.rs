use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::query::SchoolQuery;
use super::travel::fill_missing_travel;
use super::SchoolStore;
use crate::config::TravelConfig;
use crate::core::School;
use crate::errors::{Error, Result};
use crate::io;

/// Schools loaded from a JSON array export and queried in memory.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    schools: Vec<School>,
    source: Option<PathBuf>,
}

impl LocalStore {
    pub fn from_schools(schools: Vec<School>) -> Self {
        Self {
            schools,
            source: None,
        }
    }

    /// Load a dataset file.
    ///
    /// With `travel` set, schools missing travel data get an estimate from
    /// their state.
    pub fn open(path: &Path, travel: Option<&TravelConfig>) -> Result<Self> {
        let contents = io::read_file(path)?;
        let mut schools = parse_dataset(&contents).map_err(|e| Error::dataset(path, e))?;

        if let Some(config) = travel {
            let filled = schools
                .iter_mut()
                .map(|school| fill_missing_travel(school, config))
                .filter(|changed| *changed)
                .count();
            if filled > 0 {
                log::info!("Estimated travel costs for {} schools", filled);
            }
        }

        log::debug!("Loaded {} schools from {}", schools.len(), path.display());
        Ok(Self {
            schools,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }
}

/// Accepts a bare array or an object with a `schools` array.
fn parse_dataset(contents: &str) -> std::result::Result<Vec<School>, String> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Dataset {
        Rows(Vec<School>),
        Wrapped { schools: Vec<School> },
    }

    match serde_json::from_str::<Dataset>(contents) {
        Ok(Dataset::Rows(rows)) | Ok(Dataset::Wrapped { schools: rows }) => Ok(rows),
        Err(_) => serde_json::from_str::<Vec<School>>(contents)
            .map_err(|e| e.to_string()),
    }
}

/// Ascending by value; unreported values sort last.
fn compare_nullable(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl SchoolStore for LocalStore {
    fn fetch(&self, query: &SchoolQuery) -> Result<Vec<School>> {
        let mut rows: Vec<School> = self
            .schools
            .iter()
            .filter(|school| query.matches(school))
            .cloned()
            .collect();

        if let Some(column) = query.order_by {
            rows.sort_by(|a, b| compare_nullable(column.number(a), column.number(b)));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn describe(&self) -> String {
        match &self.source {
            Some(path) => format!("local dataset {}", path.display()),
            None => "in-memory dataset".to_string(),
        }
    }
}
