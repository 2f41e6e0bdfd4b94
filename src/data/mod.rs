//! Read-only access to school records.
//!
//! Commands describe what they want with a [`SchoolQuery`] and hand it to a
//! [`SchoolStore`]. Two stores exist: [`LocalStore`] evaluates queries over a
//! JSON export in memory, [`RestStore`] translates them to PostgREST.

mod local;
mod query;
mod rest;
mod search;
pub mod travel;

pub use local::LocalStore;
pub use query::{Column, Filter, FilterValue, SchoolQuery, SearchCriteria};
pub use rest::{postgrest_params, RestStore};
pub use search::{SearchSession, SearchState, SearchTicket};

use crate::core::School;
use crate::errors::{Error, Result};

/// Read-only query capability over the schools collection.
pub trait SchoolStore: Send + Sync {
    /// Run a query.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` or `Error::Http` when the back end fails. Zero
    /// matching rows is `Ok(vec![])`, not an error.
    fn fetch(&self, query: &SchoolQuery) -> Result<Vec<School>>;

    /// Short description for log lines
    fn describe(&self) -> String;

    /// Fetch one school by id.
    fn fetch_one(&self, id: &str) -> Result<School> {
        self.fetch(&SchoolQuery::by_id(id))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Fetch a set of schools, returned in the order of `ids`.
    ///
    /// Ids with no matching record are skipped.
    fn fetch_many(&self, ids: &[String]) -> Result<Vec<School>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let schools = self.fetch(&SchoolQuery::by_ids(ids))?;
        Ok(order_by_ids(ids, schools))
    }
}

/// Reorder `schools` to follow `ids`, dropping ids with no record.
pub fn order_by_ids(ids: &[String], mut schools: Vec<School>) -> Vec<School> {
    ids.iter()
        .filter_map(|id| {
            let position = schools.iter().position(|school| school.id == *id)?;
            Some(schools.swap_remove(position))
        })
        .collect()
}

/// Ids from `ids` that are absent from `schools`
pub fn missing_ids(ids: &[String], schools: &[School]) -> Vec<String> {
    ids.iter()
        .filter(|id| !schools.iter().any(|school| school.id == **id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(id: &str) -> School {
        School {
            id: id.into(),
            name: format!("School {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_order_by_ids_follows_list_order() {
        let ids: Vec<String> = vec!["3".into(), "1".into(), "9".into(), "2".into()];
        let ordered = order_by_ids(&ids, vec![school("1"), school("2"), school("3")]);
        let got: Vec<_> = ordered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(got, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_missing_ids() {
        let ids: Vec<String> = vec!["1".into(), "9".into()];
        assert_eq!(missing_ids(&ids, &[school("1")]), vec!["9".to_string()]);
    }

    #[test]
    fn test_fetch_one_not_found() {
        let store = LocalStore::from_schools(vec![school("1")]);
        assert!(matches!(store.fetch_one("2"), Err(Error::NotFound(_))));
        assert_eq!(store.fetch_one("1").unwrap().id, "1");
    }
}
