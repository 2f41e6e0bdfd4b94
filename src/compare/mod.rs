//! The compare list: up to four school ids the family wants side by side.
//!
//! [`CompareList`] is the single source of truth for every command. It owns
//! no state of its own; each operation is one read-modify-write against the
//! injected [`KeyValueStore`], so a read right after a write sees it.

mod store;

pub use store::{FileKvStore, KeyValueStore, MemoryKvStore};

use serde::Serialize;
use serde_json::Value;

use crate::errors::{Error, Result};

/// Most schools that can be compared at once
pub const MAX_COMPARE: usize = 4;

/// Store key holding the serialized list
pub const COMPARE_KEY: &str = "compareSchools";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    /// The list already holds [`MAX_COMPARE`] ids and was left unchanged
    CapacityExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    CapacityExceeded,
}

/// Ordered, duplicate-free, capped list of school ids.
#[derive(Debug)]
pub struct CompareList<S> {
    store: S,
}

impl<S: KeyValueStore> CompareList<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current ids in insertion order.
    ///
    /// A malformed stored value reads as an empty list. A stored list with
    /// duplicates or more than [`MAX_COMPARE`] entries is normalized.
    pub fn ids(&self) -> Result<Vec<String>> {
        let raw = self.store.get(COMPARE_KEY)?;
        Ok(raw.map(|raw| parse_ids(&raw)).unwrap_or_default())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.ids()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.ids()?.is_empty())
    }

    pub fn is_full(&self) -> Result<bool> {
        Ok(self.ids()?.len() >= MAX_COMPARE)
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        let id = id.trim();
        Ok(self.ids()?.iter().any(|existing| existing == id))
    }

    pub fn add(&self, id: &str) -> Result<AddOutcome> {
        let id = validate_id(id)?;
        let mut ids = self.ids()?;

        if ids.iter().any(|existing| existing == id) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        if ids.len() >= MAX_COMPARE {
            log::info!("Compare list is full; not adding {}", id);
            return Ok(AddOutcome::CapacityExceeded);
        }

        ids.push(id.to_string());
        self.save(&ids)?;
        Ok(AddOutcome::Added)
    }

    /// Remove `id`, reporting whether it was present
    pub fn remove(&self, id: &str) -> Result<bool> {
        let id = id.trim();
        let mut ids = self.ids()?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.save(&ids)?;
        Ok(true)
    }

    pub fn toggle(&self, id: &str) -> Result<ToggleOutcome> {
        if self.remove(id)? {
            return Ok(ToggleOutcome::Removed);
        }
        match self.add(id)? {
            AddOutcome::CapacityExceeded => Ok(ToggleOutcome::CapacityExceeded),
            AddOutcome::Added | AddOutcome::AlreadyPresent => Ok(ToggleOutcome::Added),
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        let serialized = serde_json::to_string(ids)?;
        self.store.set(COMPARE_KEY, &serialized)
    }
}

fn validate_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("school id cannot be empty".to_string()));
    }
    Ok(id)
}

/// Decode a stored list, accepting string or numeric ids.
fn parse_ids(raw: &str) -> Vec<String> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) | Err(_) => {
            log::warn!("Saved compare list is malformed; starting with an empty list");
            return Vec::new();
        }
    };

    let mut ids: Vec<String> = Vec::with_capacity(MAX_COMPARE);
    for item in items {
        let id = match item {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => continue,
        };
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.len() > MAX_COMPARE {
        log::warn!(
            "Saved compare list has {} schools; keeping the first {}",
            ids.len(),
            MAX_COMPARE
        );
        ids.truncate(MAX_COMPARE);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_list() -> CompareList<MemoryKvStore> {
        let list = CompareList::new(MemoryKvStore::new());
        for id in ["a", "b", "c", "d"] {
            assert_eq!(list.add(id).unwrap(), AddOutcome::Added);
        }
        list
    }

    #[test]
    fn test_add_twice_keeps_size() {
        let list = CompareList::new(MemoryKvStore::new());
        assert_eq!(list.add("42").unwrap(), AddOutcome::Added);
        assert_eq!(list.add("42").unwrap(), AddOutcome::AlreadyPresent);
        assert_eq!(list.ids().unwrap(), vec!["42"]);
    }

    #[test]
    fn test_fifth_add_reports_capacity_and_keeps_list() {
        let list = full_list();
        assert_eq!(list.add("e").unwrap(), AddOutcome::CapacityExceeded);
        assert_eq!(list.ids().unwrap(), vec!["a", "b", "c", "d"]);
        assert!(list.is_full().unwrap());
    }

    #[test]
    fn test_re_adding_member_of_full_list_is_not_capacity() {
        let list = full_list();
        assert_eq!(list.add("b").unwrap(), AddOutcome::AlreadyPresent);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let list = full_list();
        assert!(!list.remove("zzz").unwrap());
        assert!(list.remove("b").unwrap());
        assert_eq!(list.ids().unwrap(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_toggle_on_full_list() {
        let list = full_list();
        assert_eq!(list.toggle("e").unwrap(), ToggleOutcome::CapacityExceeded);
        assert_eq!(list.toggle("a").unwrap(), ToggleOutcome::Removed);
        assert_eq!(list.toggle("e").unwrap(), ToggleOutcome::Added);
        assert_eq!(list.ids().unwrap(), vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_clear_then_contains_is_false() {
        let list = full_list();
        list.clear().unwrap();
        assert!(list.is_empty().unwrap());
        assert!(!list.contains("a").unwrap());
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let list = CompareList::new(MemoryKvStore::new());
        assert!(matches!(list.add("  "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_stored_value_reads_as_empty() {
        let store = MemoryKvStore::new();
        store.set(COMPARE_KEY, "{not json").unwrap();
        let list = CompareList::new(store);
        assert!(list.ids().unwrap().is_empty());
        assert_eq!(list.add("1").unwrap(), AddOutcome::Added);
        assert_eq!(list.ids().unwrap(), vec!["1"]);
    }

    #[test]
    fn test_stored_value_is_normalized() {
        let store = MemoryKvStore::new();
        store
            .set(COMPARE_KEY, r#"["1", 2, "1", null, "3", "4", "5"]"#)
            .unwrap();
        let list = CompareList::new(store);
        assert_eq!(list.ids().unwrap(), vec!["1", "2", "3", "4"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Remove(u8),
        Toggle(u8),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8).prop_map(Op::Add),
            (0u8..8).prop_map(Op::Remove),
            (0u8..8).prop_map(Op::Toggle),
            Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_list_stays_unique_and_capped(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let list = CompareList::new(MemoryKvStore::new());
            for op in ops {
                match op {
                    Op::Add(id) => { list.add(&id.to_string()).unwrap(); }
                    Op::Remove(id) => { list.remove(&id.to_string()).unwrap(); }
                    Op::Toggle(id) => { list.toggle(&id.to_string()).unwrap(); }
                    Op::Clear => list.clear().unwrap(),
                }
                let ids = list.ids().unwrap();
                prop_assert!(ids.len() <= MAX_COMPARE);
                let mut deduped = ids.clone();
                deduped.sort();
                deduped.dedup();
                prop_assert_eq!(deduped.len(), ids.len());
            }
        }

        #[test]
        fn prop_toggle_twice_restores_membership(
            initial in prop::collection::vec(0u8..8, 0..4),
            id in 0u8..8,
        ) {
            let list = CompareList::new(MemoryKvStore::new());
            for existing in &initial {
                list.add(&existing.to_string()).unwrap();
            }
            let before = list.ids().unwrap();
            let id = id.to_string();

            let first = list.toggle(&id).unwrap();
            list.toggle(&id).unwrap();

            let after = list.ids().unwrap();
            let mut sorted_before = before.clone();
            sorted_before.sort();
            let mut sorted_after = after.clone();
            sorted_after.sort();
            prop_assert_eq!(sorted_before, sorted_after);
            if first == ToggleOutcome::Added {
                prop_assert_eq!(before, after);
            }
        }
    }
}
