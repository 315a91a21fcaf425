//! The working parameter map and the parameter collector.
//!
//! # Design
//! `ParamMap` is the per-call mutable set of name→value pairs flowing from
//! collection through templating to final request construction. It is an
//! ordered map over `Vec<(String, String)>` with unique keys: order matters
//! because the remaining entries become the request's query string or form
//! body in declaration order, and removal matters because the URL templater
//! consumes entries destructively so a templated name is never re-emitted as
//! a request parameter. Lifecycle is exactly one call.

use std::fmt;

use crate::metadata::ParamBinding;

/// Ordered name→value map with unique keys, scoped to a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove and return the value under `name`. Consumption is destructive:
    /// once removed, the entry will not reappear in the outgoing parameters.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The remaining entries as ordered pairs, ready for the dispatcher.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Build the working parameter map from the method's arguments.
///
/// For each binding whose argument is present (`Some`), the value is
/// stringified via `Display` and inserted under the logical name. A `None`
/// argument skips its binding entirely — no empty-string placeholder — so
/// callers omit optional fields by passing `None`. Bindings pointing past
/// the end of the argument slice are skipped the same way.
pub fn collect(bindings: &[ParamBinding], args: &[Option<&dyn fmt::Display>]) -> ParamMap {
    let mut map = ParamMap::new();
    for binding in bindings {
        if let Some(Some(arg)) = args.get(binding.index) {
            map.insert(binding.name.as_str(), arg.to_string());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(names: &[&str]) -> Vec<ParamBinding> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| ParamBinding {
                name: (*name).to_string(),
                index,
            })
            .collect()
    }

    #[test]
    fn collect_stringifies_in_binding_order() {
        let bindings = bindings(&["id", "limit"]);
        let map = collect(&bindings, &[Some(&42), Some(&"10")]);
        assert_eq!(map.pairs(), &[
            ("id".to_string(), "42".to_string()),
            ("limit".to_string(), "10".to_string()),
        ]);
    }

    #[test]
    fn null_argument_never_enters_the_map() {
        let bindings = bindings(&["id", "filter"]);
        let map = collect(&bindings, &[Some(&7), None]);
        assert!(!map.contains("filter"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn out_of_range_binding_is_skipped() {
        let bindings = vec![ParamBinding {
            name: "ghost".to_string(),
            index: 5,
        }];
        let map = collect(&bindings, &[Some(&1)]);
        assert!(map.is_empty());
    }

    #[test]
    fn remove_is_destructive() {
        let mut map = ParamMap::new();
        map.insert("id", "42");
        map.insert("name", "Ann");
        assert_eq!(map.remove("id").as_deref(), Some("42"));
        assert_eq!(map.remove("id"), None);
        assert_eq!(map.pairs(), &[("name".to_string(), "Ann".to_string())]);
    }

    #[test]
    fn insert_replaces_existing_value_keeping_position() {
        let mut map = ParamMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");
        assert_eq!(map.pairs(), &[
            ("a".to_string(), "3".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
    }
}
