//! Name-to-color projection of the category lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::CategoryKind;

/// Color returned for names that have no registered entry.
pub const FALLBACK_COLOR: &str = "#CCCCCC";

/// Two independent name → color maps, one per category namespace.
///
/// The registry does not observe the category lists; every operation that
/// renames, recolors, adds or removes a category updates it explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryColorRegistry {
    #[serde(default)]
    spending: BTreeMap<String, String>,
    #[serde(default)]
    budget: BTreeMap<String, String>,
}

impl CategoryColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: CategoryKind, name: &str) -> &str {
        self.map(kind)
            .get(name)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn contains(&self, kind: CategoryKind, name: &str) -> bool {
        self.map(kind).contains_key(name)
    }

    pub fn set(&mut self, kind: CategoryKind, name: impl Into<String>, color: impl Into<String>) {
        self.map_mut(kind).insert(name.into(), color.into());
    }

    pub fn remove(&mut self, kind: CategoryKind, name: &str) -> Option<String> {
        self.map_mut(kind).remove(name)
    }

    /// Moves the color stored under `old_name` to `new_name`.
    pub fn rename(&mut self, kind: CategoryKind, old_name: &str, new_name: &str) {
        if old_name == new_name {
            return;
        }
        let map = self.map_mut(kind);
        if let Some(color) = map.remove(old_name) {
            map.insert(new_name.to_string(), color);
        }
    }

    /// Replaces a namespace wholesale with the given `(name, color)` pairs.
    pub fn rebuild<I, N, C>(&mut self, kind: CategoryKind, entries: I)
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let map = self.map_mut(kind);
        map.clear();
        for (name, color) in entries {
            map.insert(name.into(), color.into());
        }
    }

    pub fn entries(&self, kind: CategoryKind) -> &BTreeMap<String, String> {
        self.map(kind)
    }

    pub fn len(&self, kind: CategoryKind) -> usize {
        self.map(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.spending.is_empty() && self.budget.is_empty()
    }

    fn map(&self, kind: CategoryKind) -> &BTreeMap<String, String> {
        match kind {
            CategoryKind::Spending => &self.spending,
            CategoryKind::Budget => &self.budget,
        }
    }

    fn map_mut(&mut self, kind: CategoryKind) -> &mut BTreeMap<String, String> {
        match kind {
            CategoryKind::Spending => &mut self.spending,
            CategoryKind::Budget => &mut self.budget,
        }
    }
}
