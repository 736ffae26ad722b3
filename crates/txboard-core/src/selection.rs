//! Selection set for bulk actions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Checked state of the "select all" header checkbox, derived from the
/// selection and the visible ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderState {
    /// Every visible id is selected
    All,
    /// No visible id is selected
    None,
    /// Some but not all visible ids are selected
    Partial,
}

impl HeaderState {
    pub fn is_checked(&self) -> bool {
        matches!(self, HeaderState::All)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, HeaderState::Partial)
    }
}

/// Transaction ids currently checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if present, insert it otherwise
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Replace the selection with exactly `ids`
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are not in `visible`
    pub fn retain_visible(&mut self, visible: &[&str]) {
        self.ids.retain(|id| visible.contains(&id.as_str()));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Header checkbox state for the given visible ids
    pub fn header_state(&self, visible: &[&str]) -> HeaderState {
        let selected = visible.iter().filter(|id| self.contains(id)).count();
        if selected == 0 {
            HeaderState::None
        } else if selected == visible.len() {
            HeaderState::All
        } else {
            HeaderState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> SelectionSet {
        let mut s = SelectionSet::new();
        s.select_all(ids.iter().copied());
        s
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut selection = set(&["a", "b"]);
        let before = selection.clone();

        selection.toggle("c");
        assert!(selection.contains("c"));
        selection.toggle("c");
        assert_eq!(selection, before);

        selection.toggle("a");
        assert!(!selection.contains("a"));
        selection.toggle("a");
        assert_eq!(selection, before);
    }

    #[test]
    fn test_select_all_replaces_prior_state() {
        let mut selection = set(&["stale", "a"]);
        selection.select_all(["a", "b", "c"]);
        assert_eq!(selection.ids(), vec!["a", "b", "c"]);

        selection.select_all(Vec::<String>::new());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut selection = set(&["a", "b"]);
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn test_retain_visible() {
        let mut selection = set(&["a", "b", "gone"]);
        selection.retain_visible(&["a", "b", "c"]);
        assert_eq!(selection.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_header_state() {
        let visible = ["a", "b", "c"];
        assert_eq!(set(&[]).header_state(&visible), HeaderState::None);
        assert_eq!(set(&["x"]).header_state(&visible), HeaderState::None);
        assert_eq!(set(&["a"]).header_state(&visible), HeaderState::Partial);
        assert_eq!(set(&["a", "b", "c"]).header_state(&visible), HeaderState::All);
        assert_eq!(set(&["a", "b", "c", "x"]).header_state(&visible), HeaderState::All);
        assert_eq!(set(&["a"]).header_state(&[]), HeaderState::None);

        assert!(HeaderState::All.is_checked());
        assert!(HeaderState::Partial.is_indeterminate());
        assert!(!HeaderState::None.is_checked());
    }
}
