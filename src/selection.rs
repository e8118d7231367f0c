//! Multi-select set for bulk channel operations
//!
//! Holds channel ids only; no validation against the tree happens here.
//! The store prunes entries when channels or bouquets are deleted.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: HashSet<i64>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn set_all(&mut self, ids: &[i64]) {
        self.selected = ids.iter().copied().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn remove(&mut self, id: i64) {
        self.selected.remove(&id);
    }

    pub fn contains(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut sel = SelectionManager::new();
        sel.toggle(1);
        assert!(sel.contains(1));
        sel.toggle(1);
        assert!(!sel.contains(1));
    }

    #[test]
    fn test_set_all_replaces() {
        let mut sel = SelectionManager::new();
        sel.toggle(1);
        sel.set_all(&[2, 3]);
        assert!(!sel.contains(1));
        assert_eq!(sel.len(), 2);
        sel.clear();
        assert!(sel.is_empty());
    }
}
