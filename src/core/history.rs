//! Recents and favorites bookkeeping
//!
//! - `RecentConversions`: bounded, deduplicated, newest-first history
//! - `Favorites`: user-pinned unit pairs, unique by id, no eviction

use crate::shared::types::{ConversionRecord, FavoriteEntry};

/// Maximum number of recent conversions kept
pub const MAX_HISTORY_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentConversions {
    items: Vec<ConversionRecord>,
}

impl RecentConversions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted records, keeping the first `MAX_HISTORY_SIZE`
    pub fn from_records(mut items: Vec<ConversionRecord>) -> Self {
        items.truncate(MAX_HISTORY_SIZE);
        Self { items }
    }

    /// Insert at the head. An existing record for the same conversion is
    /// removed first; the oldest record falls off past the cap.
    pub fn push(&mut self, record: ConversionRecord) {
        if let Some(index) = self.items.iter().position(|item| item.same_conversion(&record)) {
            self.items.remove(index);
        }
        self.items.insert(0, record);
        self.items.truncate(MAX_HISTORY_SIZE);
    }

    pub fn get(&self, index: usize) -> Option<&ConversionRecord> {
        self.items.get(index)
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted entries, dropping repeated ids
    pub fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let mut favorites = Self::new();
        for entry in entries {
            if !favorites.contains(&entry.id) {
                favorites.entries.push(entry);
            }
        }
        favorites
    }

    /// Add the pair if absent, remove it if present.
    /// Returns `true` when the pair is now a favorite.
    pub fn toggle(&mut self, category: &str, from_unit: &str, to_unit: &str) -> bool {
        let id = FavoriteEntry::make_id(category, from_unit, to_unit);
        match self.entries.iter().position(|fav| fav.id == id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(FavoriteEntry::new(category, from_unit, to_unit));
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|fav| fav.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|fav| fav.id == id)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: f64) -> ConversionRecord {
        ConversionRecord::new("length", value, "meter", value * 3.28084, "foot")
    }

    #[test]
    fn test_most_recent_first() {
        let mut recents = RecentConversions::new();
        recents.push(record(1.0));
        recents.push(record(2.0));

        assert_eq!(recents.len(), 2);
        assert_eq!(recents.records()[0].from_value, 2.0);
        assert_eq!(recents.records()[1].from_value, 1.0);
    }

    #[test]
    fn test_max_history_size() {
        let mut recents = RecentConversions::new();
        for i in 1..=11 {
            recents.push(record(i as f64));
        }

        assert_eq!(recents.len(), MAX_HISTORY_SIZE);
        assert_eq!(recents.records()[0].from_value, 11.0);
        assert_eq!(recents.records()[9].from_value, 2.0);
        assert!(recents.records().iter().all(|r| r.from_value != 1.0));
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut recents = RecentConversions::new();
        recents.push(record(1.0));
        recents.push(record(2.0));
        recents.push(record(3.0));
        recents.push(record(1.0));

        let values: Vec<f64> = recents.records().iter().map(|r| r.from_value).collect();
        assert_eq!(values, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_same_value_different_pair_is_distinct() {
        let mut recents = RecentConversions::new();
        recents.push(record(1.0));
        recents.push(ConversionRecord::new("length", 1.0, "meter", 0.001, "kilometer"));
        assert_eq!(recents.len(), 2);
    }

    #[test]
    fn test_from_records_truncates() {
        let records: Vec<ConversionRecord> = (0..15).map(|i| record(i as f64)).collect();
        let recents = RecentConversions::from_records(records);
        assert_eq!(recents.len(), MAX_HISTORY_SIZE);
        assert_eq!(recents.get(0).unwrap().from_value, 0.0);
    }

    #[test]
    fn test_clear() {
        let mut recents = RecentConversions::new();
        recents.push(record(1.0));
        recents.clear();
        assert!(recents.is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut favorites = Favorites::new();

        assert!(favorites.toggle("length", "meter", "foot"));
        assert!(favorites.contains("length:meter:foot"));
        assert!(!favorites.toggle("length", "meter", "foot"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_direction_matters() {
        let mut favorites = Favorites::new();
        favorites.toggle("length", "meter", "foot");
        favorites.toggle("length", "foot", "meter");
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites.get("length:foot:meter").unwrap().from_unit, "foot");
    }

    #[test]
    fn test_from_entries_drops_repeated_ids() {
        let entry = FavoriteEntry::new("mass", "kilogram", "pound");
        let favorites = Favorites::from_entries(vec![entry.clone(), entry]);
        assert_eq!(favorites.len(), 1);
    }
}
