//! Ordered collection of overlays and its persistence
//!
//! Insertion order is draw order and hit-test priority: when boxes overlap,
//! the earliest record wins.

use super::record::OverlayRecord;
use crate::core::config_file::{PreferenceStore, SETTINGS_KEY};
use crate::error::{OverlayError, Result};
use kurbo::Point;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayRegistry {
    records: Vec<OverlayRecord>,
    selected: Option<usize>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<OverlayRecord>) -> Self {
        Self {
            records,
            selected: None,
        }
    }

    /// Rebuild the registry from the preference store
    ///
    /// A missing key yields an empty registry. Each stored mapping is
    /// rebuilt field by field; the first entry that cannot be rebuilt
    /// aborts the load with [`OverlayError::CorruptSettings`].
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let Some(value) = store.get(SETTINGS_KEY) else {
            debug!("No stored reference overlays, starting empty");
            return Ok(Self::new());
        };

        let entries: Vec<Value> = serde_json::from_value(value)
            .map_err(|source| OverlayError::CorruptSettings {
                index: None,
                source,
            })?;

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry).map_err(|source| OverlayError::CorruptSettings {
                    index: Some(index),
                    source,
                })
            })
            .collect::<Result<Vec<OverlayRecord>>>()?;

        info!("Loaded {} reference overlays", records.len());
        Ok(Self::from_records(records))
    }

    /// Write every record, in order, over the stored value
    pub fn persist(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        let entries: Vec<Value> = self.records.iter().map(OverlayRecord::to_value).collect();
        store.set(SETTINGS_KEY, Value::Array(entries))?;
        info!("Saved {} reference overlays", self.records.len());
        Ok(())
    }

    /// Append a default record for the given family and style
    pub fn append(&mut self, font_family: impl Into<String>, font_style: impl Into<String>) -> usize {
        let record = OverlayRecord::new(font_family).with_style(font_style);
        debug!("Adding reference overlay {}", record);
        self.push(record)
    }

    /// Append an already configured record, returning its index
    pub fn push(&mut self, record: OverlayRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Remove the record at `index`; later records shift down by one
    pub fn remove_at(&mut self, index: usize) -> Option<OverlayRecord> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        debug!("Removed reference overlay {} at {}", removed, index);
        Some(removed)
    }

    /// Set the selection; an out-of-range index clears it
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.records.len());
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&OverlayRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut OverlayRecord> {
        self.selected.and_then(|i| self.records.get_mut(i))
    }

    /// Index of the first record whose footprint contains `point`
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.records.iter().position(|record| record.point_inside(point))
    }

    pub fn get(&self, index: usize) -> Option<&OverlayRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut OverlayRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[OverlayRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OverlayRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a OverlayRegistry {
    type Item = &'a OverlayRecord;
    type IntoIter = std::slice::Iter<'a, OverlayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_file::MemoryStore;
    use crate::overlay::Rgba;
    use serde_json::json;

    fn overlapping() -> OverlayRegistry {
        OverlayRegistry::from_records(vec![
            OverlayRecord::new("A").with_size(100.0).with_position(0.0, 0.0),
            OverlayRecord::new("B").with_size(100.0).with_position(50.0, 50.0),
        ])
    }

    #[test]
    fn test_hit_test_prefers_first_added() {
        let registry = overlapping();
        assert_eq!(registry.hit_test(Point::new(60.0, 60.0)), Some(0));
        assert_eq!(registry.hit_test(Point::new(140.0, 140.0)), Some(1));
        assert_eq!(registry.hit_test(Point::new(-1.0, 0.0)), None);
    }

    #[test]
    fn test_hit_test_empty_registry() {
        assert_eq!(OverlayRegistry::new().hit_test(Point::ORIGIN), None);
    }

    #[test]
    fn test_remove_at_shifts_later_records() {
        let mut registry = overlapping();
        let second = registry.get(1).cloned();
        let removed = registry.remove_at(0);
        assert_eq!(removed.map(|r| r.font_family), Some("A".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).cloned(), second);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut registry = overlapping();
        assert!(registry.remove_at(2).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_selection_follows_removal() {
        let mut registry = overlapping();
        registry.append("C", "");

        registry.select(Some(2));
        registry.remove_at(0);
        assert_eq!(registry.selected_index(), Some(1));
        assert_eq!(registry.selected().map(|r| r.font_family.as_str()), Some("C"));

        registry.remove_at(1);
        assert_eq!(registry.selected_index(), None);

        registry.select(Some(7));
        assert_eq!(registry.selected_index(), None);
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = MemoryStore::default();
        let registry = OverlayRegistry::load(&store).expect("load");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let mut registry = OverlayRegistry::new();
        registry.append("Arial", "");
        registry.append("Hiragino Sans", "W6");
        registry.append("Menlo", "Regular");
        registry.remove_at(2);
        if let Some(record) = registry.get_mut(1) {
            record.color = Rgba::new(1.0, 0.0, 0.5, 0.25);
            record.set_position(Point::new(12.0, -40.0));
        }

        let mut store = MemoryStore::default();
        registry.persist(&mut store).expect("persist");
        let loaded = OverlayRegistry::load(&store).expect("load");
        assert_eq!(loaded.records(), registry.records());
    }

    #[test]
    fn test_persist_overwrites_previous_value() {
        let mut store = MemoryStore::default();
        overlapping().persist(&mut store).expect("persist");
        OverlayRegistry::new().persist(&mut store).expect("persist");
        assert_eq!(store.get(SETTINGS_KEY), Some(json!([])));
    }

    #[test]
    fn test_load_reports_corrupt_entry_index() {
        let mut store = MemoryStore::default();
        store
            .set(
                SETTINGS_KEY,
                json!([{"fontFamily": "Arial"}, {"fontFamily": "Menlo", "bogus": 1}]),
            )
            .expect("set");

        match OverlayRegistry::load(&store) {
            Err(OverlayError::CorruptSettings { index, .. }) => assert_eq!(index, Some(1)),
            other => panic!("expected corrupt settings, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_missing_family_and_non_array() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, json!([{"size": 12}])).expect("set");
        assert!(matches!(
            OverlayRegistry::load(&store),
            Err(OverlayError::CorruptSettings { index: Some(0), .. })
        ));

        store.set(SETTINGS_KEY, json!({"fontFamily": "Arial"})).expect("set");
        assert!(matches!(
            OverlayRegistry::load(&store),
            Err(OverlayError::CorruptSettings { index: None, .. })
        ));
    }
}
