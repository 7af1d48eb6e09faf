use rustc_hash::FxHashMap;

use crate::record::{Faculty, FacultyId};

/// Owning map from faculty id to record.
///
/// The sorted index and the ranking queue only hold ids and look the
/// records up here.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: FxHashMap<FacultyId, Faculty>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by id, returning the previous record.
    pub fn insert(&mut self, faculty: Faculty) -> Option<Faculty> {
        self.records.insert(faculty.id, faculty)
    }

    pub fn get(&self, id: FacultyId) -> Option<&Faculty> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: FacultyId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = RecordStore::new();
        assert!(store.is_empty());

        assert_eq!(store.insert(Faculty::new(1, "Ada", "PhD", 10)), None);
        assert_eq!(store.len(), 1);
        assert!(store.contains(1));
        assert_eq!(store.get(1).map(|f| f.name.as_str()), Some("Ada"));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut store = RecordStore::new();
        store.insert(Faculty::new(1, "Ada", "PhD", 10));

        let previous = store.insert(Faculty::new(1, "Grace", "MSc", 4));

        assert_eq!(previous.map(|f| f.name), Some("Ada".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).map(|f| f.name.as_str()), Some("Grace"));
    }
}
