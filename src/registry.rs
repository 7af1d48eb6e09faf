use std::io::{self, Write};

use tracing::{debug, info, warn};

use crate::avl::AvlTree;
use crate::ranking::{RankKey, RankingQueue};
use crate::record::{Faculty, FacultyId};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id was already registered; nothing changed.
    Duplicate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub added: usize,
    pub duplicates: usize,
}

/// Application state: one owning store plus two id-keyed views over it.
#[derive(Debug, Default)]
pub struct Registry {
    store: RecordStore,
    ranking: RankingQueue,
    index: AvlTree<FacultyId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the store, the ranking queue and the sorted index.
    ///
    /// A duplicate id is rejected before any container is touched, so the
    /// first record registered under an id is the one that stays.
    pub fn add(&mut self, faculty: Faculty) -> AddOutcome {
        if self.store.contains(faculty.id) {
            warn!(id = faculty.id, "faculty id already registered, ignoring");
            return AddOutcome::Duplicate;
        }

        let id = faculty.id;
        self.index.insert(id);
        self.ranking.push(RankKey::from(&faculty));
        self.store.insert(faculty);

        debug!(
            id,
            records = self.store.len(),
            index_height = self.index.height(),
            "added faculty"
        );
        AddOutcome::Added
    }

    pub fn seed(&mut self, records: impl IntoIterator<Item = Faculty>) -> SeedSummary {
        let mut summary = SeedSummary::default();
        for faculty in records {
            match self.add(faculty) {
                AddOutcome::Added => summary.added += 1,
                AddOutcome::Duplicate => summary.duplicates += 1,
            }
        }
        info!(
            added = summary.added,
            duplicates = summary.duplicates,
            "seeded registry"
        );
        summary
    }

    pub fn get(&self, id: FacultyId) -> Option<&Faculty> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn index(&self) -> &AvlTree<FacultyId> {
        &self.index
    }

    /// Records in ascending id order.
    pub fn sorted(&self) -> impl Iterator<Item = &Faculty> + '_ {
        self.index.iter().filter_map(|id| self.store.get(*id))
    }

    /// Records by recruitment priority. The live queue is not consumed.
    pub fn ranked(&self) -> impl Iterator<Item = &Faculty> + '_ {
        self.ranking
            .sorted()
            .filter_map(|key| self.store.get(key.id))
    }

    pub fn write_sorted<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for faculty in self.sorted() {
            writeln!(out, "ID: {}, Name: {}", faculty.id, faculty.name)?;
        }
        Ok(())
    }

    pub fn write_ranking<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for faculty in self.ranked() {
            writeln!(
                out,
                "Name: {}, Experience: {} years",
                faculty.name, faculty.experience
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.seed([
            Faculty::new(30, "Carol", "PhD", 12),
            Faculty::new(20, "Bob", "MSc", 5),
            Faculty::new(40, "Dan", "PhD", 20),
            Faculty::new(10, "Alice", "BSc", 1),
        ]);
        registry
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_populates_all_views() {
        let registry = sample();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.index().len(), 4);
        assert_eq!(registry.ranked().count(), 4);
        assert_eq!(registry.get(20).map(|f| f.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_sorted_by_id() {
        let registry = sample();
        let ids: Vec<_> = registry.sorted().map(|f| f.id).collect();
        assert_eq!(ids, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_ranked_by_experience() {
        let registry = sample();
        let names: Vec<_> = registry.ranked().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Dan", "Carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_duplicate_keeps_first_record() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.add(Faculty::new(7, "First", "PhD", 3)),
            AddOutcome::Added
        );
        let before = render(|out| registry.write_sorted(out));

        assert_eq!(
            registry.add(Faculty::new(7, "Second", "MSc", 30)),
            AddOutcome::Duplicate
        );

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(7).map(|f| f.name.as_str()), Some("First"));
        assert_eq!(registry.ranked().count(), 1);
        assert_eq!(render(|out| registry.write_sorted(out)), before);
    }

    #[test]
    fn test_seed_counts_duplicates() {
        let mut registry = Registry::new();
        let summary = registry.seed([
            Faculty::new(1, "A", "PhD", 1),
            Faculty::new(1, "B", "PhD", 2),
            Faculty::new(2, "C", "PhD", 3),
        ]);
        assert_eq!(
            summary,
            SeedSummary {
                added: 2,
                duplicates: 1
            }
        );
    }

    #[test]
    fn test_reports_format() {
        let registry = sample();

        assert_eq!(
            render(|out| registry.write_sorted(out)),
            "ID: 10, Name: Alice\nID: 20, Name: Bob\nID: 30, Name: Carol\nID: 40, Name: Dan\n"
        );
        assert_eq!(
            render(|out| registry.write_ranking(out)),
            "Name: Dan, Experience: 20 years\n\
             Name: Carol, Experience: 12 years\n\
             Name: Bob, Experience: 5 years\n\
             Name: Alice, Experience: 1 years\n"
        );
    }

    #[test]
    fn test_reports_are_repeatable() {
        let registry = sample();
        let first = render(|out| registry.write_ranking(out));
        let second = render(|out| registry.write_ranking(out));
        assert_eq!(first, second);
        assert_eq!(
            render(|out| registry.write_sorted(out)),
            render(|out| registry.write_sorted(out))
        );
    }

    #[test]
    fn test_empty_reports() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(render(|out| registry.write_sorted(out)), "");
        assert_eq!(render(|out| registry.write_ranking(out)), "");
    }
}
