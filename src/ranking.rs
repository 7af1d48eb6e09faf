use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::record::{Faculty, FacultyId};

/// Handle into the record store, ordered for recruitment priority.
///
/// More experience ranks higher. Equal experience falls back to the
/// smaller id, so the ranking is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    pub experience: u32,
    pub id: FacultyId,
}

impl From<&Faculty> for RankKey {
    fn from(faculty: &Faculty) -> Self {
        RankKey {
            experience: faculty.experience,
            id: faculty.id,
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.experience
            .cmp(&other.experience)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap of rank keys; the top is the next faculty to recruit.
#[derive(Debug, Clone, Default)]
pub struct RankingQueue {
    heap: BinaryHeap<RankKey>,
}

impl RankingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: RankKey) {
        self.heap.push(key);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Highest priority first. Pops from a throwaway copy, so the live
    /// heap keeps every entry.
    pub fn sorted(&self) -> impl Iterator<Item = RankKey> {
        let mut copy = self.heap.clone();
        std::iter::from_fn(move || copy.pop())
    }
}
