//! Stable min-priority queue used by Dijkstra and A*.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use labyrinth_core::Cell;

/// Heap entry ordered by `priority`, then by insertion sequence.
#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: f64,
    seq: u64,
    cell: Cell,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority, and
        // among equal priorities the earliest push.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Open set for the cost-aware searches.
///
/// Pops the lowest priority first; ties pop in insertion order so that two
/// runs over the same input expand cells in the same order.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cell` with the given priority. Duplicates are allowed.
    pub fn push(&mut self, priority: f64, cell: Cell) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            cell,
        });
    }

    /// Remove and return the lowest-priority entry.
    pub fn pop(&mut self) -> Option<(f64, Cell)> {
        self.heap.pop().map(|e| (e.priority, e.cell))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
