//! Min-priority frontier for best-first searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use whroute_core::Point;

/// An entry popped from a [`Frontier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierNode<T> {
    pub item: T,
    pub priority: i32,
}

// Heap entry. Ordering ignores `item`: only (priority, seq) matter.
struct Entry<T> {
    priority: i32,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys so BinaryHeap (max-heap) pops the smallest
        // priority first, then the earliest insertion.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending search nodes ordered by priority.
///
/// [`pop_min`](Self::pop_min) always yields the lowest priority among the
/// pending nodes; equal priorities come out in insertion order. Duplicate
/// items are allowed: searches push a node again when they find it
/// cheaper and skip the stale copy later.
pub struct Frontier<T = Point> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty frontier with room for `cap` nodes.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
            next_seq: 0,
        }
    }

    /// Add `item` with the given priority.
    pub fn push(&mut self, item: T, priority: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the pending node with the lowest priority.
    pub fn pop_min(&mut self) -> Option<FrontierNode<T>> {
        self.heap.pop().map(|e| FrontierNode {
            item: e.item,
            priority: e.priority,
        })
    }

    /// Priority of the node [`pop_min`](Self::pop_min) would return next.
    pub fn peek_priority(&self) -> Option<i32> {
        self.heap.peek().map(|e| e.priority)
    }

    /// Number of pending nodes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no nodes are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending node and restart the insertion counter, keeping
    /// the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut f = Frontier::new();
        f.push(Point::new(0, 0), 7);
        f.push(Point::new(1, 0), 2);
        f.push(Point::new(2, 0), 5);
        assert_eq!(f.len(), 3);
        assert_eq!(f.peek_priority(), Some(2));
        let order: Vec<i32> = std::iter::from_fn(|| f.pop_min().map(|n| n.priority)).collect();
        assert_eq!(order, vec![2, 5, 7]);
        assert!(f.is_empty());
    }

    #[test]
    fn ties_go_to_earliest_insertion() {
        let mut f = Frontier::new();
        f.push('a', 3);
        f.push('b', 1);
        f.push('c', 3);
        f.push('d', 1);
        let order: Vec<char> = std::iter::from_fn(|| f.pop_min().map(|n| n.item)).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn not_a_fifo() {
        // Insertion order alone would yield 9 first.
        let mut f = Frontier::new();
        f.push(0usize, 9);
        f.push(1usize, 0);
        assert_eq!(f.pop_min(), Some(FrontierNode { item: 1, priority: 0 }));
    }

    #[test]
    fn clear_resets_tie_break_counter() {
        let mut f = Frontier::new();
        f.push('x', 1);
        f.push('y', 1);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.pop_min(), None);
        f.push('z', 4);
        f.push('w', 4);
        assert_eq!(f.pop_min().map(|n| n.item), Some('z'));
    }

    #[test]
    fn interleaved_push_pop() {
        let mut f = Frontier::with_capacity(4);
        f.push(1, 5);
        f.push(2, 3);
        assert_eq!(f.pop_min().map(|n| n.item), Some(2));
        f.push(3, 4);
        f.push(4, 5);
        assert_eq!(f.pop_min().map(|n| n.item), Some(3));
        assert_eq!(f.pop_min().map(|n| n.item), Some(1));
        assert_eq!(f.pop_min().map(|n| n.item), Some(4));
        assert_eq!(f.pop_min(), None);
    }

    proptest! {
        #[test]
        fn drains_in_priority_then_insertion_order(
            prios in proptest::collection::vec(-20i32..20, 0..64),
        ) {
            let mut f = Frontier::new();
            for (i, &p) in prios.iter().enumerate() {
                f.push(i, p);
            }
            let mut expected: Vec<(i32, usize)> =
                prios.iter().enumerate().map(|(i, &p)| (p, i)).collect();
            expected.sort();
            let drained: Vec<(i32, usize)> =
                std::iter::from_fn(|| f.pop_min().map(|n| (n.priority, n.item))).collect();
            prop_assert_eq!(drained, expected);
        }
    }
}
