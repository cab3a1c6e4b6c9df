//! Indexed binary min-heap for the A* open set. Alongside the heap array it
//! keeps, for every node id, the slot that node currently occupies, so the
//! search can ask "is this node queued, and where" in constant time and lower
//! its key in place.

use crate::io::NodeIndex;

/// An entry in the priority queue. Ordered by `fscore`, smallest first. We
/// also remember the G score the node was queued with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PQEntry {
    pub node_id: NodeIndex,
    pub fscore: f64,
    pub gscore: f64,
}

#[derive(Debug)]
pub struct IndexedMinQueue {
    heap: Vec<PQEntry>,
    /// `position[id]` is the heap slot of node `id`, or `None` if it isn't
    /// queued.
    position: Vec<Option<usize>>,
}

impl IndexedMinQueue {
    /// Create an empty queue for node ids in `0..num_nodes`.
    pub fn new(num_nodes: usize) -> Self {
        IndexedMinQueue {
            heap: Vec::new(),
            position: vec![None; num_nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node_id: NodeIndex) -> bool {
        self.position[node_id].is_some()
    }

    /// Add a node that isn't queued yet.
    ///
    /// # Panics
    ///
    /// If the node is already in the queue. Use [`decrease_key`] for those.
    ///
    /// [`decrease_key`]: IndexedMinQueue::decrease_key
    pub fn insert(&mut self, entry: PQEntry) {
        assert!(
            !self.contains(entry.node_id),
            "node {} is already queued",
            entry.node_id
        );
        let slot = self.heap.len();
        self.heap.push(entry);
        self.position[entry.node_id] = Some(slot);
        self.sift_up(slot);
    }

    /// Remove and return the entry with the smallest F score, or `None` if
    /// the queue is empty.
    pub fn extract_min(&mut self) -> Option<PQEntry> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap_entries(0, last);
        let min = self.heap.pop()?;
        self.position[min.node_id] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Replace the entry for an already queued node with one whose F score is
    /// no larger, and restore heap order.
    ///
    /// Only decreases are supported, which is all A* ever needs: a node is
    /// requeued only after a strictly cheaper path to it was found, and its
    /// H score never changes.
    ///
    /// # Panics
    ///
    /// If the node is not in the queue. In debug builds, also if the new F
    /// score is larger than the old one.
    pub fn decrease_key(&mut self, entry: PQEntry) {
        let slot = match self.position[entry.node_id] {
            Some(slot) => slot,
            None => panic!("node {} is not queued", entry.node_id),
        };
        debug_assert!(
            entry.fscore <= self.heap[slot].fscore,
            "decrease_key would raise node {} from {} to {}",
            entry.node_id,
            self.heap[slot].fscore,
            entry.fscore
        );
        self.heap[slot] = entry;
        self.sift_up(slot);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].fscore >= self.heap[parent].fscore {
                break;
            }
            self.swap_entries(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;
            // Strict comparisons: on ties the lower slot wins.
            if left < len && self.heap[left].fscore < self.heap[smallest].fscore {
                smallest = left;
            }
            if right < len && self.heap[right].fscore < self.heap[smallest].fscore {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_entries(slot, smallest);
            slot = smallest;
        }
    }

    /// Swap two heap slots and keep the position index in step.
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].node_id] = Some(a);
        self.position[self.heap[b].node_id] = Some(b);
    }

    /// Panic unless the heap is ordered and the position index matches it.
    #[cfg(test)]
    fn assert_consistent(&self) {
        for (slot, entry) in self.heap.iter().enumerate() {
            assert_eq!(self.position[entry.node_id], Some(slot));
            if slot > 0 {
                assert!(self.heap[(slot - 1) / 2].fscore <= entry.fscore);
            }
        }
        let queued = self.position.iter().filter(|p| p.is_some()).count();
        assert_eq!(queued, self.heap.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node_id: NodeIndex, fscore: f64) -> PQEntry {
        PQEntry {
            node_id,
            fscore,
            gscore: fscore,
        }
    }

    fn drain(queue: &mut IndexedMinQueue) -> Vec<PQEntry> {
        let mut out = Vec::new();
        while let Some(e) = queue.extract_min() {
            queue.assert_consistent();
            out.push(e);
        }
        out
    }

    #[test]
    fn extracts_in_order() {
        let mut queue = IndexedMinQueue::new(5);
        for (id, f) in [(0, 10.0), (1, 3.0), (2, 7.0), (3, 3.5), (4, 0.0)] {
            queue.insert(entry(id, f));
            queue.assert_consistent();
        }
        assert_eq!(queue.len(), 5);

        let ids: Vec<_> = drain(&mut queue).iter().map(|e| e.node_id).collect();
        assert_eq!(ids, vec![4, 1, 3, 2, 0]);
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(), None);
    }

    #[test]
    fn tracks_membership() {
        let mut queue = IndexedMinQueue::new(3);
        assert!(!queue.contains(1));
        queue.insert(entry(1, 2.0));
        queue.insert(entry(2, 1.0));
        assert!(queue.contains(1));
        assert!(!queue.contains(0));

        assert_eq!(queue.extract_min().map(|e| e.node_id), Some(2));
        assert!(!queue.contains(2));
        assert!(queue.contains(1));

        // Extracted nodes can come back.
        queue.insert(entry(2, 5.0));
        assert!(queue.contains(2));
        queue.assert_consistent();
    }

    #[test]
    fn decrease_key_moves_entry_up() {
        let mut queue = IndexedMinQueue::new(4);
        for (id, f) in [(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)] {
            queue.insert(entry(id, f));
        }
        queue.decrease_key(entry(3, 0.5));
        queue.assert_consistent();
        queue.decrease_key(entry(2, 1.5));
        queue.assert_consistent();

        let drained = drain(&mut queue);
        let ids: Vec<_> = drained.iter().map(|e| e.node_id).collect();
        assert_eq!(ids, vec![3, 0, 2, 1]);
        assert_eq!(drained[0].fscore, 0.5);
    }

    #[test]
    fn mixed_operations_stay_sorted() {
        // Deterministic pseudo-random workload.
        let n = 64;
        let mut queue = IndexedMinQueue::new(n);
        let mut keys = vec![f64::INFINITY; n];
        let mut state = 12345u64;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };

        for _ in 0..500 {
            let id = next() % n;
            let key = (next() % 1000) as f64;
            if !queue.contains(id) {
                keys[id] = key;
                queue.insert(entry(id, key));
            } else if key < keys[id] {
                keys[id] = key;
                queue.decrease_key(entry(id, key));
            }
            queue.assert_consistent();
        }

        let drained = drain(&mut queue);
        assert!(drained.windows(2).all(|w| w[0].fscore <= w[1].fscore));
        for e in drained {
            assert_eq!(e.fscore, keys[e.node_id]);
        }
    }

    #[test]
    fn ties_go_to_lower_slot() {
        // After the root leaves, node 3 sinks and must swap with the left
        // child (node 1), not the equal right one (node 2).
        let mut queue = IndexedMinQueue::new(4);
        for (id, f) in [(0, 0.0), (1, 2.0), (2, 2.0), (3, 5.0)] {
            queue.insert(entry(id, f));
        }
        let ids: Vec<_> = drain(&mut queue).iter().map(|e| e.node_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        // Equal keys everywhere: the last slot moves to the root and stays.
        let mut queue = IndexedMinQueue::new(3);
        for id in 0..3 {
            queue.insert(entry(id, 1.0));
        }
        let ids: Vec<_> = drain(&mut queue).iter().map(|e| e.node_id).collect();
        assert_eq!(ids, vec![0, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn double_insert_panics() {
        let mut queue = IndexedMinQueue::new(2);
        queue.insert(entry(0, 1.0));
        queue.insert(entry(0, 0.5));
    }

    #[test]
    #[should_panic(expected = "not queued")]
    fn decrease_absent_panics() {
        let mut queue = IndexedMinQueue::new(2);
        queue.decrease_key(entry(1, 0.5));
    }
}
