//! Arena-backed circular doubly-linked sequence.
//!
//! Nodes live in a single `Vec` and refer to each other by index, so splicing
//! is index relinking rather than pointer surgery. Slot 0 is a sentinel header
//! whose `next`/`prev` close the ring: walking forward from the header visits
//! every element in order and arrives back at the header, never at a null end.

use std::iter::FusedIterator;

/// Index of the sentinel header in every arena.
const HEAD: usize = 0;

/// Handle to a node stored in a [`RingArena`].
///
/// Handles stay valid across splices and insertions elsewhere in the ring.
/// Using a handle after its node has been removed is a logic error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    /// Raw slot index inside the arena.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A run of linked nodes that has been allocated but not yet spliced into
/// the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chain {
    pub first: NodeHandle,
    pub last: NodeHandle,
    pub len: usize,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// A circular doubly-linked sequence stored in an arena.
///
/// Splicing a prepared [`Chain`] after a known node is O(1). Locating the
/// node at an integer position walks the ring from the header in whichever
/// direction is shorter, which is O(n) in the worst case.
#[derive(Debug, Clone)]
pub struct RingArena<T> {
    nodes: Vec<Node<T>>,
    /// Slots released by `remove`, reused before the vector grows.
    free: Vec<usize>,
    /// Number of nodes currently in the ring (header excluded).
    len: usize,
}

impl<T: Default> RingArena<T> {
    /// Create an empty ring holding only the header.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty ring with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node {
            value: T::default(),
            prev: HEAD,
            next: HEAD,
        });
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T: Default> Default for RingArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> FromIterator<T> for RingArena<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            ring.push_back(value);
        }
        ring
    }
}

impl<T> RingArena<T> {
    /// Number of elements in the ring.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The sentinel header. Inserting after it prepends.
    #[inline(always)]
    pub const fn head(&self) -> NodeHandle {
        NodeHandle(HEAD)
    }

    #[inline]
    pub fn next(&self, node: NodeHandle) -> NodeHandle {
        NodeHandle(self.nodes[node.0].next)
    }

    #[inline]
    pub fn prev(&self, node: NodeHandle) -> NodeHandle {
        NodeHandle(self.nodes[node.0].prev)
    }

    /// Value stored at `node`. The header holds `T::default()`.
    #[inline]
    pub fn get(&self, node: NodeHandle) -> &T {
        &self.nodes[node.0].value
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeHandle) -> &mut T {
        &mut self.nodes[node.0].value
    }

    /// Append `value` at the end of the ring.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let last = self.prev(self.head());
        self.insert_after(last, value)
    }

    /// Insert a single `value` immediately after `at`.
    pub fn insert_after(&mut self, at: NodeHandle, value: T) -> NodeHandle {
        let node = self.alloc(value);
        self.splice_after(
            at,
            Chain {
                first: node,
                last: node,
                len: 1,
            },
        );
        node
    }

    /// Allocate a detached chain holding `values` in order.
    ///
    /// Returns `None` when `values` is empty. The chain is not part of the
    /// ring until passed to [`splice_after`](Self::splice_after).
    pub fn build_chain<I: IntoIterator<Item = T>>(&mut self, values: I) -> Option<Chain> {
        let mut values = values.into_iter();
        let first = self.alloc(values.next()?);
        let mut last = first;
        let mut len = 1;
        for value in values {
            let node = self.alloc(value);
            self.nodes[last.0].next = node.0;
            self.nodes[node.0].prev = last.0;
            last = node;
            len += 1;
        }
        Some(Chain { first, last, len })
    }

    /// Link `chain` into the ring directly after `at`. O(1).
    pub fn splice_after(&mut self, at: NodeHandle, chain: Chain) {
        let after = self.nodes[at.0].next;
        self.nodes[chain.first.0].prev = at.0;
        self.nodes[chain.last.0].next = after;
        self.nodes[at.0].next = chain.first.0;
        self.nodes[after].prev = chain.last.0;
        self.len += chain.len;
    }

    /// Unlink `node` and release its slot for reuse.
    ///
    /// Returns `None` for the header, which can never be removed.
    pub fn remove(&mut self, node: NodeHandle) -> Option<T>
    where
        T: Default,
    {
        if node.0 == HEAD {
            return None;
        }
        let (prev, next) = (self.nodes[node.0].prev, self.nodes[node.0].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[node.0].prev = node.0;
        self.nodes[node.0].next = node.0;
        self.free.push(node.0);
        self.len -= 1;
        Some(std::mem::take(&mut self.nodes[node.0].value))
    }

    /// Locate the node at 0-based position `index`.
    ///
    /// Walks from the header toward the nearer end of the ring.
    pub fn node_at(&self, index: usize) -> Option<NodeHandle> {
        if index >= self.len {
            return None;
        }
        let mut cursor = HEAD;
        if index < self.len / 2 {
            for _ in 0..=index {
                cursor = self.nodes[cursor].next;
            }
        } else {
            for _ in 0..(self.len - index) {
                cursor = self.nodes[cursor].prev;
            }
        }
        Some(NodeHandle(cursor))
    }

    /// Follow `next` links from `from` (inclusive) for `count` nodes.
    pub fn walk(&self, from: NodeHandle, count: usize) -> Walk<'_, T> {
        Walk {
            ring: self,
            cursor: from.0,
            remaining: count,
        }
    }

    /// Iterate over the values in ring order starting after the header.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            walk: self.walk(self.next(self.head()), self.len),
        }
    }

    fn alloc(&mut self, value: T) -> NodeHandle {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Node {
                    value,
                    prev: slot,
                    next: slot,
                };
                NodeHandle(slot)
            }
            None => {
                let slot = self.nodes.len();
                self.nodes.push(Node {
                    value,
                    prev: slot,
                    next: slot,
                });
                NodeHandle(slot)
            }
        }
    }
}

/// Iterator over node handles produced by [`RingArena::walk`].
pub struct Walk<'a, T> {
    ring: &'a RingArena<T>,
    cursor: usize,
    remaining: usize,
}

impl<T> Iterator for Walk<'_, T> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = NodeHandle(self.cursor);
        self.cursor = self.ring.nodes[self.cursor].next;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Walk<'_, T> {}
impl<T> FusedIterator for Walk<'_, T> {}

/// Iterator over the values of a [`RingArena`] in ring order.
pub struct Iter<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let ring = self.walk.ring;
        self.walk.next().map(|node| ring.get(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(ring: &RingArena<u32>) -> Vec<u32> {
        ring.iter().copied().collect()
    }

    #[test]
    fn test_new_ring_is_closed() {
        let ring: RingArena<u32> = RingArena::new();
        let head = ring.head();
        assert!(ring.is_empty());
        assert_eq!(ring.next(head), head);
        assert_eq!(ring.prev(head), head);
        assert_eq!(ring.node_at(0), None);
    }

    #[test]
    fn test_push_back_order() {
        let ring: RingArena<u32> = (1..=5).collect();
        assert_eq!(ring.len(), 5);
        assert_eq!(collect(&ring), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_last_node_wraps_to_head() {
        let ring: RingArena<u32> = (1..=3).collect();
        let last = ring.prev(ring.head());
        assert_eq!(*ring.get(last), 3);
        assert_eq!(ring.next(last), ring.head());
    }

    #[test]
    fn test_node_at_both_directions() {
        let ring: RingArena<u32> = (0..10).collect();
        for i in 0..10 {
            let node = ring.node_at(i).unwrap();
            assert_eq!(*ring.get(node), i as u32);
        }
        assert_eq!(ring.node_at(10), None);
    }

    #[test]
    fn test_splice_chain_in_middle() {
        let mut ring: RingArena<u32> = [1, 2, 5].into_iter().collect();
        let chain = ring.build_chain([3, 4]).unwrap();
        assert_eq!(chain.len, 2);
        // Detached chains do not count toward the ring length.
        assert_eq!(ring.len(), 3);

        let at = ring.node_at(1).unwrap();
        ring.splice_after(at, chain);
        assert_eq!(ring.len(), 5);
        assert_eq!(collect(&ring), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_splice_after_head_prepends() {
        let mut ring: RingArena<u32> = [3].into_iter().collect();
        let chain = ring.build_chain([1, 2]).unwrap();
        let head = ring.head();
        ring.splice_after(head, chain);
        assert_eq!(collect(&ring), vec![1, 2, 3]);
    }

    #[test]
    fn test_splice_into_empty_ring() {
        let mut ring: RingArena<u32> = RingArena::new();
        let chain = ring.build_chain([7, 8]).unwrap();
        let head = ring.head();
        ring.splice_after(head, chain);
        assert_eq!(collect(&ring), vec![7, 8]);
        assert_eq!(ring.next(chain.last), ring.head());
        assert_eq!(ring.prev(chain.first), ring.head());
    }

    #[test]
    fn test_build_chain_empty() {
        let mut ring: RingArena<u32> = RingArena::new();
        assert!(ring.build_chain(std::iter::empty()).is_none());
    }

    #[test]
    fn test_handles_survive_splices() {
        let mut ring: RingArena<u32> = [10, 20].into_iter().collect();
        let second = ring.node_at(1).unwrap();
        let chain = ring.build_chain([1, 2, 3]).unwrap();
        let head = ring.head();
        ring.splice_after(head, chain);

        *ring.get_mut(second) = 99;
        assert_eq!(collect(&ring), vec![1, 2, 3, 10, 99]);
    }

    #[test]
    fn test_walk_follows_links() {
        let ring: RingArena<u32> = (0..6).collect();
        let start = ring.node_at(2).unwrap();
        let values: Vec<u32> = ring.walk(start, 3).map(|n| *ring.get(n)).collect();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[test]
    fn test_remove_reuses_slot() {
        let mut ring: RingArena<u32> = (1..=4).collect();
        let node = ring.node_at(1).unwrap();
        assert_eq!(ring.remove(node), Some(2));
        assert_eq!(ring.len(), 3);
        assert_eq!(collect(&ring), vec![1, 3, 4]);

        let reused = ring.push_back(5);
        assert_eq!(reused.index(), node.index());
        assert_eq!(collect(&ring), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_remove_head_is_refused() {
        let mut ring: RingArena<u32> = (1..=2).collect();
        let head = ring.head();
        assert_eq!(ring.remove(head), None);
        assert_eq!(ring.len(), 2);
    }
}
