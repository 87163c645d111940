//! LRU List Module
//!
//! Access-order list backing the cache's eviction policy.
//!
//! Nodes live in a slot arena and link to each other by slot index. Each
//! slot carries a generation that is bumped when its node is removed, so a
//! handle stays valid exactly until its node is removed:
//! - Front = Most recently used
//! - Back = Least recently used
//!
//! `push_front`, `move_to_front`, `remove` and `pop_back` are all O(1).

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

impl NodeId {
    /// Returns the arena slot this handle points to.
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Doubly linked list stored in a slot arena.
///
/// Freed slots are recycled by later pushes. Handles to removed nodes are
/// rejected rather than aliasing whatever reuses the slot: every lookup
/// compares the handle's generation with the slot's.
#[derive(Debug)]
pub struct LruList<T> {
    /// Arena slots, `None` when free
    slots: Vec<Option<Node<T>>>,
    /// Per-slot generation, bumped on removal
    generations: Vec<u64>,
    /// Indices of free slots
    free: Vec<usize>,
    /// Most recently used node
    head: Option<usize>,
    /// Least recently used node
    tail: Option<usize>,
    len: usize,
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value as the most recently used node.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.generations.push(0);
                self.slots.len() - 1
            }
        };
        self.len += 1;
        self.link_front(idx);
        self.id_at(idx)
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    ///
    /// Returns false if the handle does not point to a live node.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.head != Some(id.index) {
            self.unlink(id.index);
            self.link_front(id.index);
        }
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id.index);
        let node = self.slots[id.index].take()?;
        self.generations[id.index] = self.generations[id.index].wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(node.value)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(self.id_at(tail))
    }

    // == Peek ==
    /// Returns the most recently used value.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    /// Returns the least recently used value without removing it.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        if !self.contains(id) {
            return None;
        }
        self.node(id.index).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if !self.contains(id) {
            return None;
        }
        self.node_mut(id.index).map(|node| &mut node.value)
    }

    /// Returns true if the handle points to a live node of this generation.
    pub fn contains(&self, id: NodeId) -> bool {
        self.generations.get(id.index) == Some(&id.generation) && self.node(id.index).is_some()
    }

    // == Length ==
    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates values from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn id_at(&self, idx: usize) -> NodeId {
        NodeId {
            index: idx,
            generation: self.generations[idx],
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Detaches a live node from its neighbours, leaving it in its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Attaches a detached node at the head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Walks the list both ways and panics if the links disagree.
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx).expect("dangling next link");
            assert_eq!(node.prev, prev, "broken prev link at slot {idx}");
            forward.push(idx);
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev, "tail does not match last node");
        assert_eq!(forward.len(), self.len, "len out of sync with links");
        assert_eq!(
            self.slots.iter().filter(|slot| slot.is_some()).count(),
            self.len
        );
    }
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
