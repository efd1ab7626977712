//! LRU Recency List Module
//!
//! Doubly-linked recency order stored in an arena of slots.
//!
//! Nodes live in a `Vec<Option<Node>>` and link to each other by slot index,
//! so there are no pointers or reference cycles. Vacated slots go on a free
//! list and are reused by the next insertion.

// == Handle ==
/// Stable index of a node inside the arena.
///
/// A handle stays valid until the node it names is removed.
pub type Handle = usize;

// == Node ==
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<Handle>,
    next: Option<Handle>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Head = most recently touched
/// - Tail = least recently touched (next eviction candidate)
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Node storage, `None` marks a vacated slot
    slots: Vec<Option<Node<K, V>>>,
    /// Vacated slot indices available for reuse
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new node at the head and returns its handle.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks a node as most recently touched.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Unlinks a node and frees its slot, returning its key and value.
    ///
    /// Returns None if the handle names a vacated slot.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        self.slots.get(handle)?.as_ref()?;
        self.unlink(handle);

        let node = self.slots[handle].take()?;
        self.free.push(handle);
        self.len -= 1;
        Some((node.key, node.value))
    }

    // == Pop Back ==
    /// Removes and returns the least recently touched node.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek Back ==
    /// Returns the least recently touched key without touching it.
    pub fn peek_back(&self) -> Option<&K> {
        self.tail.and_then(|handle| self.node(handle)).map(|n| &n.key)
    }

    // == Value Access ==
    pub fn value(&self, handle: Handle) -> Option<&V> {
        self.node(handle).map(|n| &n.value)
    }

    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.slots
            .get_mut(handle)
            .and_then(Option::as_mut)
            .map(|n| &mut n.value)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates keys from most to least recently touched.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            list: self,
            cursor: self.head,
        }
    }

    // == Linking Helpers ==
    fn node(&self, handle: Handle) -> Option<&Node<K, V>> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(handle).and_then(Option::as_mut)
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head.and_then(|h| self.node_mut(h)) {
            Some(head) => head.prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let Some((prev, next)) = self.node(handle).map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev.and_then(|h| self.node_mut(h)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|h| self.node_mut(h)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = None;
        }
    }
}

// == Keys Iterator ==
/// Iterator over keys in recency order, created by [`RecencyList::keys`].
pub struct Keys<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
