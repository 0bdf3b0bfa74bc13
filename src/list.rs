//! Arena-backed doubly linked list with stable node handles.
//!
//! Nodes live in a `Vec` arena and link to each other by index, so a [`NodeId`]
//! handed out by [`List::add`] stays valid until that node is removed. Freed slots
//! are recycled through an internal free list, which means a steady-state
//! workload (one removal per insertion) never grows the arena.
//!
//! ```text
//!   nodes: [ n0 | n1 | n2 | n3 ]      free: [ ]
//!
//!   head ─► n2 ◄──► n0 ◄──► n3 ◄──► n1 ◄── tail
//!           (front / MRU)          (back / LRU)
//! ```

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroUsize;

/// Stable handle to a node in a [`List`].
///
/// A handle is only meaningful for the list that produced it and only until the
/// node is removed; afterwards the slot may be reused for another value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index backing this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

struct Node<T> {
    val: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked list with a fixed logical capacity.
///
/// All operations that touch a single node (`add`, `move_to_front`,
/// `remove_last`) are O(1). Moving an existing node never allocates.
pub struct List<T> {
    cap: NonZeroUsize,
    len: usize,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> List<T> {
    /// Creates a new list that holds at most `cap` items.
    ///
    /// The arena is sized up front so that filling the list never reallocates.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            nodes: Vec::with_capacity(cap.get()),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the maximum number of items the list can hold.
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at capacity.
    pub fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Handle of the first (most recently added or moved) node.
    pub fn front(&self) -> Option<NodeId> {
        self.head.map(NodeId)
    }

    /// Handle of the last (least recently added or moved) node.
    pub fn back(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the handle of the new node, or `None` if the list is full.
    pub fn add(&mut self, v: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let node = Node {
            val: Some(v),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        Some(NodeId(idx))
    }

    /// Moves a node to the front of the list.
    ///
    /// Does nothing if the handle does not refer to a live node.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.is_live(id.0) || self.head == Some(id.0) {
            return;
        }
        self.detach(id.0);
        self.attach(id.0);
    }

    /// Removes the last item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        let idx = self.tail?;
        self.detach(idx);
        self.release(idx)
    }

    /// Returns a reference to the value behind `id`.
    pub fn get_value(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.val.as_ref())
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Removes all items from the list.
    ///
    /// The arena keeps its allocation so a cleared list refills without
    /// reallocating.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    #[inline]
    fn is_live(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    fn release(&mut self, idx: usize) -> Option<T> {
        let val = self.nodes[idx].val.take();
        self.free.push(idx);
        self.len -= 1;
        val
    }

    /// Unlinks `idx` from its neighbours. The node keeps its value.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[idx];
        node.prev = None;
        node.next = None;
    }

    /// Links a detached node in at the head.
    fn attach(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.nodes[h].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.list.nodes[idx];
        self.current = node.next;
        node.val.as_ref()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("capacity", &self.cap)
            .field("length", &self.len)
            .finish()
    }
}
