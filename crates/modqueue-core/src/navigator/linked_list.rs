//! Arena-backed doubly-linked list over case identifiers.
//!
//! Nodes live in a `Vec` and reference each other by index, with a
//! side map from identifier to node handle for O(1) lookup. Removed
//! slots are tombstoned; the arena is compacted only by [`CaseList::reset`],
//! which is fine because the list is rebuilt wholesale on every page
//! fetch and never grows past one page.

use std::collections::HashMap;

type Handle = usize;

#[derive(Debug)]
struct Node {
    id: String,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Doubly-linked list of case identifiers with O(1) lookup by identifier.
#[derive(Debug, Default)]
pub(crate) struct CaseList {
    nodes: Vec<Option<Node>>,
    index: HashMap<String, Handle>,
    head: Option<Handle>,
    cursor: Option<Handle>,
}

impl CaseList {
    /// Empties the list and the identifier index.
    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.head = None;
        self.cursor = None;
    }

    /// Appends `id` after the current cursor and advances the cursor to it.
    ///
    /// Callers add identifiers in page order, once per rebuild; adding a
    /// duplicate identifier replaces the index entry and leaves the old
    /// node orphaned, so rebuilds must [`Self::reset`] first.
    pub(crate) fn add(&mut self, id: &str) {
        let handle = self.nodes.len();
        match self.cursor {
            None => {
                self.nodes.push(Some(Node {
                    id: id.to_string(),
                    prev: None,
                    next: None,
                }));
                self.head = Some(handle);
            }
            Some(cursor) => {
                let cursor_next = self.node(cursor).and_then(|node| node.next);
                self.nodes.push(Some(Node {
                    id: id.to_string(),
                    prev: Some(cursor),
                    next: cursor_next,
                }));
                if let Some(node) = self.node_mut(cursor) {
                    node.next = Some(handle);
                }
                if let Some(next) = cursor_next
                    && let Some(node) = self.node_mut(next)
                {
                    node.prev = Some(handle);
                }
            }
        }
        self.index.insert(id.to_string(), handle);
        self.cursor = Some(handle);
    }

    /// Moves the cursor to the node before `id` and returns its identifier.
    ///
    /// Returns `None` when `id` is the first node or is not in the list.
    pub(crate) fn previous(&mut self, id: &str) -> Option<String> {
        self.cursor = self.index.get(id).copied();
        let prev = self.node(self.cursor?)?.prev?;
        self.cursor = Some(prev);
        self.node(prev).map(|node| node.id.clone())
    }

    /// Moves the cursor to the node after `id` and returns its identifier.
    ///
    /// Returns `None` when `id` is the last node or is not in the list.
    pub(crate) fn next(&mut self, id: &str) -> Option<String> {
        self.cursor = self.index.get(id).copied();
        let next = self.node(self.cursor?)?.next?;
        self.cursor = Some(next);
        self.node(next).map(|node| node.id.clone())
    }

    /// Splices the node for `id` out of the list.
    ///
    /// No-op when `id` is not in the list. When the removed node is the
    /// cursor, the cursor moves to the predecessor, falling back to the
    /// successor.
    pub(crate) fn remove(&mut self, id: &str) {
        let Some(handle) = self.index.remove(id) else {
            return;
        };
        let (prev, next) = match self.node(handle) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        if let Some(prev) = prev
            && let Some(node) = self.node_mut(prev)
        {
            node.next = next;
        }
        if let Some(next) = next
            && let Some(node) = self.node_mut(next)
        {
            node.prev = prev;
        }
        if self.head == Some(handle) {
            self.head = next;
        }
        if self.cursor == Some(handle) {
            self.cursor = prev.or(next);
        }
        self.nodes[handle] = None;
    }

    /// The identifiers currently in the list, in list order.
    pub(crate) fn ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.index.len());
        let mut handle = self.head;
        while let Some(current) = handle {
            let Some(node) = self.node(current) else {
                break;
            };
            ids.push(node.id.clone());
            handle = node.next;
        }
        ids
    }

    /// Whether `id` is currently in the list.
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of identifiers in the list.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    fn node(&self, handle: Handle) -> Option<&Node> {
        self.nodes.get(handle).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node> {
        self.nodes.get_mut(handle).and_then(Option::as_mut)
    }
}
