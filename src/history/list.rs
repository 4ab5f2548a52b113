//! Edit history: a chain of states with a movable current position.
//!
//! Nodes live in an arena of slots addressed by [`NodeId`] handles. Each node
//! carries its `{prev, next, index}` links; the history owns every node and
//! no handle outlives the node it names, because truncated nodes are removed
//! from the chain before their slots are recycled.

use std::fmt;

use crate::core::error::{Direction, Error};
use crate::core::types::Result;

/// Stable handle to a node in an [`EditHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

/// One state in the chain.
#[derive(Debug, Clone)]
pub struct HistoryNode<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    /// Position along the chain, assigned when the node is linked
    index: usize,
}

impl<T> HistoryNode<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Linear undo/redo history.
///
/// Adding a state after stepping back discards every state ahead of the
/// current one; that redo branch cannot be recovered.
#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    slots: Vec<Option<HistoryNode<T>>>,
    /// Released slots ready for reuse
    free: Vec<NodeId>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    current: Option<NodeId>,
}

impl<T> EditHistory<T> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            current: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Number of states in the chain.
    pub fn len(&self) -> usize {
        self.last.map_or(0, |id| self.node(id).index + 1)
    }

    pub fn first(&self) -> Option<NodeId> {
        self.first
    }

    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    pub fn current_id(&self) -> Option<NodeId> {
        self.current
    }

    /// Look up a node by handle.
    pub fn get_node(&self, id: NodeId) -> Option<&HistoryNode<T>> {
        self.slots.get(id.slot()).and_then(Option::as_ref)
    }

    /// Node behind a handle the history itself holds.
    fn node(&self, id: NodeId) -> &HistoryNode<T> {
        self.get_node(id).expect("history links only name live nodes")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut HistoryNode<T> {
        self.slots
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .expect("history links only name live nodes")
    }

    /// The current state.
    pub fn current(&self) -> Option<&T> {
        self.current.map(|id| &self.node(id).value)
    }

    /// Index of the current state, or `None` for an empty history.
    pub fn current_index(&self) -> Option<usize> {
        self.current.map(|id| self.node(id).index)
    }

    pub fn can_go_to_next(&self) -> bool {
        self.current.is_some_and(|id| self.node(id).next.is_some())
    }

    pub fn can_go_to_prev(&self) -> bool {
        self.current.is_some_and(|id| self.node(id).prev.is_some())
    }

    fn alloc(&mut self, node: HistoryNode<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.slot()] = Some(node);
                id
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Unlink and release every node after `id`.
    fn truncate_after(&mut self, id: NodeId) {
        let mut next = self.node_mut(id).next.take();
        while let Some(dropped) = next {
            next = self.slots[dropped.slot()].take().and_then(|node| node.next);
            self.free.push(dropped);
        }
        self.last = Some(id);
    }

    /// Reset the history to a single state, which becomes current.
    pub fn set_first(&mut self, value: T) -> NodeId {
        self.clear();
        let id = self.alloc(HistoryNode {
            value,
            prev: None,
            next: None,
            index: 0,
        });
        self.first = Some(id);
        self.last = Some(id);
        self.current = Some(id);
        id
    }

    /// Link a new state after the current one and make it current.
    ///
    /// Any states ahead of the current one are discarded first.
    pub fn add(&mut self, value: T) -> NodeId {
        let id = self.add_without_state_change(value);
        self.current = Some(id);
        id
    }

    /// Link a new state after the current one without moving the cursor.
    ///
    /// Any states ahead of the current one are discarded first. On an empty
    /// history this behaves like [`EditHistory::set_first`].
    pub fn add_without_state_change(&mut self, value: T) -> NodeId {
        let Some(current) = self.current else {
            return self.set_first(value);
        };

        self.truncate_after(current);
        let index = self.node(current).index + 1;
        let id = self.alloc(HistoryNode {
            value,
            prev: Some(current),
            next: None,
            index,
        });
        self.node_mut(current).next = Some(id);
        self.last = Some(id);
        id
    }

    /// Step forward and return the new current state.
    pub fn enter_next(&mut self) -> Result<&T> {
        self.step(Direction::Next)
    }

    /// Step back and return the new current state.
    pub fn enter_prev(&mut self) -> Result<&T> {
        self.step(Direction::Prev)
    }

    fn step(&mut self, direction: Direction) -> Result<&T> {
        let current = self.current.ok_or(Error::NoSuchState(direction))?;
        let node = self.node(current);
        let target = match direction {
            Direction::Next => node.next,
            Direction::Prev => node.prev,
        }
        .ok_or(Error::NoSuchState(direction))?;

        self.current = Some(target);
        Ok(&self.node(target).value)
    }

    /// State at chain position `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Iterate states from first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            history: self,
            next: self.first,
        }
    }

    /// Drop every state.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.first = None;
        self.last = None;
        self.current = None;
    }
}

impl<T: Clone> EditHistory<T> {
    /// Linearize the chain, first to last.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> EditHistory<T> {
    /// Rebuild a history from a linear list of states.
    ///
    /// Entries up to and including `state_index` are added as current in
    /// turn; the rest are appended ahead of the cursor, so the result has
    /// `current_index() == Some(state_index)` and the same chain order.
    pub fn from_vec(states: Vec<T>, state_index: usize) -> Result<Self> {
        if state_index >= states.len() {
            return Err(Error::InvalidStateIndex {
                index: state_index,
                len: states.len(),
            });
        }

        let mut history = Self::new();
        history.slots.reserve(states.len());

        for (i, state) in states.into_iter().enumerate() {
            if i <= state_index {
                history.add(state);
            } else {
                // Append at the tail: temporarily treat `last` as the cursor.
                let cursor = history.current;
                history.current = history.last;
                history.add_without_state_change(state);
                history.current = cursor;
            }
        }

        Ok(history)
    }
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward iterator over the states of an [`EditHistory`].
pub struct Iter<'a, T> {
    history: &'a EditHistory<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.history.node(self.next?);
        self.next = node.next;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(id) => self.history.len() - self.history.node(id).index,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<'a, T> IntoIterator for &'a EditHistory<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Chain positions with the current node shown as `+`, e.g. `<0, 1, +, 3>`.
impl<T> fmt::Display for EditHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        let mut next = self.first;
        while let Some(id) = next {
            let node = self.node(id);
            if Some(id) != self.first {
                f.write_str(", ")?;
            }
            if Some(id) == self.current {
                f.write_str("+")?;
            } else {
                write!(f, "{}", node.index)?;
            }
            next = node.next;
        }
        f.write_str(">")
    }
}
