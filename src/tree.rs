//! A mutable, unbalanced BST whose nodes know their parents.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Order, OrderedTree};
//!
//! let mut tree = OrderedTree::new();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.traverse(Order::In), vec![20, 30, 40, 50, 60, 70, 80]);
//! assert_eq!(tree.traverse(Order::Pre), vec![50, 30, 20, 40, 70, 60, 80]);
//!
//! // 30 has two children so its slot takes over its successor's key.
//! let thirty = tree.find(30).unwrap();
//! assert!(tree.delete(30));
//! assert_eq!(tree.key(thirty), Ok(40));
//! assert_eq!(tree.traverse(Order::In), vec![20, 40, 50, 60, 70, 80]);
//!
//! // Deleting something that isn't there changes nothing.
//! assert!(!tree.delete(999));
//! assert_eq!(tree.len(), 6);
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::{Error, Key, Order};

new_key_type! {
    /// An opaque handle to a node in an [`OrderedTree`].
    ///
    /// Handles are cheap to copy and stay valid until the node they name is deleted. Looking up a
    /// handle after that reports it as stale rather than returning whatever node reuses its slot.
    pub struct NodeId;
}

/// An optional edge to another node.
pub(crate) type Link = Option<NodeId>;

/// Which child slot of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The slot holding keys strictly less than the node's key.
    Left,
    /// The slot holding keys greater than or equal to the node's key.
    Right,
}

/// The outcome of [`OrderedTree::locate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Locate {
    /// A node holding exactly the searched key.
    Found(NodeId),
    /// No node holds the key. It would be attached as the `side` child of `parent`.
    Vacant {
        /// The anchor node, i.e. the last node visited before an empty slot.
        parent: NodeId,
        /// The empty slot of `parent` the key belongs in.
        side: Side,
    },
}

impl Locate {
    /// The node the search stopped at: the exact match or the anchor.
    pub fn node(self) -> NodeId {
        match self {
            Self::Found(id) | Self::Vacant { parent: id, .. } => id,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Back-reference only. Ownership follows `left`/`right`.
    pub(crate) parent: Link,
}

impl Node {
    fn new(key: Key, parent: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }

    fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A Binary Search Tree of integer keys. Nodes keep a link to their parent which makes in-order
/// successors reachable without a stack.
///
/// The tree is never rebalanced, so its height (and the cost of every operation) depends on
/// insertion order. Equal keys are allowed and are placed in the right subtree of the key they
/// equal.
#[derive(Clone, Default)]
pub struct OrderedTree {
    pub(crate) root: Link,
    pub(crate) nodes: SlotMap<NodeId, Node>,
}

impl fmt::Debug for OrderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.len())
            .field("keys", &DebugKeys(self))
            .finish()
    }
}

/// Lists keys in order through the explicit-stack iterator so deep trees format safely.
struct DebugKeys<'tree>(&'tree OrderedTree);

impl fmt::Debug for DebugKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter(Order::In)).finish()
    }
}

impl OrderedTree {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            root: None,
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of nodes in the tree. Duplicate keys count once per insertion.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// The root node, if there is one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The key stored at `id`.
    ///
    /// Note that deleting a node with two children moves its successor's key into it, so the key
    /// behind a live handle can change.
    pub fn key(&self, id: NodeId) -> Result<Key, Error> {
        self.live(id).map(|node| node.key)
    }

    /// The parent of `id`, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, Error> {
        self.live(id).map(|node| node.parent)
    }

    /// The left child of `id`.
    pub fn left(&self, id: NodeId) -> Result<Option<NodeId>, Error> {
        self.live(id).map(|node| node.left)
    }

    /// The right child of `id`.
    pub fn right(&self, id: NodeId) -> Result<Option<NodeId>, Error> {
        self.live(id).map(|node| node.right)
    }

    /// Searches for `key`, returning either the node holding it or the node a new `key` would
    /// hang off of. Returns `None` only when the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Locate, OrderedTree, Side};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.locate(5), None);
    ///
    /// let five = tree.insert(5);
    /// assert_eq!(tree.locate(5), Some(Locate::Found(five)));
    /// assert_eq!(
    ///     tree.locate(6),
    ///     Some(Locate::Vacant { parent: five, side: Side::Right })
    /// );
    /// ```
    pub fn locate(&self, key: Key) -> Option<Locate> {
        let mut current = self.root?;
        loop {
            let node = self.node(current);
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Some(Locate::Found(current)),
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    return Some(Locate::Vacant {
                        parent: current,
                        side,
                    })
                }
            }
        }
    }

    /// Finds a node holding `key`. If the key was inserted more than once this is the one
    /// closest to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// let five = tree.insert(5);
    ///
    /// assert_eq!(tree.find(5), Some(five));
    /// assert_eq!(tree.find(6), None);
    /// ```
    pub fn find(&self, key: Key) -> Option<NodeId> {
        match self.locate(key)? {
            Locate::Found(id) => Some(id),
            Locate::Vacant { .. } => None,
        }
    }

    /// Whether any node holds `key`.
    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `key` and returns the handle of the new node. This never fails: inserting a key
    /// that is already present adds another node somewhere in the right subtree of the existing
    /// one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Order, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// let first = tree.insert(1);
    /// let second = tree.insert(1);
    ///
    /// assert_eq!(tree.right(first), Ok(Some(second)));
    /// assert_eq!(tree.parent(second), Ok(Some(first)));
    /// assert_eq!(tree.traverse(Order::In), vec![1, 1]);
    /// ```
    pub fn insert(&mut self, key: Key) -> NodeId {
        let (parent, side) = match self.locate(key) {
            None => {
                let id = self.nodes.insert(Node::new(key, None));
                self.root = Some(id);
                trace!("inserted {} as root {:?}", key, id);
                return id;
            }
            Some(Locate::Vacant { parent, side }) => (parent, side),
            Some(Locate::Found(equal)) => self.duplicate_slot(equal, key),
        };

        let id = self.nodes.insert(Node::new(key, Some(parent)));
        let slot = self.node_mut(parent).child_mut(side);
        debug_assert!(slot.is_none(), "insertion would orphan a subtree");
        *slot = Some(id);
        trace!("inserted {} as {:?} child of {:?}", key, side, parent);

        if cfg!(debug_assertions) {
            let parent_key = self.node(parent).key;
            match side {
                Side::Left => assert!(key < parent_key),
                Side::Right => assert!(key >= parent_key),
            }
        }

        id
    }

    /// Deletes one node holding `key`. Returns whether anything was deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: Key) -> bool {
        self.remove(key).is_ok()
    }

    /// Deletes one node holding `key`, reporting [`Error::NotFound`] if there is none.
    ///
    /// When the matching node has two children it stays in place and takes its successor's key;
    /// the successor's node is the one that is freed. Handles to the freed node go stale.
    pub fn remove(&mut self, key: Key) -> Result<(), Error> {
        let target = match self.locate(key) {
            Some(Locate::Found(id)) => id,
            _ => {
                debug!("delete of {} missed", key);
                return Err(Error::NotFound(key));
            }
        };

        let target_node = self.node(target);
        let unlinked = match (target_node.left, target_node.right) {
            (Some(_), Some(right)) => {
                // The leftmost node of the right subtree has no left child, so unlinking it is
                // one of the easy cases.
                let successor = self.leftmost(right);
                let moved = self.node(successor).key;
                self.node_mut(target).key = moved;
                trace!("moved {} from {:?} into {:?}", moved, successor, target);
                successor
            }
            _ => target,
        };

        let Node {
            left,
            right,
            parent,
            ..
        } = self
            .nodes
            .remove(unlinked)
            .expect("Located node is live");
        debug_assert!(left.is_none() || right.is_none());

        let child = left.or(right);
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let side = self.side_of(parent, unlinked);
                *self.node_mut(parent).child_mut(side) = child;
            }
        }
        trace!("unlinked {:?}, {} nodes remain", unlinked, self.len());

        Ok(())
    }

    /// The node that follows `id` in key order, or `None` if `id` holds the largest key (or is
    /// stale).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// let two = tree.insert(2);
    /// let one = tree.insert(1);
    /// let three = tree.insert(3);
    ///
    /// assert_eq!(tree.successor(one), Some(two));
    /// assert_eq!(tree.successor(two), Some(three));
    /// assert_eq!(tree.successor(three), None);
    /// ```
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        // Climb until we arrive at a parent from its left side.
        let mut current = id;
        let mut parent = node.parent;
        while let Some(up) = parent {
            let up_node = self.node(up);
            if up_node.left == Some(current) {
                return Some(up);
            }
            current = up;
            parent = up_node.parent;
        }

        None
    }

    /// The node holding the smallest key.
    pub fn min(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// The node holding the largest key. With duplicates this is the deepest of them.
    pub fn max(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        Some(current)
    }

    /// Walks the whole tree and checks every structural invariant: key ordering against all
    /// ancestors, parent links matching child slots, and every allocated node being reachable
    /// exactly once from the root.
    pub fn check_invariants(&self) -> Result<(), Error> {
        let mut reachable = 0;
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeId, Option<Key>, Option<Key>)> = Vec::new();
        if let Some(root) = self.root {
            let found = self.live(root)?.parent;
            if found.is_some() {
                return Err(Error::ParentMismatch {
                    node: root,
                    expected: None,
                    found,
                });
            }
            stack.push((root, None, None));
        }

        while let Some((id, low, high)) = stack.pop() {
            let node = self.live(id)?;
            reachable += 1;
            if reachable > self.len() {
                break;
            }

            let too_low = low.map_or(false, |low| node.key < low);
            let too_high = high.map_or(false, |high| node.key >= high);
            if too_low || too_high {
                return Err(Error::OrderViolation { node: id, key: node.key });
            }

            for &(child, low, high) in &[
                (node.left, low, Some(node.key)),
                (node.right, Some(node.key), high),
            ] {
                let Some(child) = child else {
                    continue;
                };
                let found = self.live(child)?.parent;
                if found != Some(id) {
                    return Err(Error::ParentMismatch {
                        node: child,
                        expected: Some(id),
                        found,
                    });
                }
                stack.push((child, low, high));
            }
        }

        if reachable != self.len() {
            return Err(Error::LenMismatch {
                live: self.len(),
                reachable,
            });
        }
        Ok(())
    }

    fn live(&self, id: NodeId) -> Result<&Node, Error> {
        self.nodes.get(id).ok_or(Error::StaleHandle(id))
    }

    /// Looks up a node reached through a link. Links only ever name live nodes.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id).expect("Linked node is live")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id).expect("Linked node is live")
    }

    fn leftmost(&self, mut current: NodeId) -> NodeId {
        while let Some(left) = self.node(current).left {
            current = left;
        }
        current
    }

    /// Which child slot of `parent` holds `child`.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        let parent = self.node(parent);
        if parent.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(parent.right, Some(child), "parent does not own child");
            Side::Right
        }
    }

    /// Finds the empty slot for another copy of `key` below `equal`, a node already holding it.
    /// Equal keys go right.
    fn duplicate_slot(&self, equal: NodeId, key: Key) -> (NodeId, Side) {
        let mut current = equal;
        let mut side = Side::Right;
        while let Some(next) = self.node(current).child(side) {
            current = next;
            side = if key < self.node(current).key {
                Side::Left
            } else {
                Side::Right
            };
        }
        (current, side)
    }
}
