//! Depth-first traversals of an [`OrderedTree`].
//!
//! [`OrderedTree::traverse`] recurses and collects every key into a `Vec`. [`OrderedTree::iter`]
//! yields the same sequence lazily using an explicit stack, so it is the one to reach for when
//! the tree may be deep (e.g. built from sorted input).

use std::iter::FusedIterator;

use crate::tree::Link;
use crate::{Key, NodeId, OrderedTree};

/// The order a depth-first traversal visits keys in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Keys come out sorted.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
}

impl OrderedTree {
    /// Collects every key in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Order, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.traverse(Order::Pre), vec![2, 1, 3]);
    /// assert_eq!(tree.traverse(Order::In), vec![1, 2, 3]);
    /// assert_eq!(tree.traverse(Order::Post), vec![1, 3, 2]);
    /// ```
    pub fn traverse(&self, order: Order) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        self.traverse_from(self.root, order, &mut keys);
        keys
    }

    fn traverse_from(&self, link: Link, order: Order, keys: &mut Vec<Key>) {
        let Some(id) = link else {
            return;
        };
        let node = self.node(id);
        match order {
            Order::Pre => {
                keys.push(node.key);
                self.traverse_from(node.left, order, keys);
                self.traverse_from(node.right, order, keys);
            }
            Order::In => {
                self.traverse_from(node.left, order, keys);
                keys.push(node.key);
                self.traverse_from(node.right, order, keys);
            }
            Order::Post => {
                self.traverse_from(node.left, order, keys);
                self.traverse_from(node.right, order, keys);
                keys.push(node.key);
            }
        }
    }

    /// A lazy iterator over every key in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Order, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key);
    /// }
    ///
    /// let mut post = tree.iter(Order::Post);
    /// assert_eq!(post.len(), 3);
    /// assert_eq!(post.next(), Some(1));
    /// assert_eq!(post.collect::<Vec<_>>(), vec![3, 2]);
    ///
    /// // Iterating a reference goes in order.
    /// assert_eq!((&tree).into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self, order: Order) -> Traversal<'_> {
        Traversal {
            tree: self,
            order,
            stack: self.root.map(Step::Descend).into_iter().collect(),
            remaining: self.len(),
        }
    }
}

impl<'tree> IntoIterator for &'tree OrderedTree {
    type Item = Key;
    type IntoIter = Traversal<'tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter(Order::In)
    }
}

#[derive(Copy, Clone, Debug)]
enum Step {
    /// Expand this subtree.
    Descend(NodeId),
    /// Yield this node's key.
    Emit(NodeId),
}

/// Iterator returned by [`OrderedTree::iter`].
#[derive(Clone, Debug)]
pub struct Traversal<'tree> {
    tree: &'tree OrderedTree,
    order: Order,
    stack: Vec<Step>,
    remaining: usize,
}

impl Iterator for Traversal<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            let id = match step {
                Step::Emit(id) => {
                    self.remaining -= 1;
                    return Some(self.tree.node(id).key);
                }
                Step::Descend(id) => id,
            };

            let node = self.tree.node(id);
            let left = node.left.map(Step::Descend);
            let right = node.right.map(Step::Descend);
            // The stack pops in reverse, so push the last visit first.
            match self.order {
                Order::Pre => {
                    self.stack.extend(right);
                    self.stack.extend(left);
                    self.stack.push(Step::Emit(id));
                }
                Order::In => {
                    self.stack.extend(right);
                    self.stack.push(Step::Emit(id));
                    self.stack.extend(left);
                }
                Order::Post => {
                    self.stack.push(Step::Emit(id));
                    self.stack.extend(right);
                    self.stack.extend(left);
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Traversal<'_> {}

impl FusedIterator for Traversal<'_> {}
