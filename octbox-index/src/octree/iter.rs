use std::{fmt, iter::FusedIterator, slice};

use arrayvec::ArrayVec;
use derive_where::derive_where;
use octbox_lib::{math::bounds::Bounds3, math_enums::Corner3};

use super::node::Node;
use crate::{config::OctreeConfig, object::Object};

/// An immutable reference to a single node within an [`Octree`](crate::Octree).
#[derive_where(Clone, Copy)]
pub struct NodeRef<'a, T>(&'a Node<T>);

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        Self(node)
    }

    /// The region of space covered by this node.
    pub fn region(self) -> Bounds3 {
        self.0.region()
    }

    /// The number of splits between the root and this node.
    pub fn depth(self) -> u8 {
        self.0.depth()
    }

    /// Objects stored directly in this node, excluding those of its children.
    pub fn objects(self) -> &'a [Object<T>] {
        self.0.objects()
    }

    pub fn is_leaf(self) -> bool {
        self.0.is_leaf()
    }

    /// Returns the child at the given `corner`, or [`None`] for leaf nodes.
    pub fn child(self, corner: Corner3) -> Option<Self> {
        self.0.children().map(|children| Self::new(&children[corner]))
    }

    /// Returns the 8 children in [`Corner3`] order, or [`None`] for leaf nodes.
    pub fn children(self) -> Option<impl ExactSizeIterator<Item = (Corner3, Self)>> {
        self.0
            .children()
            .map(|children| children.iter().map(|(corner, child)| (corner, Self::new(child))))
    }
}

impl<T> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0.debug(), f)
    }
}

/// Depth-first iterator over all nodes of an [`Octree`](crate::Octree), starting at the root.
///
/// Children are visited in [`Corner3`] order.
pub struct Nodes<'a, T> {
    /// The node that is returned next, unless it was already taken.
    next: Option<&'a Node<T>>,
    /// The remaining children of all entered nodes.
    ///
    /// Nodes at [`OctreeConfig::MAX_DEPTH`] never have children, so the stack can never overflow.
    parents: ArrayVec<slice::Iter<'a, Node<T>>, { OctreeConfig::MAX_DEPTH as usize }>,
}

impl<'a, T> Nodes<'a, T> {
    pub(crate) fn new(root: &'a Node<T>) -> Self {
        Self {
            next: Some(root),
            parents: ArrayVec::new(),
        }
    }
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = match self.next.take() {
            Some(node) => node,
            None => loop {
                let siblings = self.parents.last_mut()?;
                match siblings.next() {
                    Some(node) => break node,
                    None => {
                        self.parents.pop();
                    }
                }
            },
        };
        if let Some(children) = node.children() {
            self.parents.push(children.as_slice().iter());
        }
        Some(NodeRef::new(node))
    }
}

impl<T> FusedIterator for Nodes<'_, T> {}
