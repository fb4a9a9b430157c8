use std::{fmt, mem::take, ops::ControlFlow};

use enum_map::EnumMap;
use itertools::{Either, Itertools};
use log::{debug, trace};
use octbox_lib::{math::bounds::Bounds3, math_enums::Corner3};

use crate::{
    config::OctreeConfig,
    object::{Object, ObjectId},
};

/// A node within an octree, covering a fixed region of space.
///
/// Leaf nodes hold up to [`OctreeConfig::capacity`] objects. Once that is exceeded, the node is
/// split into 8 octants and its objects are pushed down into whichever octant encloses them.
/// Objects that straddle the boundary between octants stay in the node itself.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    /// The region covered by this node; every object in [`Self::objects`] fits inside.
    region: Bounds3,
    /// Number of splits between the root and this node.
    depth: u8,
    /// Objects that fit [`Self::region`] but no single child.
    objects: Vec<Object<T>>,
    /// [`None`] for leaf nodes.
    children: Option<Children<T>>,
}

pub(crate) type Children<T> = Box<EnumMap<Corner3, Node<T>>>;

impl<T> Node<T> {
    /// Constructs a new empty leaf node.
    pub(crate) fn new(region: Bounds3, depth: u8) -> Self {
        Self {
            region,
            depth,
            objects: Vec::new(),
            children: None,
        }
    }

    pub(crate) fn region(&self) -> Bounds3 {
        self.region
    }

    pub(crate) fn depth(&self) -> u8 {
        self.depth
    }

    pub(crate) fn objects(&self) -> &[Object<T>] {
        &self.objects
    }

    pub(crate) fn children(&self) -> Option<&EnumMap<Corner3, Self>> {
        self.children.as_deref()
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Inserts an `object` into this node or one of its descendants.
    ///
    /// The caller has to make sure the `object` fits inside [`Self::region`].
    pub(crate) fn insert_fitting(&mut self, object: Object<T>, config: &OctreeConfig) {
        debug_assert!(object.bounds().fits_in(self.region));

        if self.is_leaf() {
            if self.objects.len() < config.capacity {
                self.objects.push(object);
                return;
            }
            if !config.can_split(self.region, self.depth) {
                debug!(
                    "leaf at depth {} cannot split further and now holds {} objects",
                    self.depth,
                    self.objects.len() + 1
                );
                self.objects.push(object);
                return;
            }
            self.split(config);
        }

        let children = self
            .children
            .as_mut()
            .expect("node should have been split");
        match Self::fitting_child(children, object.bounds()) {
            Some(corner) => children[corner].insert_fitting(object, config),
            None => self.objects.push(object),
        }
    }

    /// Returns the first child in [`Corner3`] order that fully encloses `bounds`.
    fn fitting_child(children: &EnumMap<Corner3, Self>, bounds: Bounds3) -> Option<Corner3> {
        children
            .iter()
            .find(|(_, child)| bounds.fits_in(child.region))
            .map(|(corner, _)| corner)
    }

    /// Splits the node into 8 octants and pushes its objects down as far as possible.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the node is already split.
    fn split(&mut self, config: &OctreeConfig) {
        debug_assert!(self.is_leaf(), "node should not already be split");
        trace!(
            "splitting node at depth {} holding {} objects",
            self.depth,
            self.objects.len()
        );

        let depth = self.depth + 1;
        let mut children = Box::new(
            self.region
                .split()
                .map(|_, region| Self::new(region, depth)),
        );
        debug_assert!(children
            .iter()
            .all(|(corner, child)| child.region == self.region.octant(corner)));

        let (remaining, migrating): (Vec<_>, Vec<_>) = take(&mut self.objects)
            .into_iter()
            .partition_map(|object| match Self::fitting_child(&children, object.bounds()) {
                Some(corner) => Either::Right((corner, object)),
                None => Either::Left(object),
            });

        self.objects = remaining;
        for (corner, object) in migrating {
            children[corner].insert_fitting(object, config);
        }
        self.children = Some(children);
    }

    /// Removes the object with the given `id` from this node or one of its descendants.
    ///
    /// `bounds` must be the current bounds of the object; subtrees whose region does not enclose
    /// them are skipped. Nodes along the path of a successful removal try to merge their children.
    pub(crate) fn remove(
        &mut self,
        id: ObjectId,
        bounds: Bounds3,
        config: &OctreeConfig,
    ) -> Option<Object<T>> {
        if !bounds.fits_in(self.region) {
            return None;
        }

        let removed = match self.objects.iter().position(|object| object.id() == id) {
            Some(index) => self.objects.remove(index),
            None => self
                .children
                .as_mut()?
                .values_mut()
                .find_map(|child| child.remove(id, bounds, config))?,
        };
        self.merge(config);
        Some(removed)
    }

    /// Collapses all children back into this node.
    ///
    /// Only happens if none of the children have children of their own and all objects fit within
    /// [`OctreeConfig::capacity`].
    ///
    /// Returns `true` if the node was merged.
    pub(crate) fn merge(&mut self, config: &OctreeConfig) -> bool {
        let Some(children) = &self.children else {
            return false;
        };
        if !children.values().all(Self::is_leaf) {
            return false;
        }
        let total = self.objects.len()
            + children
                .values()
                .map(|child| child.objects.len())
                .sum::<usize>();
        if total > config.capacity {
            return false;
        }

        trace!(
            "merging node at depth {} back into a leaf with {total} objects",
            self.depth
        );
        let children = *self.children.take().expect("children should exist");
        for child in children.into_values() {
            self.objects.extend(child.objects);
        }
        true
    }

    /// Collects all objects in this subtree whose bounds intersect `query`.
    pub(crate) fn colliding<'a>(&'a self, query: Bounds3, found: &mut Vec<&'a Object<T>>) {
        if self.region.fits_in(query) {
            // everything below lies inside the query
            self.collect_all(found);
        } else if self.region.intersects(query) {
            found.extend(
                self.objects
                    .iter()
                    .filter(|object| object.bounds().intersects(query)),
            );
            for child in self.children.iter().flat_map(|children| children.values()) {
                child.colliding(query, found);
            }
        }
    }

    fn collect_all<'a>(&'a self, found: &mut Vec<&'a Object<T>>) {
        found.extend(&self.objects);
        for child in self.children.iter().flat_map(|children| children.values()) {
            child.collect_all(found);
        }
    }

    /// Visits all objects depth-first; the node's own objects before those of its children.
    ///
    /// Stops as soon as `visit` returns [`ControlFlow::Break`].
    pub(crate) fn range<'a, B>(
        &'a self,
        visit: &mut impl FnMut(&'a Object<T>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for object in &self.objects {
            visit(object)?;
        }
        for child in self.children.iter().flat_map(|children| children.values()) {
            child.range(visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Finds the object with the given `id` whose bounds fit inside `query`.
    pub(crate) fn get(&self, id: ObjectId, query: Bounds3) -> Option<&Object<T>> {
        if self.region.is_disjoint(query) {
            return None;
        }
        self.objects
            .iter()
            .find(|object| object.id() == id && object.bounds().fits_in(query))
            .or_else(|| {
                self.children
                    .as_ref()?
                    .values()
                    .find_map(|child| child.get(id, query))
            })
    }

    /// Finds the object with the given `id` and exact current `bounds` mutably.
    pub(crate) fn find_mut(&mut self, id: ObjectId, bounds: Bounds3) -> Option<&mut Object<T>> {
        if !bounds.fits_in(self.region) {
            return None;
        }
        match self.objects.iter().position(|object| object.id() == id) {
            Some(index) => Some(&mut self.objects[index]),
            None => self
                .children
                .as_mut()?
                .values_mut()
                .find_map(|child| child.find_mut(id, bounds)),
        }
    }

    /// The number of levels in this subtree, `1` for a leaf.
    pub(crate) fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .flat_map(|children| children.values())
            .map(Self::height)
            .max()
            .unwrap_or(0)
    }

    /// The number of nodes in this subtree, including this node.
    pub(crate) fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flat_map(|children| children.values())
            .map(Self::node_count)
            .sum::<usize>()
    }

    pub(crate) fn debug(&self) -> DebugNode<'_, T> {
        DebugNode(self)
    }
}

/// Prints the structure of a subtree, listing object ids instead of payloads.
pub(crate) struct DebugNode<'a, T>(&'a Node<T>);

impl<T> fmt::Debug for DebugNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        let mut debug_struct = f.debug_struct("Node");
        debug_struct
            .field("region", &node.region)
            .field("depth", &node.depth)
            .field("objects", &DebugIds(&node.objects));
        if let Some(children) = &node.children {
            debug_struct.field("children", &DebugChildren(children));
        }
        debug_struct.finish()
    }
}

struct DebugIds<'a, T>(&'a [Object<T>]);

impl<T> fmt::Debug for DebugIds<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(Object::id))
            .finish()
    }
}

struct DebugChildren<'a, T>(&'a EnumMap<Corner3, Node<T>>);

impl<T> fmt::Debug for DebugChildren<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(corner, child)| (corner, child.debug())))
            .finish()
    }
}

#[cfg(test)]
impl<T> Node<T> {
    /// Inserts the `object` into this node or one of its descendants.
    ///
    /// Returns the `object` back if it does not fit inside [`Self::region`].
    pub(crate) fn insert(
        &mut self,
        object: Object<T>,
        config: &OctreeConfig,
    ) -> Result<(), Object<T>> {
        if object.bounds().fits_in(self.region) {
            self.insert_fitting(object, config);
            Ok(())
        } else {
            Err(object)
        }
    }

    /// The number of objects in this subtree.
    pub(crate) fn object_count(&self) -> usize {
        self.objects.len()
            + self
                .children
                .iter()
                .flat_map(|children| children.values())
                .map(Self::object_count)
                .sum::<usize>()
    }

    /// Checks the structural invariants of this subtree.
    ///
    /// # Panics
    ///
    /// Panics if any of them are violated.
    pub(crate) fn assert_valid(&self, config: &OctreeConfig) {
        for object in &self.objects {
            assert!(
                object.bounds().fits_in(self.region),
                "object {} should fit its node",
                object.id()
            );
        }
        match &self.children {
            None => assert!(
                self.objects.len() <= config.capacity
                    || !config.can_split(self.region, self.depth),
                "leaf at depth {} holds {} objects",
                self.depth,
                self.objects.len()
            ),
            Some(children) => {
                for (corner, child) in children.iter() {
                    assert_eq!(child.region, self.region.octant(corner));
                    assert_eq!(child.depth, self.depth + 1);
                    child.assert_valid(config);
                }
                for object in &self.objects {
                    assert!(
                        Self::fitting_child(children, object.bounds()).is_none(),
                        "object {} should have been pushed down",
                        object.id()
                    );
                }
            }
        }
    }
}
