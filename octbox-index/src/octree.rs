mod iter;
mod node;

use std::{collections::HashMap, fmt, ops::ControlFlow};

use glam::DVec3;
use log::debug;
use octbox_lib::math::bounds::Bounds3;

pub use iter::{NodeRef, Nodes};
use node::Node;

use crate::{
    config::OctreeConfig,
    error::OctreeError,
    object::{Motion, Object, ObjectId, ObjectIdAllocator},
};

/// An octree storing objects of type `T` together with their axis-aligned bounds.
///
/// The region of the root node is fixed at construction. Objects that do not fully fit inside of
/// it are rejected, which is the only way for an insertion to fail.
pub struct Octree<T> {
    root: Node<T>,
    config: OctreeConfig,
    ids: ObjectIdAllocator,
    /// The current bounds of every stored object, used to find it again by id alone.
    locations: HashMap<ObjectId, Bounds3>,
}

impl<T> Octree<T> {
    /// Constructs an empty octree covering `region` with the default [`OctreeConfig`].
    pub fn new(region: Bounds3) -> Result<Self, OctreeError> {
        Self::with_config(region, OctreeConfig::default())
    }

    /// Constructs an empty octree covering `region`.
    ///
    /// Fails if the `config` is invalid or the `region` has no volume.
    pub fn with_config(region: Bounds3, config: OctreeConfig) -> Result<Self, OctreeError> {
        config.validate()?;
        if region.is_degenerate() {
            return Err(OctreeError::DegenerateRegion(region));
        }
        Ok(Self {
            root: Node::new(region, 0),
            config,
            ids: ObjectIdAllocator::new(),
            locations: HashMap::new(),
        })
    }

    /// The region covered by the root node.
    pub fn region(&self) -> Bounds3 {
        self.root.region()
    }

    /// The side lengths of [`Self::region`].
    pub fn size(&self) -> DVec3 {
        self.root.region().size()
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Inserts `data` with the given `bounds` and returns its newly assigned [`ObjectId`].
    ///
    /// Returns [`None`] without assigning an id if `bounds` do not fit inside [`Self::region`].
    pub fn insert(&mut self, data: T, bounds: Bounds3) -> Option<ObjectId> {
        if !bounds.fits_in(self.root.region()) {
            debug!("rejected insert of {bounds:?} outside of the root region");
            return None;
        }
        let id = self.ids.allocate();
        self.root
            .insert_fitting(Object::new(id, data, bounds), &self.config);
        self.locations.insert(id, bounds);
        Some(id)
    }

    /// Removes the object with the given `id`, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<Object<T>> {
        let bounds = self.locations.remove(&id)?;
        let object = self
            .root
            .remove(id, bounds, &self.config)
            .expect("located object should be present");
        Some(object)
    }

    /// Moves or resizes the object with the given `id`.
    ///
    /// Nothing changes and `false` is returned if there is no such object or the new bounds would
    /// be invalid or leave [`Self::region`].
    pub fn move_object(&mut self, id: ObjectId, motion: Motion) -> bool {
        let Some(&current) = self.locations.get(&id) else {
            debug!("rejected move of unknown object {id}");
            return false;
        };
        let Some(bounds) = motion.apply(current) else {
            debug!("rejected move of object {id}: {motion:?} yields invalid bounds");
            return false;
        };
        if !bounds.fits_in(self.root.region()) {
            debug!("rejected move of object {id} to {bounds:?} outside of the root region");
            return false;
        }

        let mut object = self
            .root
            .remove(id, current, &self.config)
            .expect("located object should be present");
        object.set_bounds(bounds);
        self.root.insert_fitting(object, &self.config);
        self.locations.insert(id, bounds);
        true
    }

    /// Returns all objects whose bounds intersect `region`, touching bounds included.
    pub fn colliding(&self, region: Bounds3) -> Vec<&Object<T>> {
        let mut found = Vec::new();
        self.root.colliding(region, &mut found);
        found
    }

    /// Visits every object until `visit` returns [`ControlFlow::Break`].
    pub fn range<'a, B>(
        &'a self,
        mut visit: impl FnMut(&'a Object<T>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.root.range(&mut visit)
    }

    /// Returns the object with the given `id` if its bounds fit inside `region`.
    pub fn get(&self, id: ObjectId, region: Bounds3) -> Option<&Object<T>> {
        self.root.get(id, region)
    }

    /// Returns the object with the given `id`.
    pub fn get_by_id(&self, id: ObjectId) -> Option<&Object<T>> {
        self.root.get(id, *self.locations.get(&id)?)
    }

    /// Returns the payload of the object with the given `id` mutably.
    ///
    /// Bounds can only be changed through [`Self::move_object`].
    pub fn data_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        let bounds = *self.locations.get(&id)?;
        self.root.find_mut(id, bounds).map(Object::data_mut)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.locations.contains_key(&id)
    }

    /// The current bounds of the object with the given `id`.
    pub fn bounds_of(&self, id: ObjectId) -> Option<Bounds3> {
        self.locations.get(&id).copied()
    }

    /// The number of levels of the tree; `1` if the root was never split.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// The number of stored objects.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// How full the nodes are on average, relative to [`OctreeConfig::capacity`].
    ///
    /// Objects kept in inner nodes count as well, so this can exceed `1.0`.
    pub fn usage(&self) -> f64 {
        self.len() as f64 / (self.node_count() * self.config.capacity) as f64
    }

    /// Iterates all nodes depth-first, starting at the root.
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(&self.root)
    }

    /// Iterates all objects in the same order as [`Self::range`].
    pub fn objects(&self) -> impl Iterator<Item = &Object<T>> {
        self.nodes().flat_map(NodeRef::objects)
    }

    /// Collects all objects in the same order as [`Self::range`].
    pub fn all_objects(&self) -> Vec<&Object<T>> {
        self.objects().collect()
    }

    /// Removes all objects.
    ///
    /// Ids are still never reused afterwards.
    pub fn clear(&mut self) {
        self.root = Node::new(self.root.region(), 0);
        self.locations.clear();
    }

    /// Formats the tree structure, listing object ids instead of payloads.
    pub fn debug(&self) -> impl fmt::Debug + '_ {
        self.root.debug()
    }
}

impl<T> fmt::Debug for Octree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("config", &self.config)
            .field("len", &self.len())
            .field("allocated_ids", &self.ids.allocated())
            .field("root", &self.root.debug())
            .finish()
    }
}
