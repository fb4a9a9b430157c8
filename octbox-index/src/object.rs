use std::{
    fmt,
    hash::{Hash, Hasher},
};

use glam::DVec3;
use octbox_lib::math::bounds::Bounds3;

/// Uniquely identifies an [`Object`] within the [`Octree`](crate::Octree) that created it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Returns the id as a [`u64`].
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out [`ObjectId`]s in increasing order, starting at `1`.
///
/// Ids are never reused, not even after the object they were assigned to got removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectIdAllocator {
    next: u64,
}

impl ObjectIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh [`ObjectId`].
    ///
    /// # Panics
    ///
    /// Panics if all [`u64`] values have been used up.
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .expect("object ids should not be exhausted");
        id
    }

    /// The number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A payload of type `T` stored in an [`Octree`](crate::Octree) together with its bounds.
///
/// Equality and hashing only consider the [`ObjectId`]; neither the payload nor the bounds.
#[derive(Clone, Debug)]
pub struct Object<T> {
    id: ObjectId,
    data: T,
    bounds: Bounds3,
}

impl<T> Object<T> {
    pub(crate) fn new(id: ObjectId, data: T, bounds: Bounds3) -> Self {
        Self { id, data, bounds }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the payload.
    ///
    /// Bounds can only be changed through [`Octree::move_object`](crate::Octree::move_object),
    /// which keeps the object in the correct node.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds3) {
        self.bounds = bounds;
    }
}

impl<T> PartialEq for Object<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Object<T> {}

impl<T> Hash for Object<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Describes the new bounds of an object passed to
/// [`Octree::move_object`](crate::Octree::move_object).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Keeps the current size but moves the center to the given point.
    Recenter(DVec3),
    /// Replaces the bounds with the given inclusive corners.
    Resize { min: DVec3, max: DVec3 },
}

impl Motion {
    /// Calculates the bounds an object with the `current` bounds ends up with.
    ///
    /// Returns [`None`] if the resulting corners are inverted or not finite.
    pub fn apply(self, current: Bounds3) -> Option<Bounds3> {
        match self {
            Self::Recenter(center) => {
                let half = current.size() / 2.0;
                Bounds3::checked_new(center - half, center + half)
            }
            Self::Resize { min, max } => Bounds3::checked_new(min, max),
        }
    }
}

impl From<Bounds3> for Motion {
    fn from(bounds: Bounds3) -> Self {
        Self::Resize {
            min: bounds.min(),
            max: bounds.max(),
        }
    }
}
