//! A capacity-driven octree over axis-aligned bounding boxes.
//!
//! Objects are stored in the smallest node whose region fully encloses them. Leaves split into
//! eight octants once they exceed [`OctreeConfig::capacity`] and merge back together when objects
//! are removed, so queries only have to look at the parts of space they overlap.
//!
//! ```
//! use glam::{dvec3, DVec3};
//! use octbox_index::{Bounds3, Motion, Octree};
//!
//! let mut octree = Octree::new(Bounds3::new(DVec3::ONE, DVec3::splat(4.0))).unwrap();
//! let id = octree.insert("crate", Bounds3::cube(dvec3(2.0, 2.0, 3.0), 0.5)).unwrap();
//!
//! let hits = octree.colliding(Bounds3::new(DVec3::ZERO, dvec3(3.0, 3.0, 3.0)));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(*hits[0].data(), "crate");
//!
//! assert!(octree.move_object(id, Motion::Recenter(dvec3(2.0, 2.0, 2.0))));
//! // would leave the root region, so nothing happens
//! assert!(!octree.move_object(id, Motion::Recenter(dvec3(2.0, 2.0, 8.0))));
//! ```

pub mod config;
pub mod error;
pub mod object;
pub mod octree;

pub use config::OctreeConfig;
pub use error::OctreeError;
pub use object::{Motion, Object, ObjectId, ObjectIdAllocator};
pub use octbox_lib::{math::bounds::Bounds3, math_enums::Corner3};
pub use octree::{NodeRef, Nodes, Octree};
