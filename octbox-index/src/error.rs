use octbox_lib::math::bounds::Bounds3;
use thiserror::Error;

use crate::config::OctreeConfig;

/// Reasons why an [`Octree`](crate::Octree) could not be constructed.
///
/// Rejected operations on an existing octree (e.g. inserting outside of its region) are not
/// errors and are reported through [`Option`] and [`bool`] return values instead.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum OctreeError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("max depth {0} exceeds the supported maximum of {max}", max = OctreeConfig::MAX_DEPTH)]
    MaxDepthTooLarge(u8),
    #[error("min region size must be finite and non-negative, got {0}")]
    InvalidMinRegionSize(f64),
    #[error("root region {0:?} has no volume")]
    DegenerateRegion(Bounds3),
}
