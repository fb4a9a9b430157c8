use octbox_lib::math::bounds::Bounds3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::OctreeError;

/// Tuning parameters of an [`Octree`](crate::Octree).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(default))]
pub struct OctreeConfig {
    /// The number of objects a leaf holds before it splits into octants.
    pub capacity: usize,
    /// Leaves at this depth never split, no matter how many objects they hold.
    ///
    /// The root has a depth of zero.
    pub max_depth: u8,
    /// Leaves never split if the resulting octants would be smaller than this along any axis.
    pub min_region_size: f64,
}

impl OctreeConfig {
    pub const DEFAULT_CAPACITY: usize = 5;
    pub const DEFAULT_MAX_DEPTH: u8 = 16;
    /// Upper limit for [`Self::max_depth`], which also bounds recursion during traversal.
    pub const MAX_DEPTH: u8 = 32;

    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    pub fn with_max_depth(self, max_depth: u8) -> Self {
        Self { max_depth, ..self }
    }

    pub fn with_min_region_size(self, min_region_size: f64) -> Self {
        Self {
            min_region_size,
            ..self
        }
    }

    /// Checks whether the configuration can be used to construct an [`Octree`](crate::Octree).
    pub fn validate(&self) -> Result<(), OctreeError> {
        if self.capacity == 0 {
            Err(OctreeError::ZeroCapacity)
        } else if self.max_depth > Self::MAX_DEPTH {
            Err(OctreeError::MaxDepthTooLarge(self.max_depth))
        } else if !(self.min_region_size.is_finite() && self.min_region_size >= 0.0) {
            Err(OctreeError::InvalidMinRegionSize(self.min_region_size))
        } else {
            Ok(())
        }
    }

    /// Whether a leaf covering `region` at the given `depth` is allowed to split.
    pub(crate) fn can_split(&self, region: Bounds3, depth: u8) -> bool {
        depth < self.max_depth && (region.size() / 2.0).min_element() >= self.min_region_size
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            min_region_size: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(OctreeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_capacity() {
        let config = OctreeConfig::default().with_capacity(0);
        assert_eq!(config.validate(), Err(OctreeError::ZeroCapacity));
    }

    #[test]
    fn max_depth_limit() {
        let config = OctreeConfig::default().with_max_depth(OctreeConfig::MAX_DEPTH);
        assert_eq!(config.validate(), Ok(()));
        let config = config.with_max_depth(OctreeConfig::MAX_DEPTH + 1);
        assert_eq!(
            config.validate(),
            Err(OctreeError::MaxDepthTooLarge(OctreeConfig::MAX_DEPTH + 1))
        );
    }

    #[test]
    fn invalid_min_region_size() {
        for size in [-1.0, f64::NAN, f64::INFINITY] {
            let config = OctreeConfig::default().with_min_region_size(size);
            assert!(matches!(
                config.validate(),
                Err(OctreeError::InvalidMinRegionSize(_))
            ));
        }
    }

    #[test]
    fn can_split() {
        let config = OctreeConfig::default()
            .with_max_depth(2)
            .with_min_region_size(1.0);
        let region = Bounds3::cube(DVec3::ZERO, 4.0);
        assert!(config.can_split(region, 0));
        assert!(config.can_split(region, 1));
        assert!(!config.can_split(region, 2));
        // octants would be 0.5 wide
        assert!(!config.can_split(Bounds3::cube(DVec3::ZERO, 1.0), 0));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            OctreeError::MaxDepthTooLarge(40).to_string(),
            "max depth 40 exceeds the supported maximum of 32"
        );
        assert_eq!(
            OctreeError::ZeroCapacity.to_string(),
            "capacity must be at least 1"
        );
    }
}
