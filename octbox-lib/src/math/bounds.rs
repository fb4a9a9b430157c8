use enum_map::EnumMap;
use glam::{BVec3, DVec3};

use crate::math_enums::Corner3;

/// Floating point axis-aligned bounds in 3D-space.
///
/// Both limits are inclusive, so boxes that merely touch on a face, edge or corner are considered
/// intersecting and a box always fits inside itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds3 {
    /// The inclusive lower limit of the bounds.
    min: DVec3,
    /// The inclusive upper limit of the bounds.
    max: DVec3,
}

impl Bounds3 {
    /// Constructs [`Bounds3`] from the given inclusive `min` and `max` corners.
    ///
    /// # Panics
    ///
    /// Panics if `min` exceeds `max` along any axis or if either corner is not finite.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self::checked_new(min, max).expect("min should not exceed max and both should be finite")
    }

    /// Constructs [`Bounds3`] from the given inclusive `min` and `max` corners.
    ///
    /// Returns [`None`] if `min` exceeds `max` along any axis or if either corner is not finite.
    pub fn checked_new(min: DVec3, max: DVec3) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min.cmple(max).all()).then_some(Self { min, max })
    }

    /// Constructs [`Bounds3`] with the given `size` around `center`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is negative along any axis or if the result is not finite.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// Constructs a cube with side length `side` around `center`.
    ///
    /// # Panics
    ///
    /// Panics if `side` is negative or if the result is not finite.
    pub fn cube(center: DVec3, side: f64) -> Self {
        Self::from_center_size(center, DVec3::splat(side))
    }

    /// Constructs empty [`Bounds3`] covering just the given `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point` is not finite.
    pub fn point(point: DVec3) -> Self {
        Self::new(point, point)
    }

    /// The inclusive lower limit of the bounds.
    pub fn min(self) -> DVec3 {
        self.min
    }

    /// The inclusive upper limit of the bounds.
    pub fn max(self) -> DVec3 {
        self.max
    }

    pub fn center(self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(self) -> DVec3 {
        self.max - self.min
    }

    /// Whether the bounds have no extent along _any_ axis.
    ///
    /// I.e., not only a single point but also e.g. a flat `0x1x2` box is considered "degenerate".
    pub fn is_degenerate(self) -> bool {
        self.min.cmpeq(self.max).any()
    }

    /// Whether the given `point` lies within the bounds.
    pub fn contains(self, point: DVec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Whether `self` lies entirely within `other`.
    pub fn fits_in(self, other: Self) -> bool {
        other.encloses(self)
    }

    /// Whether the bounds fully enclose `other`.
    pub fn encloses(self, other: Self) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Whether the bounds share at least a single point with `other`.
    pub fn intersects(self, other: Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        !self.intersects(other)
    }

    /// Returns the octant of the bounds at the given `corner`.
    ///
    /// Limits are picked from `min`, [`Self::center`] and `max` rather than calculated from the
    /// size, so the eight octants tile the bounds exactly.
    pub fn octant(self, corner: Corner3) -> Self {
        let center = self.center();
        let upper = BVec3::from(corner);
        Self {
            min: DVec3::select(upper, center, self.min),
            max: DVec3::select(upper, self.max, center),
        }
    }

    /// Splits the bounds into eight equally sized octants.
    pub fn split(self) -> EnumMap<Corner3, Self> {
        EnumMap::from_fn(|corner| self.octant(corner))
    }
}

#[cfg(test)]
mod tests {
    use glam::dvec3;

    use super::*;

    fn bounds(min: [f64; 3], max: [f64; 3]) -> Bounds3 {
        Bounds3::new(min.into(), max.into())
    }

    #[test]
    fn cube() {
        assert_eq!(
            Bounds3::cube(DVec3::ZERO, 2.0),
            bounds([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0])
        );
        assert_eq!(
            Bounds3::cube(dvec3(2.0, 2.0, 3.0), 1.0),
            bounds([1.5, 1.5, 2.5], [2.5, 2.5, 3.5])
        );
    }

    #[test]
    fn center_and_size() {
        let b = bounds([1.0, 2.0, 3.0], [3.0, 6.0, 11.0]);
        assert_eq!(b.center(), dvec3(2.0, 4.0, 7.0));
        assert_eq!(b.size(), dvec3(2.0, 4.0, 8.0));
    }

    #[test]
    fn checked_new_rejects_inverted() {
        assert!(Bounds3::checked_new(DVec3::ONE, DVec3::ZERO).is_none());
        assert!(Bounds3::checked_new(dvec3(0.0, 1.0, 0.0), dvec3(1.0, 0.0, 1.0)).is_none());
        assert!(Bounds3::checked_new(DVec3::ZERO, DVec3::ZERO).is_some());
    }

    #[test]
    fn checked_new_rejects_non_finite() {
        assert!(Bounds3::checked_new(DVec3::ZERO, DVec3::splat(f64::INFINITY)).is_none());
        assert!(Bounds3::checked_new(DVec3::splat(f64::NAN), DVec3::ONE).is_none());
    }

    #[test]
    #[should_panic(expected = "min should not exceed max")]
    fn new_panics_on_inverted() {
        Bounds3::new(DVec3::ONE, DVec3::ZERO);
    }

    #[test]
    fn degenerate() {
        assert!(Bounds3::point(DVec3::ONE).is_degenerate());
        assert!(bounds([0.0, 0.0, 0.0], [1.0, 0.0, 2.0]).is_degenerate());
        assert!(!Bounds3::cube(DVec3::ZERO, 1.0).is_degenerate());
    }

    #[test]
    fn fits_in_is_inclusive() {
        let outer = bounds([1.0, 1.0, 1.0], [4.0, 4.0, 4.0]);
        assert!(outer.fits_in(outer));
        assert!(bounds([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]).fits_in(outer));
        assert!(!bounds([0.5, 1.0, 1.0], [3.0, 3.0, 3.0]).fits_in(outer));
        assert!(!outer.fits_in(bounds([1.0, 1.0, 1.0], [3.0, 3.0, 3.0])));
    }

    #[test]
    fn intersects_includes_touching() {
        let cube = bounds([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]);
        assert!(cube.intersects(bounds([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])));
        assert!(!cube.intersects(bounds([0.0, 0.0, 0.0], [0.9, 0.9, 0.9])));
        assert!(cube.intersects(bounds([2.0, 2.0, 2.0], [2.5, 2.5, 2.5])));
        assert!(bounds([2.0, 2.0, 2.0], [2.5, 2.5, 2.5]).intersects(cube));
        assert!(cube.is_disjoint(bounds([3.5, 0.0, 0.0], [4.0, 9.0, 9.0])));
    }

    #[test]
    fn contains_point() {
        let cube = Bounds3::cube(DVec3::ZERO, 2.0);
        assert!(cube.contains(DVec3::ONE));
        assert!(cube.contains(DVec3::ZERO));
        assert!(!cube.contains(dvec3(1.1, 0.0, 0.0)));
    }

    #[test]
    fn octants() {
        let b = bounds([0.0, 0.0, 0.0], [2.0, 4.0, 8.0]);
        assert_eq!(
            b.octant(Corner3::X0Y0Z0),
            bounds([0.0, 0.0, 0.0], [1.0, 2.0, 4.0])
        );
        assert_eq!(
            b.octant(Corner3::X1Y0Z1),
            bounds([1.0, 0.0, 4.0], [2.0, 2.0, 8.0])
        );
        assert_eq!(
            b.octant(Corner3::X1Y1Z1),
            bounds([1.0, 2.0, 4.0], [2.0, 4.0, 8.0])
        );
    }

    #[test]
    fn split_tiles_parent() {
        let b = bounds([-3.7, 0.1, 1e6], [12.3, 0.7, 1e6 + 3.3]);
        let octants = b.split();
        let volume = |b: Bounds3| b.size().x * b.size().y * b.size().z;
        let total: f64 = octants.values().copied().map(volume).sum();
        assert!((total - volume(b)).abs() <= volume(b) * 1e-12);
        for (corner, octant) in octants {
            assert!(octant.fits_in(b));
            assert_eq!(octant, b.octant(corner));
            assert!(octant.contains(b.center()));
        }
        assert_eq!(octants[Corner3::X0Y0Z0].min(), b.min());
        assert_eq!(octants[Corner3::X1Y1Z1].max(), b.max());
    }
}
