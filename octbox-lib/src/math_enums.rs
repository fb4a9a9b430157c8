use enum_map::Enum;
use glam::BVec3;

/// A three-dimensional axis; `X`, `Y` or `Z`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

/// One of the eight corners of a box, which also names one of its eight octants.
///
/// Variants are ordered with `X` varying fastest, then `Y`, then `Z`. This is the fixed order in
/// which octants are produced by [`Bounds3::split`](crate::math::bounds::Bounds3::split).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Enum)]
pub enum Corner3 {
    X0Y0Z0,
    X1Y0Z0,
    X0Y1Z0,
    X1Y1Z0,
    X0Y0Z1,
    X1Y0Z1,
    X0Y1Z1,
    X1Y1Z1,
}

impl Corner3 {
    /// Whether the corner lies on the upper half along the given `axis`.
    pub fn is_upper(self, axis: Axis3) -> bool {
        (self as u8) & (1 << axis as u8) != 0
    }
}

impl From<Corner3> for BVec3 {
    fn from(value: Corner3) -> Self {
        Self::new(
            value.is_upper(Axis3::X),
            value.is_upper(Axis3::Y),
            value.is_upper(Axis3::Z),
        )
    }
}
