//! Geometry shared by the octbox crates: axis-aligned [`Bounds3`](math::bounds::Bounds3) and the
//! [`Corner3`](math_enums::Corner3) enum naming the eight octants of a box.

pub mod math;
pub mod math_enums;
