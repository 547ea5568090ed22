use glam::{IVec3, Vec3};

use crate::errors::HandError;

/// A local rotation axis for bending or tilting.
///
/// Authoring tools express axes as integer vectors with exactly one
/// component set to 1. Any other vector is rejected when converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_ivec3(self) -> IVec3 {
        match self {
            Axis::X => IVec3::X,
            Axis::Y => IVec3::Y,
            Axis::Z => IVec3::Z,
        }
    }
}

impl TryFrom<IVec3> for Axis {
    type Error = HandError;

    fn try_from(value: IVec3) -> Result<Self, Self::Error> {
        match value {
            IVec3 { x: 1, y: 0, z: 0 } => Ok(Axis::X),
            IVec3 { x: 0, y: 1, z: 0 } => Ok(Axis::Y),
            IVec3 { x: 0, y: 0, z: 1 } => Ok(Axis::Z),
            other => Err(HandError::UnsupportedAxis(other)),
        }
    }
}

impl From<Axis> for Vec3 {
    fn from(axis: Axis) -> Self {
        axis.unit()
    }
}
