// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use orrery_math::{FloatCodec, Vec3};

use crate::types::transform::Transform;

/// Half-line `origin + t · direction`, `t ≥ 0`.
///
/// The direction is stored as given; intersection routines do not require
/// it to be unit length, but `t` values are only distances when it is.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray.
    #[must_use]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Start point.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `origin + t · direction`.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin.add_scaled(&self.direction, t)
    }

    /// The ray carried through `transform`, with a unit direction.
    ///
    /// The direction is taken between the images of two points on the ray,
    /// so projective transforms bend it correctly.
    #[must_use]
    pub fn transform(&self, transform: &Transform) -> Self {
        let origin = transform.transform_point(&self.origin);
        let ahead = transform.transform_point(&self.point_at(1.0));
        Self::new(origin, ahead.sub(&origin).normalize())
    }
}

/// Origin then direction.
impl FloatCodec for Ray {
    const FIELDS: usize = 6;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.origin.to_array());
        out.extend_from_slice(&self.direction.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(
            Vec3::new(fields[0], fields[1], fields[2]),
            Vec3::new(fields[3], fields[4], fields[5]),
        )
    }
}
