// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use orrery_math::{FloatCodec, MathError, Mat4, Vec3, EPSILON};

use crate::types::ray::Ray;
use crate::types::transform::Transform;

/// Oriented plane `normal · p + constant = 0`.
///
/// Conventions:
/// - `normal` is unit length, except for the zero plane produced by
///   degenerate constructions.
/// - [`Plane::distance`] is signed: positive on the side the normal points
///   to ("outside" for frustum planes), negative behind it.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    normal: Vec3,
    constant: f32,
}

impl Plane {
    /// The degenerate plane: zero normal and constant, distance 0 everywhere.
    pub const ZERO: Self = Self::new(Vec3::ZERO, 0.0);

    /// The plane `z = 0` facing +Z.
    pub const XY: Self = Self::new(Vec3::UNIT_Z, 0.0);

    /// Creates a plane from raw components; `normal` is taken as given.
    #[must_use]
    pub const fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Plane through three points, facing along `(b - a) × (c - a)`.
    ///
    /// Collinear or coincident points yield [`Plane::ZERO`].
    #[must_use]
    pub fn from_points(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        let normal = b.sub(a).cross(&c.sub(a)).normalize();
        if normal.is_zero() {
            return Self::ZERO;
        }
        Self::new(normal, -normal.dot(a))
    }

    /// Plane through `point` facing along `normal` (normalized here).
    #[must_use]
    pub fn from_point_normal(point: &Vec3, normal: &Vec3) -> Self {
        let n = normal.normalize();
        Self::new(n, -n.dot(point))
    }

    /// Unit normal.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane constant (negated distance of the plane from the origin).
    #[must_use]
    pub fn constant(&self) -> f32 {
        self.constant
    }

    /// Signed distance from the plane to `point`.
    #[must_use]
    pub fn distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Closest point on the plane to `point`.
    #[must_use]
    pub fn project_point(&self, point: &Vec3) -> Vec3 {
        point.add_scaled(&self.normal, -self.distance(point))
    }

    /// The same plane facing the other way.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(self.normal.negate(), -self.constant)
    }

    /// Point where `ray` crosses the plane, if it does so at or ahead of the
    /// ray origin. Rays within `EPSILON` of parallel never hit.
    #[must_use]
    pub fn ray_intersection(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(&ray.direction());
        if denom.abs() <= EPSILON {
            return None;
        }
        let t = -self.distance(&ray.origin()) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.point_at(t))
    }

    /// The plane carried through `transform`.
    ///
    /// Planes map by the inverse transpose, `[n' c'] = M⁻ᵀ [n c]`, which keeps
    /// "outside" on the same side for every transform kind (mirrors
    /// included). Fails when the transform cannot be inverted.
    pub fn transform(&self, transform: &Transform) -> Result<Self, MathError> {
        if transform.is_identity() {
            return Ok(*self);
        }
        let inv = transform.invert()?.to_matrix();
        let [nx, ny, nz] = self.normal.to_array();
        let c = self.constant;
        let dot_col = |col: usize| {
            inv.at(0, col) * nx + inv.at(1, col) * ny + inv.at(2, col) * nz + inv.at(3, col) * c
        };
        let normal = Vec3::new(dot_col(0), dot_col(1), dot_col(2));
        let len = normal.length();
        if len <= EPSILON {
            return Ok(Self::ZERO);
        }
        Ok(Self::new(normal.scale(1.0 / len), dot_col(3) / len))
    }

    /// Affine matrix reflecting points across this plane.
    #[must_use]
    pub fn reflection_matrix(&self) -> Mat4 {
        Mat4::reflection(self.normal, self.constant)
    }
}

impl FloatCodec for Plane {
    const FIELDS: usize = 4;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.normal.to_array());
        out.push(self.constant);
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(Vec3::new(fields[0], fields[1], fields[2]), fields[3])
    }
}
