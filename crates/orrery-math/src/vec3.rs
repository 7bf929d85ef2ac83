// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::scalar::{acos_clamped, EPSILON};

/// 3D vector of `f32` components.
///
/// * Components may represent either points or directions depending on the
///   calling context.
/// * Use [`crate::Mat4::transform_point`] for points (homogeneous `w = 1`)
///   and [`crate::Mat4::transform_direction`] for directions (`w = 0`).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// All components `f32::MAX`.
    pub const MAX_VALUE: Self = Self::new(f32::MAX, f32::MAX, f32::MAX);

    /// All components `f32::MIN` (the most negative finite value).
    pub const MIN_VALUE: Self = Self::new(f32::MIN, f32::MIN, f32::MIN);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    pub(crate) fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Returns a copy with component `idx` (0 = x, 1 = y, 2 = z) replaced.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn with(self, idx: usize, value: f32) -> Self {
        let mut data = self.data;
        data[idx] = value;
        Self { data }
    }

    /// Component `idx` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn get(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    fn map2(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.component(0), other.component(0)),
            f(self.component(1), other.component(1)),
            f(self.component(2), other.component(2)),
        )
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        self.map2(other, |a, b| a + b)
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        self.map2(other, |a, b| a - b)
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
        )
    }

    /// Returns `self + other * scale` without an intermediate value.
    pub fn add_scaled(&self, other: &Self, scale: f32) -> Self {
        self.map2(other, |a, b| a + b * scale)
    }

    /// Componentwise product.
    pub fn mul(&self, other: &Self) -> Self {
        self.map2(other, |a, b| a * b)
    }

    /// Componentwise minimum.
    pub fn min(&self, other: &Self) -> Self {
        self.map2(other, f32::min)
    }

    /// Componentwise maximum.
    pub fn max(&self, other: &Self) -> Self {
        self.map2(other, f32::max)
    }

    /// Componentwise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(
            self.component(0).abs(),
            self.component(1).abs(),
            self.component(2).abs(),
        )
    }

    /// Negated vector.
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared(&self, other: &Self) -> f32 {
        self.sub(other).length_squared()
    }

    /// Manhattan (L1) distance to another point.
    pub fn manhattan_distance(&self, other: &Self) -> f32 {
        let d = self.sub(other).abs();
        d.component(0) + d.component(1) + d.component(2)
    }

    /// Normalises the vector, returning the zero vector if length ≤ `EPSILON`.
    ///
    /// `EPSILON` is a degeneracy threshold (not numeric precision): vectors
    /// with length ≤ `EPSILON` are considered degenerate and normalized to
    /// zero so downstream callers can detect them with [`Vec3::is_zero`].
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Returns `true` if every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|c| *c == 0.0)
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        self.map2(other, |a, b| a + t * (b - a))
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`. If either vector is
    /// degenerate the angle is `π / 2` (the normalized zero vector has a zero
    /// dot product with everything).
    pub fn angle(&self, other: &Self) -> f32 {
        acos_clamped(self.normalize().dot(&other.normalize()))
    }

    /// Reflects an incident direction about a surface with unit `normal`:
    /// `v - 2 (v · n) n`.
    pub fn reflect(&self, normal: &Self) -> Self {
        self.add_scaled(normal, -2.0 * self.dot(normal))
    }

    /// Refracts a unit incident direction through a surface with unit
    /// `normal`, where `eta` is the ratio of refractive indices
    /// (incident over transmitted).
    ///
    /// Returns `None` on total internal reflection.
    pub fn refract(&self, normal: &Self, eta: f32) -> Option<Self> {
        let cos_i = -self.dot(normal);
        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k < 0.0 {
            return None;
        }
        Some(self.scale(eta).add_scaled(normal, eta * cos_i - k.sqrt()))
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use orrery_math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3::add(&self, &rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3::sub(&self, &rhs)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.scale(self)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vec3::add(self, &rhs);
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Vec3::sub(self, &rhs);
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = self.scale(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_of_degenerate_vector_is_zero() {
        assert_eq!(Vec3::new(1e-7, 0.0, 0.0).normalize(), Vec3::ZERO);
        assert!(Vec3::ZERO.normalize().is_zero());
    }

    #[test]
    fn refract_reports_total_internal_reflection() {
        // Grazing ray leaving glass into air.
        let incident = Vec3::new(0.9, -0.1, 0.0).normalize();
        assert!(incident.refract(&Vec3::UNIT_Y, 1.5).is_none());
        // Head-on rays pass straight through.
        let straight = Vec3::new(0.0, -1.0, 0.0)
            .refract(&Vec3::UNIT_Y, 1.0 / 1.5)
            .expect("head-on ray refracts");
        assert!(straight.distance(&Vec3::new(0.0, -1.0, 0.0)) < 1e-6);
    }
}
