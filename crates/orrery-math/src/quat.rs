// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::f32::consts::{FRAC_PI_2, PI};
use core::ops::{Mul, MulAssign};

use crate::scalar::{acos_clamped, asin_clamped, EPSILON};
use crate::{Mat3, Mat4, Prng, Vec3};

/// Sine magnitude beyond which Euler extraction takes the gimbal-lock branch.
const GIMBAL_LIMIT: f32 = 0.999_999;

/// Quaternion stored as `(x, y, z, w)` with `w` as the scalar part.
///
/// * All angles are expressed in radians.
/// * Rotations expect unit length; operations that drift (long product
///   chains, [`Quat::integrate`]) renormalize or say so.
/// * Equality follows the double cover of SO(3): `q == -q`.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// X component of the vector part.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component of the vector part.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component of the vector part.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Scalar part.
    pub fn w(&self) -> f32 {
        self.data[3]
    }

    fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON` to
    /// avoid undefined orientations.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        Self::from_unit_axis_angle(axis.scale(1.0 / len_sq.sqrt()), angle)
    }

    fn from_unit_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let scaled = axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Rotation about the X axis.
    pub fn from_angle_x(angle: f32) -> Self {
        Self::from_unit_axis_angle(Vec3::UNIT_X, angle)
    }

    /// Rotation about the Y axis.
    pub fn from_angle_y(angle: f32) -> Self {
        Self::from_unit_axis_angle(Vec3::UNIT_Y, angle)
    }

    /// Rotation about the Z axis.
    pub fn from_angle_z(angle: f32) -> Self {
        Self::from_unit_axis_angle(Vec3::UNIT_Z, angle)
    }

    /// Shortest rotation taking the direction of `from` onto the direction of
    /// `to`.
    ///
    /// Nearly parallel inputs give the identity. Nearly opposite inputs have
    /// no unique axis, so a half turn about an arbitrary axis orthogonal to
    /// `from` is returned.
    pub fn from_vectors(from: Vec3, to: Vec3) -> Self {
        let angle = from.angle(&to);
        if angle < EPSILON {
            return Self::identity();
        }
        if angle <= PI - EPSILON {
            let axis = from.cross(&to);
            let len = axis.length();
            if len > 0.0 {
                return Self::from_unit_axis_angle(axis.scale(1.0 / len), angle);
            }
        }
        // Exactly parallel (or zero) inputs: `acos` is too coarse near 1 to
        // have caught them above.
        if from.dot(&to) >= 0.0 {
            return Self::identity();
        }
        let axis = Vec3::new(0.0, from.z(), -from.y());
        let len = axis.length();
        let axis = if len < EPSILON {
            Vec3::new(-from.z(), 0.0, from.x()).normalize()
        } else {
            axis.scale(1.0 / len)
        };
        Self::from_unit_axis_angle(axis, PI)
    }

    /// Rotation by `x` about X, then `y` about Y, then `z` about Z
    /// (`R = Rz · Ry · Rx`).
    pub fn from_angles_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_angle_z(z)
            .multiply(&Self::from_angle_y(y))
            .multiply(&Self::from_angle_x(x))
    }

    /// Rotation by `z` about Z, then `x` about X, then `y` about Y
    /// (`R = Ry · Rx · Rz`).
    pub fn from_angles_zxy(x: f32, y: f32, z: f32) -> Self {
        Self::from_angle_y(y)
            .multiply(&Self::from_angle_x(x))
            .multiply(&Self::from_angle_z(z))
    }

    /// Pitch `x` then yaw `y` ([`Quat::from_angles_xyz`] with no Z turn).
    pub fn from_angles_xy(x: f32, y: f32) -> Self {
        Self::from_angles_xyz(x, y, 0.0)
    }

    /// Pitch `x` then roll `z` ([`Quat::from_angles_xyz`] with no Y turn).
    pub fn from_angles_xz(x: f32, z: f32) -> Self {
        Self::from_angles_xyz(x, 0.0, z)
    }

    /// Builds the rotation whose matrix columns are the orthonormal axes
    /// `nx`, `ny`, `nz` (the images of the unit axes).
    ///
    /// Magnitudes come from the diagonal; signs are recovered by comparing
    /// the mirrored off-diagonal pairs, which keeps `w ≥ 0`.
    pub fn from_axes(nx: Vec3, ny: Vec3, nz: Vec3) -> Self {
        let (nxx, nyy, nzz) = (nx.x(), ny.y(), nz.z());
        let x2 = ((1.0 + nxx - nyy - nzz) * 0.25).max(0.0);
        let y2 = ((1.0 - nxx + nyy - nzz) * 0.25).max(0.0);
        let z2 = ((1.0 - nxx - nyy + nzz) * 0.25).max(0.0);
        let w2 = (1.0 - x2 - y2 - z2).max(0.0);
        let sign = |positive: bool| if positive { 1.0 } else { -1.0 };
        Self::new(
            x2.sqrt() * sign(ny.z() >= nz.y()),
            y2.sqrt() * sign(nz.x() >= nx.z()),
            z2.sqrt() * sign(nx.y() >= ny.x()),
            w2.sqrt(),
        )
        .normalize()
    }

    /// Uniformly distributed random rotation.
    ///
    /// Azimuth and roll are uniform on `[-π, π)`; elevation is the arcsine of
    /// a uniform value so orientations are spread evenly over the sphere.
    pub fn random(prng: &mut Prng) -> Self {
        let azimuth = prng.next_range(-PI, PI);
        let elevation = asin_clamped(prng.next_range(-1.0, 1.0));
        let roll = prng.next_range(-PI, PI);
        Self::from_angles_xyz(roll, elevation, azimuth)
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// The result applies `other` first and then `self`. Quaternion
    /// multiplication is non‑commutative.
    ///
    /// Inputs need not be normalized; when both operands are unit
    /// quaternions, the result represents the composed rotation and remains a
    /// unit quaternion up to floating‑point error (consider re‑normalizing over
    /// long chains).
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use orrery_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// // Non‑commutative: pitch*yaw is different
    /// assert_ne!(yaw.multiply(&pitch).to_array(), pitch.multiply(&yaw).to_array());
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let aw = self.component(3);

        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        let bw = other.component(3);

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Quaternion norm.
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalises the quaternion; returns identity when norm is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::identity();
        }
        self.scale(1.0 / len)
    }

    fn scale(&self, s: f32) -> Self {
        Self::new(
            self.component(0) * s,
            self.component(1) * s,
            self.component(2) * s,
            self.component(3) * s,
        )
    }

    /// Conjugate `(-x, -y, -z, w)`.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Inverse rotation. Unit length is assumed, so this is the conjugate.
    pub fn invert(&self) -> Self {
        self.conjugate()
    }

    /// Spherical linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    ///
    /// Interpolates along the shorter arc (negating `other` when the cosine
    /// is negative). Below `EPSILON` of angular separation the sine ratio is
    /// ill-conditioned, so the blend falls back to a renormalized lerp.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut cosa = self.dot(other);
        let mut target = *other;
        if cosa < 0.0 {
            target = target.scale(-1.0);
            cosa = -cosa;
        }
        if 1.0 - cosa < EPSILON {
            let s0 = 1.0 - t;
            return self.scale(s0).sum(&target.scale(t)).normalize();
        }
        let angle = acos_clamped(cosa);
        let sina = angle.sin();
        let s0 = ((1.0 - t) * angle).sin() / sina;
        let s1 = (t * angle).sin() / sina;
        self.scale(s0).sum(&target.scale(s1))
    }

    fn sum(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) + other.component(0),
            self.component(1) + other.component(1),
            self.component(2) + other.component(2),
            self.component(3) + other.component(3),
        )
    }

    /// Rotates a vector: `v' = v + 2w(u × v) + 2u × (u × v)`.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let u = Vec3::new(self.x(), self.y(), self.z());
        let uv = u.cross(v);
        let uuv = u.cross(&uv);
        v.add(&uv.scale(self.w()).add(&uuv).scale(2.0))
    }

    /// Image of the unit X axis (the first rotation-matrix column).
    pub fn rotate_unit_x(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        Vec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
        )
    }

    /// Image of the unit Y axis.
    pub fn rotate_unit_y(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        Vec3::new(
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
        )
    }

    /// Image of the unit Z axis.
    pub fn rotate_unit_z(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        Vec3::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        )
    }

    /// Advances the orientation by world-space angular `velocity`
    /// (radians/second) over `dt` seconds.
    ///
    /// First-order: `q + dt · ½ · ω · q`, then renormalized. The step always
    /// drifts off unit length, so the normalization is part of the contract.
    pub fn integrate(&self, velocity: &Vec3, dt: f32) -> Self {
        let omega = Self::new(
            0.5 * velocity.x(),
            0.5 * velocity.y(),
            0.5 * velocity.z(),
            0.0,
        );
        self.sum(&omega.multiply(self).scale(dt)).normalize()
    }

    /// Inverse of [`Quat::from_angles_xyz`]: returns `(x, y, z)` angles.
    ///
    /// When the Y turn is ±90° the X and Z turns share an axis; the whole
    /// remaining rotation is reported in `x` and `z` is zero.
    pub fn to_angles_xyz(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        let sin_y = 2.0 * (w * y - x * z);
        if sin_y.abs() >= GIMBAL_LIMIT {
            let sign = sin_y.signum();
            let r01 = 2.0 * (x * y - w * z);
            let r11 = 1.0 - 2.0 * (x * x + z * z);
            return Vec3::new((sign * r01).atan2(r11), sign * FRAC_PI_2, 0.0);
        }
        Vec3::new(
            (2.0 * (y * z + w * x)).atan2(1.0 - 2.0 * (x * x + y * y)),
            asin_clamped(sin_y),
            (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (y * y + z * z)),
        )
    }

    /// Inverse of [`Quat::from_angles_zxy`]: returns `(x, y, z)` angles.
    ///
    /// When the X turn is ±90° the Y and Z turns share an axis; the whole
    /// remaining rotation is reported in `y` and `z` is zero.
    pub fn to_angles_zxy(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        let sin_x = 2.0 * (w * x - y * z);
        if sin_x.abs() >= GIMBAL_LIMIT {
            let sign = sin_x.signum();
            let r01 = 2.0 * (x * y - w * z);
            let r00 = 1.0 - 2.0 * (y * y + z * z);
            return Vec3::new(sign * FRAC_PI_2, (sign * r01).atan2(r00), 0.0);
        }
        Vec3::new(
            asin_clamped(sin_x),
            (2.0 * (x * z + w * y)).atan2(1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (x * x + z * z)),
        )
    }

    /// Returns `true` when both quaternions encode the same rotation
    /// (componentwise equal or exactly negated).
    pub fn same_rotation(&self, other: &Self) -> bool {
        self.data == other.data
            || self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| *a == -*b)
    }

    /// Converts the quaternion to a rotation matrix (column-major 3×3).
    pub fn to_mat3(&self) -> Mat3 {
        let q = self.normalize();
        Mat3::from_cols(q.rotate_unit_x(), q.rotate_unit_y(), q.rotate_unit_z())
    }

    /// Converts the quaternion to a rotation matrix (column-major 4×4).
    pub fn to_mat4(&self) -> Mat4 {
        let q = self.normalize();
        let x = q.component(0);
        let y = q.component(1);
        let z = q.component(2);
        let w = q.component(3);

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat4::new([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quat {
    fn eq(&self, other: &Self) -> bool {
        self.same_rotation(other)
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(&rhs)
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}
