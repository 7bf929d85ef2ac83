// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::scalar::EPSILON;
use crate::{Mat3, MathError, Quat, Vec3};

/// Column‑major 4×4 matrix.
///
/// - Stored in column‑major order (`data[col * 4 + row]`), the layout GPUs
///   expect for uploads.
/// - Represents affine transforms when the bottom row is `[0, 0, 0, 1]`
///   ([`Mat4::is_affine`]); projective matrices are handled homogeneously
///   by [`Mat4::project_point`].
///
/// # Examples
/// Basic transformations:
/// ```
/// use orrery_math::{Mat4, Vec3};
/// let t = Mat4::translation(5.0, -3.0, 2.0);
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(t.transform_point(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
///
/// # Precision
/// - Uses `f32`; repeated multiplies and transforms will accumulate rounding.
/// - Rotation helpers are consistent with [`Quat`] conversions (`from_quat`).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, 0.0, // col 1
        0.0, 0.0, 1.0, 0.0, // col 2
        0.0, 0.0, 0.0, 1.0, // col 3
    ]);

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    fn from_fn(f: impl Fn(usize, usize) -> f32) -> Self {
        let mut data = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                data[col * 4 + row] = f(row, col);
            }
        }
        Self::new(data)
    }

    /// Builds a translation matrix.
    ///
    /// Column-major layout: translation occupies the last column.
    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            tx, ty, tz, 1.0, // col 3 (translation)
        ])
    }

    /// Builds a non-uniform scale matrix.
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new([
            sx, 0.0, 0.0, 0.0, // col 0
            0.0, sy, 0.0, 0.0, // col 1
            0.0, 0.0, sz, 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ])
    }

    /// Builds a uniform scale matrix.
    pub const fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    /// Builds a rotation matrix from an axis and angle in radians.
    ///
    /// The axis is normalized internally; a degenerate axis yields the
    /// identity.
    pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_quat(&Quat::from_axis_angle(axis, angle))
    }

    /// Builds a rotation matrix around the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation taking the direction of `from` onto the direction of `to`.
    pub fn rotation_between(from: Vec3, to: Vec3) -> Self {
        Self::from_quat(&Quat::from_vectors(from, to))
    }

    /// Constructs a matrix from a quaternion.
    ///
    /// This simply forwards to [`Quat::to_mat4`].
    pub fn from_quat(q: &Quat) -> Self {
        q.to_mat4()
    }

    /// Builds a rotation matrix from Euler angles in radians.
    ///
    /// Ordering: `R = R_y(yaw) * R_x(pitch) * R_z(roll)`.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use orrery_math::{Mat4, Vec3};
    /// // Yaw=90°: +Z maps to +X
    /// let r = Mat4::rotation_from_euler(FRAC_PI_2, 0.0, 0.0);
    /// let v = r.transform_direction(&Vec3::UNIT_Z);
    /// assert!((v.x() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotation_from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::rotation_y(yaw)
            .multiply(&Self::rotation_x(pitch))
            .multiply(&Self::rotation_z(roll))
    }

    /// Affine matrix with `linear` as its upper 3×3 and `translation` in the
    /// last column.
    pub fn from_linear_translation(linear: &Mat3, translation: Vec3) -> Self {
        Self::from_fn(|row, col| match (row, col) {
            (3, 3) => 1.0,
            (3, _) => 0.0,
            (_, 3) => translation.get(row),
            _ => linear.at(row, col),
        })
    }

    /// `T · R · S`: scales by `scale`, rotates by `rotation`, then
    /// translates.
    pub fn compose(translation: Vec3, rotation: &Quat, scale: Vec3) -> Self {
        let r = rotation.to_mat3();
        let linear = Mat3::from_cols(
            r.col(0).scale(scale.x()),
            r.col(1).scale(scale.y()),
            r.col(2).scale(scale.z()),
        );
        Self::from_linear_translation(&linear, translation)
    }

    /// [`Mat4::compose`] with the same scale on every axis.
    pub fn compose_uniform(translation: Vec3, rotation: &Quat, scale: f32) -> Self {
        Self::compose(translation, rotation, Vec3::new(scale, scale, scale))
    }

    /// Right-handed perspective projection (clip-space `z ∈ [-w, w]`).
    ///
    /// `fovy` is the full vertical field of view in radians.
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy * 0.5).tan();
        let range = near - far;
        Self::new([
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) / range,
            -1.0,
            0.0,
            0.0,
            2.0 * far * near / range,
            0.0,
        ])
    }

    /// Off-axis perspective projection for the near-plane rectangle
    /// `[left, right] × [bottom, top]`.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let (w, h, d) = (right - left, top - bottom, far - near);
        Self::new([
            2.0 * near / w,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * near / h,
            0.0,
            0.0,
            (right + left) / w,
            (top + bottom) / h,
            -(far + near) / d,
            -1.0,
            0.0,
            0.0,
            -2.0 * far * near / d,
            0.0,
        ])
    }

    /// Orthographic projection of the box
    /// `[left, right] × [bottom, top] × [-near, -far]`.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let (w, h, d) = (right - left, top - bottom, far - near);
        Self::new([
            2.0 / w,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / h,
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 / d,
            0.0,
            -(right + left) / w,
            -(top + bottom) / h,
            -(far + near) / d,
            1.0,
        ])
    }

    /// Reflection across the plane `normal · p + offset = 0`.
    ///
    /// The plane is normalized first; a degenerate normal yields the
    /// identity.
    pub fn reflection(normal: Vec3, offset: f32) -> Self {
        let len = normal.length();
        if len <= EPSILON {
            return Self::IDENTITY;
        }
        let n = normal.scale(1.0 / len);
        let d = offset / len;
        Self::from_linear_translation(&Mat3::reflection(n), n.scale(-2.0 * d))
    }

    /// Returns the matrix as a column‑major array.
    pub fn to_array(self) -> [f32; 16] {
        self.data
    }

    /// Element at `row`, `col`.
    ///
    /// # Panics
    /// Panics if either index exceeds 3.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// First three rows of column `col`.
    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self.at(0, col), self.at(1, col), self.at(2, col))
    }

    /// Upper-left 3×3 block (the linear part of an affine matrix).
    pub fn upper3(&self) -> Mat3 {
        Mat3::from_cols(self.column(0), self.column(1), self.column(2))
    }

    /// Translation column.
    pub fn extract_translation(&self) -> Vec3 {
        self.column(3)
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    ///
    /// # Examples
    /// ```
    /// use orrery_math::Mat4;
    /// let a = Mat4::identity();
    /// let b = Mat4::scale(2.0, 3.0, 4.0);
    /// assert_eq!(a.multiply(&b).to_array(), b.to_array());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// `self * rhs` for affine operands; the bottom rows are taken to be
    /// `[0, 0, 0, 1]` and not read.
    pub fn multiply_affine(&self, rhs: &Self) -> Self {
        Self::from_fn(|row, col| {
            if row == 3 {
                return if col == 3 { 1.0 } else { 0.0 };
            }
            let linear: f32 = (0..3).map(|k| self.at(row, k) * rhs.at(k, col)).sum();
            if col == 3 {
                linear + self.at(row, 3)
            } else {
                linear
            }
        })
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_fn(|row, col| self.at(col, row))
    }

    /// 2×2 sub-determinants shared by [`Mat4::determinant`] and
    /// [`Mat4::invert`]: `s` from the top two rows, `c` from the bottom two.
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let a = |r, k| self.at(r, k);
        let s = [
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
            a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
            a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
            a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
        ];
        let c = [
            a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
            a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
            a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
            a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
            a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
            a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
        ];
        (s, c)
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Determinant of the upper 3×3 block.
    pub fn determinant3(&self) -> f32 {
        self.upper3().determinant()
    }

    /// General inverse by cofactor expansion.
    ///
    /// Fails with [`MathError::SingularMatrix`] when the determinant is zero
    /// (or subnormal); projective matrices are inverted like any other.
    pub fn invert(&self) -> Result<Self, MathError> {
        let (s, c) = self.minors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1]
            + s[5] * c[0];
        let inv = 1.0 / MathError::check_determinant(det)?;
        let a = |r, k| self.at(r, k);
        let rows = [
            [
                a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3],
                -a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3],
                a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3],
                -a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3],
            ],
            [
                -a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1],
                a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1],
                -a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1],
                a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1],
            ],
            [
                a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0],
                -a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0],
                a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0],
                -a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0],
            ],
            [
                -a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0],
                a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0],
                -a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0],
                a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0],
            ],
        ];
        Ok(Self::from_fn(|row, col| rows[row][col] * inv))
    }

    /// Inverse of an affine matrix: inverts the 3×3 block and maps the
    /// translation back through it (`t' = -(M₃⁻¹ t)`).
    pub fn invert_affine(&self) -> Result<Self, MathError> {
        let linear = self.upper3().invert()?;
        let translation = linear.transform(&self.extract_translation()).negate();
        Ok(Self::from_linear_translation(&linear, translation))
    }

    /// Elementwise linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::from_fn(|row, col| {
            let a = self.at(row, col);
            a + t * (other.at(row, col) - a)
        })
    }

    /// Interpolates the twelve affine elements; the bottom row stays
    /// `[0, 0, 0, 1]`.
    pub fn lerp_affine(&self, other: &Self, t: f32) -> Self {
        Self::from_fn(|row, col| {
            if row == 3 {
                return if col == 3 { 1.0 } else { 0.0 };
            }
            let a = self.at(row, col);
            a + t * (other.at(row, col) - a)
        })
    }

    /// Transforms a point (assumes `w = 1`, no perspective divide).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let x = point.component(0);
        let y = point.component(1);
        let z = point.component(2);

        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z + self.at(0, 3);
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z + self.at(1, 3);
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z + self.at(2, 3);

        Vec3::new(nx, ny, nz)
    }

    /// Transforms a direction vector (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        let x = direction.component(0);
        let y = direction.component(1);
        let z = direction.component(2);

        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z;
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z;
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z;

        Vec3::new(nx, ny, nz)
    }

    /// Transforms a point with `w = 1` and divides by the resulting `w`.
    ///
    /// Points mapping to `w = 0` come back with non-finite components.
    pub fn project_point(&self, point: &Vec3) -> Vec3 {
        let p = self.transform_point(point);
        let w = self.at(3, 0) * point.x()
            + self.at(3, 1) * point.y()
            + self.at(3, 2) * point.z()
            + self.at(3, 3);
        p.scale(1.0 / w)
    }

    /// Rotation of the upper 3×3 block with scale and skew removed by polar
    /// decomposition (see [`Mat3::polar_rotation`]).
    pub fn extract_rotation(&self) -> Result<Quat, MathError> {
        let r = self.upper3().polar_rotation()?;
        Ok(Quat::from_axes(r.col(0), r.col(1), r.col(2)))
    }

    /// Per-axis scale: the lengths of the three basis columns.
    pub fn extract_scale(&self) -> Vec3 {
        Vec3::new(
            self.column(0).length(),
            self.column(1).length(),
            self.column(2).length(),
        )
    }

    /// Cube root of the 3×3 determinant; negative when mirrored.
    pub fn approximate_uniform_scale(&self) -> f32 {
        self.determinant3().cbrt()
    }

    /// Returns `true` if the bottom row is exactly `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.at(3, 0) == 0.0 && self.at(3, 1) == 0.0 && self.at(3, 2) == 0.0 && self.at(3, 3) == 1.0
    }

    /// Returns `true` if the linear part flips handedness.
    pub fn is_mirrored(&self) -> bool {
        self.determinant3() < 0.0
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self { data: value }
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl core::ops::MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl core::ops::MulAssign<&Mat4> for Mat4 {
    fn mul_assign(&mut self, rhs: &Mat4) {
        *self = self.multiply(rhs);
    }
}
