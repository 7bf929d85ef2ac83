// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Mul, MulAssign};

use crate::scalar::{signed_sqrt, EPSILON, POLAR_MAX_ITERATIONS};
use crate::{MathError, Quat, Vec2, Vec3};

/// Column‑major 3×3 matrix.
///
/// Serves two roles:
/// - a 3D linear map (rotations, scales, reflections) acting on [`Vec3`];
/// - a 2D affine transform in homogeneous form acting on [`Vec2`], with
///   translation in the last column and `[0, 0, 1]` as the bottom row.
///
/// "Affine" is a property checked by [`Mat3::is_affine`]; the `*_affine`
/// fast paths assume it without checking.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    data: [f32; 9],
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, // col 1
        0.0, 0.0, 1.0, // col 2
    ]);

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a matrix from its three columns.
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        let [a, b, c] = c0.to_array();
        let [d, e, f] = c1.to_array();
        let [g, h, i] = c2.to_array();
        Self::new([a, b, c, d, e, f, g, h, i])
    }

    pub(crate) fn from_fn(f: impl Fn(usize, usize) -> f32) -> Self {
        let mut data = [0.0; 9];
        for col in 0..3 {
            for row in 0..3 {
                data[col * 3 + row] = f(row, col);
            }
        }
        Self::new(data)
    }

    /// Returns the matrix as a column‑major array.
    pub fn to_array(self) -> [f32; 9] {
        self.data
    }

    /// Element at `row`, `col`.
    ///
    /// # Panics
    /// Panics if either index exceeds 2.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Column `col` as a vector.
    pub fn col(&self, col: usize) -> Vec3 {
        Vec3::new(self.at(0, col), self.at(1, col), self.at(2, col))
    }

    /// Row `row` as a vector.
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::new(self.at(row, 0), self.at(row, 1), self.at(row, 2))
    }

    /// Rotation of `angle` radians about `axis`; a degenerate axis yields
    /// the identity.
    pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Self {
        Quat::from_axis_angle(axis, angle).to_mat3()
    }

    /// Rotation taking the direction of `from` onto the direction of `to`.
    ///
    /// Parallel inputs give the identity; opposite inputs give a half turn
    /// about an arbitrary orthogonal axis (see [`Quat::from_vectors`]).
    pub fn rotation_between(from: Vec3, to: Vec3) -> Self {
        Quat::from_vectors(from, to).to_mat3()
    }

    /// Rotation matrix of a quaternion.
    pub fn from_quat(q: &Quat) -> Self {
        q.to_mat3()
    }

    /// Counter-clockwise 2D rotation about the origin.
    pub fn rotation_2d(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, s, 0.0, //
            -s, c, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// Non-uniform 3D scale.
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new([
            sx, 0.0, 0.0, //
            0.0, sy, 0.0, //
            0.0, 0.0, sz,
        ])
    }

    /// 2D scale (homogeneous).
    pub const fn scale_2d(sx: f32, sy: f32) -> Self {
        Self::scale(sx, sy, 1.0)
    }

    /// 2D translation (homogeneous; translation in the last column).
    pub const fn translation_2d(tx: f32, ty: f32) -> Self {
        Self::new([
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            tx, ty, 1.0,
        ])
    }

    /// 2D affine transform applying `scale`, then `rotation`, then
    /// `translation` (`M = T · R · S`).
    pub fn transform_2d(translation: Vec2, rotation: f32, scale: Vec2) -> Self {
        let (s, c) = rotation.sin_cos();
        let (sx, sy) = (scale.x(), scale.y());
        Self::new([
            c * sx,
            s * sx,
            0.0,
            -s * sy,
            c * sy,
            0.0,
            translation.x(),
            translation.y(),
            1.0,
        ])
    }

    /// Reflection across the plane through the origin with the given
    /// normal: `I - 2 n nᵀ`. A degenerate normal yields the identity.
    pub fn reflection(normal: Vec3) -> Self {
        let n = normal.normalize();
        Self::from_fn(|row, col| {
            let id = if row == col { 1.0 } else { 0.0 };
            id - 2.0 * n.get(row) * n.get(col)
        })
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_fn(|row, col| self.at(col, row))
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_fn(|row, col| (0..3).map(|k| self.at(row, k) * rhs.at(k, col)).sum())
    }

    /// `self * rhs` for 2D affine operands: skips the bottom row, which is
    /// `[0, 0, 1]` by assumption.
    pub fn multiply_affine(&self, rhs: &Self) -> Self {
        Self::from_fn(|row, col| {
            if row == 2 {
                return if col == 2 { 1.0 } else { 0.0 };
            }
            let linear = self.at(row, 0) * rhs.at(0, col) + self.at(row, 1) * rhs.at(1, col);
            if col == 2 {
                linear + self.at(row, 2)
            } else {
                linear
            }
        })
    }

    /// Scales every element.
    pub fn scale_elements(&self, s: f32) -> Self {
        Self::from_fn(|row, col| self.at(row, col) * s)
    }

    /// Elementwise sum.
    pub fn add_elements(&self, other: &Self) -> Self {
        Self::from_fn(|row, col| self.at(row, col) + other.at(row, col))
    }

    /// Matrix of cofactors, `C(r, c) = (-1)^(r + c) · minor(r, c)`.
    ///
    /// Equals `det · (M⁻¹)ᵀ` for invertible matrices.
    pub fn cofactor(&self) -> Self {
        let m = |r, c| self.at(r, c);
        Self::from_fn(|row, col| {
            let (r0, r1) = match row {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let (c0, c1) = match col {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let minor = m(r0, c0) * m(r1, c1) - m(r0, c1) * m(r1, c0);
            if (row + col) % 2 == 0 {
                minor
            } else {
                -minor
            }
        })
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        let c = self.cofactor();
        self.at(0, 0) * c.at(0, 0) + self.at(0, 1) * c.at(0, 1) + self.at(0, 2) * c.at(0, 2)
    }

    /// General inverse by cofactor expansion.
    ///
    /// Fails with [`MathError::SingularMatrix`] when the determinant is zero
    /// (or subnormal).
    pub fn invert(&self) -> Result<Self, MathError> {
        let cof = self.cofactor();
        let det = self.at(0, 0) * cof.at(0, 0)
            + self.at(0, 1) * cof.at(0, 1)
            + self.at(0, 2) * cof.at(0, 2);
        let inv_det = 1.0 / MathError::check_determinant(det)?;
        Ok(Self::from_fn(|row, col| cof.at(col, row) * inv_det))
    }

    /// Inverse of a 2D affine matrix: inverts the 2×2 linear part and maps
    /// the translation back through it.
    pub fn invert_affine(&self) -> Result<Self, MathError> {
        let (a, b, c, d) = (self.at(0, 0), self.at(0, 1), self.at(1, 0), self.at(1, 1));
        let inv_det = 1.0 / MathError::check_determinant(a * d - b * c)?;
        let (i00, i01, i10, i11) = (d * inv_det, -b * inv_det, -c * inv_det, a * inv_det);
        let (tx, ty) = (self.at(0, 2), self.at(1, 2));
        Ok(Self::new([
            i00,
            i10,
            0.0,
            i01,
            i11,
            0.0,
            -(i00 * tx + i01 * ty),
            -(i10 * tx + i11 * ty),
            1.0,
        ]))
    }

    /// Elementwise linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::from_fn(|row, col| {
            let a = self.at(row, col);
            a + t * (other.at(row, col) - a)
        })
    }

    /// Interpolation of 2D affine matrices; the bottom row stays `[0, 0, 1]`.
    pub fn lerp_affine(&self, other: &Self, t: f32) -> Self {
        Self::from_fn(|row, col| {
            if row == 2 {
                return if col == 2 { 1.0 } else { 0.0 };
            }
            let a = self.at(row, col);
            a + t * (other.at(row, col) - a)
        })
    }

    /// Transforms a 3D vector.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Transforms a 2D point (homogeneous `w = 1`, affine assumed).
    pub fn transform_point_2d(&self, p: &Vec2) -> Vec2 {
        Vec2::new(
            self.at(0, 0) * p.x() + self.at(0, 1) * p.y() + self.at(0, 2),
            self.at(1, 0) * p.x() + self.at(1, 1) * p.y() + self.at(1, 2),
        )
    }

    /// Transforms a 2D vector, ignoring translation.
    pub fn transform_vector_2d(&self, v: &Vec2) -> Vec2 {
        Vec2::new(
            self.at(0, 0) * v.x() + self.at(0, 1) * v.y(),
            self.at(1, 0) * v.x() + self.at(1, 1) * v.y(),
        )
    }

    /// Translation of a 2D affine matrix.
    pub fn extract_translation_2d(&self) -> Vec2 {
        Vec2::new(self.at(0, 2), self.at(1, 2))
    }

    /// Per-axis 2D scale: the lengths of the two basis columns.
    pub fn extract_scale_2d(&self) -> Vec2 {
        Vec2::new(
            Vec2::new(self.at(0, 0), self.at(1, 0)).length(),
            Vec2::new(self.at(0, 1), self.at(1, 1)).length(),
        )
    }

    /// Uniform 2D scale approximating the linear part: the square root of the
    /// signed area spanned by the basis columns. Negative when mirrored.
    pub fn extract_uniform_scale(&self) -> f32 {
        signed_sqrt(self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0))
    }

    /// 2D rotation angle of the linear part.
    ///
    /// Skew and non-uniform scale are removed by polar decomposition: the
    /// 2×2 block is averaged with its inverse transpose until the squared
    /// Frobenius change drops below `EPSILON` (at most
    /// [`POLAR_MAX_ITERATIONS`] rounds), then the angle is read off the
    /// orthogonal result.
    pub fn extract_rotation(&self) -> Result<f32, MathError> {
        let (mut n00, mut n01) = (self.at(0, 0), self.at(0, 1));
        let (mut n10, mut n11) = (self.at(1, 0), self.at(1, 1));
        let mut converged = false;
        for _ in 0..POLAR_MAX_ITERATIONS {
            let (o00, o01, o10, o11) = (n00, n01, n10, n11);
            let det = MathError::check_determinant(o00 * o11 - o01 * o10)?;
            let hrdet = 0.5 / det;
            n00 = o00 * 0.5 + o11 * hrdet;
            n01 = o01 * 0.5 - o10 * hrdet;
            n10 = o10 * 0.5 - o01 * hrdet;
            n11 = o11 * 0.5 + o00 * hrdet;
            let (d00, d01, d10, d11) = (n00 - o00, n01 - o01, n10 - o10, n11 - o11);
            if d00 * d00 + d01 * d01 + d10 * d10 + d11 * d11 < EPSILON {
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::trace!("2d polar decomposition hit the iteration cap");
        }
        Ok(n10.atan2(n00))
    }

    /// Orthogonal factor of the polar decomposition of this 3×3 map.
    ///
    /// Iterates `N ← ½ (N + N⁻ᵀ)` as [`Mat3::extract_rotation`] does in 2D.
    /// Mirrored inputs converge to an improper orthogonal matrix, which is
    /// negated so the result is always a proper rotation.
    pub fn polar_rotation(&self) -> Result<Self, MathError> {
        let mut n = *self;
        let mut converged = false;
        for _ in 0..POLAR_MAX_ITERATIONS {
            let det = MathError::check_determinant(n.determinant())?;
            let next = n
                .scale_elements(0.5)
                .add_elements(&n.cofactor().scale_elements(0.5 / det));
            let delta: f32 = next
                .data
                .iter()
                .zip(n.data.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            n = next;
            if delta < EPSILON {
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::trace!("3d polar decomposition hit the iteration cap");
        }
        if n.determinant() < 0.0 {
            n = n.scale_elements(-1.0);
        }
        Ok(n)
    }

    /// Returns `true` if the bottom row is `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.at(2, 0) == 0.0 && self.at(2, 1) == 0.0 && self.at(2, 2) == 1.0
    }

    /// Returns `true` if the matrix flips handedness (negative determinant).
    pub fn is_mirrored(&self) -> bool {
        self.determinant() < 0.0
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 9]> for Mat3 {
    fn from(value: [f32; 9]) -> Self {
        Self { data: value }
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(&rhs)
    }
}

impl MulAssign for Mat3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_6;

    #[test]
    fn cofactor_determinant_expands_first_row() {
        let m = Mat3::new([2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0]);
        // Rows: [2 1 0], [0 3 1], [1 0 4]
        assert_eq!(m.determinant(), 25.0);
        assert_eq!(m.row(0), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn polar_rotation_strips_scale() {
        let m = Mat3::rotation_axis_angle(Vec3::new(1.0, 1.0, 0.0), FRAC_PI_6)
            .multiply(&Mat3::scale(2.0, 0.5, 3.0));
        let r = m.polar_rotation().expect("scaled rotation is invertible");
        let expected = Mat3::rotation_axis_angle(Vec3::new(1.0, 1.0, 0.0), FRAC_PI_6);
        for (a, b) in r.to_array().iter().zip(expected.to_array().iter()) {
            assert!((a - b).abs() < 1e-3, "{r:?} vs {expected:?}");
        }
    }
}
