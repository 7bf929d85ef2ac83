// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use bytes::{Buf, BufMut};
use orrery_math::codec::{expect_fields, join_fields, parse_fields, read_fields};
use orrery_math::{CodecError, FloatCodec, Mat4, MathError, Persist, Quat, Vec3};

use crate::types::aabb::Aabb;

/// Representation tier of a [`Transform`], ordered from cheapest to most
/// general.
///
/// Binary operations run in the larger of their operands' kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformKind {
    /// No-op.
    Identity,
    /// Rotation then translation.
    Rigid,
    /// Uniform scale, rotation, translation.
    Uniform,
    /// Any matrix with bottom row `[0, 0, 0, 1]`.
    Affine,
    /// Any 4×4 matrix, projective ones included.
    General,
}

impl TransformKind {
    const fn tag(self) -> u8 {
        match self {
            Self::Identity => 0,
            Self::Rigid => 1,
            Self::Uniform => 2,
            Self::Affine => 3,
            Self::General => 4,
        }
    }

    fn from_tag(tag: u32) -> Result<Self, CodecError> {
        Ok(match tag {
            0 => Self::Identity,
            1 => Self::Rigid,
            2 => Self::Uniform,
            3 => Self::Affine,
            4 => Self::General,
            _ => {
                tracing::debug!(tag, "unknown transform tag");
                return Err(CodecError::UnknownVariant { tag });
            }
        })
    }

    const fn payload_fields(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Rigid => 7,
            Self::Uniform => 8,
            Self::Affine | Self::General => 16,
        }
    }
}

/// 3D transform stored in the cheapest representation that captures it.
///
/// Points map as `p' = T · R · (s · p)` for the decomposed variants, and
/// through the matrix for the others (`General` divides by `w`).
///
/// Composition, inversion and interpolation stay in the larger operand's
/// kind: two rigid transforms compose to a rigid transform without ever
/// building a matrix, and only mixing in an `Affine` or `General` operand
/// forces matrix arithmetic.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// No-op.
    #[default]
    Identity,
    /// Rotation followed by translation.
    Rigid {
        /// Translation applied last.
        translation: Vec3,
        /// Unit rotation.
        rotation: Quat,
    },
    /// Uniform scale, rotation, then translation.
    Uniform {
        /// Translation applied last.
        translation: Vec3,
        /// Unit rotation.
        rotation: Quat,
        /// Scale factor; negative values mirror.
        scale: f32,
    },
    /// Affine matrix (bottom row `[0, 0, 0, 1]`).
    Affine(Mat4),
    /// Arbitrary 4×4 matrix.
    General(Mat4),
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self::Identity;

    /// Rigid transform: rotate, then translate.
    #[must_use]
    pub const fn rigid(translation: Vec3, rotation: Quat) -> Self {
        Self::Rigid {
            translation,
            rotation,
        }
    }

    /// Uniformly scaled transform: scale, rotate, then translate.
    #[must_use]
    pub const fn uniform(translation: Vec3, rotation: Quat, scale: f32) -> Self {
        Self::Uniform {
            translation,
            rotation,
            scale,
        }
    }

    /// Wraps a matrix, classifying it as `Affine` when its bottom row is
    /// exactly `[0, 0, 0, 1]` and `General` otherwise.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        if matrix.is_affine() {
            Self::Affine(matrix)
        } else {
            Self::General(matrix)
        }
    }

    /// Representation tier.
    #[must_use]
    pub const fn kind(&self) -> TransformKind {
        match self {
            Self::Identity => TransformKind::Identity,
            Self::Rigid { .. } => TransformKind::Rigid,
            Self::Uniform { .. } => TransformKind::Uniform,
            Self::Affine(_) => TransformKind::Affine,
            Self::General(_) => TransformKind::General,
        }
    }

    /// Returns `true` for the `Identity` variant.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Column-major matrix equivalent (`M = T · R · S`).
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        match self {
            Self::Identity => Mat4::IDENTITY,
            Self::Rigid {
                translation,
                rotation,
            } => Mat4::compose_uniform(*translation, rotation, 1.0),
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => Mat4::compose_uniform(*translation, rotation, *scale),
            Self::Affine(m) | Self::General(m) => *m,
        }
    }

    /// The same transform re-expressed in `kind` (or left alone if it is
    /// already at least that general).
    #[must_use]
    pub fn promote(&self, kind: TransformKind) -> Self {
        if kind <= self.kind() {
            return *self;
        }
        let (translation, rotation, scale) = match *self {
            Self::Identity => (Vec3::ZERO, Quat::IDENTITY, 1.0),
            Self::Rigid {
                translation,
                rotation,
            } => (translation, rotation, 1.0),
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => (translation, rotation, scale),
            Self::Affine(m) => return Self::General(m),
            Self::General(_) => return *self,
        };
        match kind {
            TransformKind::Identity => *self,
            TransformKind::Rigid => Self::rigid(translation, rotation),
            TransformKind::Uniform => Self::uniform(translation, rotation, scale),
            TransformKind::Affine => Self::Affine(self.to_matrix()),
            TransformKind::General => Self::General(self.to_matrix()),
        }
    }

    /// `self ∘ other`: the result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let kind = self.kind().max(other.kind());
        match (self.promote(kind), other.promote(kind)) {
            (
                Self::Rigid {
                    translation: t1,
                    rotation: r1,
                },
                Self::Rigid {
                    translation: t2,
                    rotation: r2,
                },
            ) => Self::rigid(
                Vec3::add(&t1, &r1.rotate(&t2)),
                r1.multiply(&r2).normalize(),
            ),
            (
                Self::Uniform {
                    translation: t1,
                    rotation: r1,
                    scale: s1,
                },
                Self::Uniform {
                    translation: t2,
                    rotation: r2,
                    scale: s2,
                },
            ) => Self::uniform(
                Vec3::add(&t1, &r1.rotate(&t2.scale(s1))),
                r1.multiply(&r2).normalize(),
                s1 * s2,
            ),
            (Self::Affine(a), Self::Affine(b)) => Self::Affine(a.multiply_affine(&b)),
            (Self::General(a), Self::General(b)) => Self::General(a.multiply(&b)),
            (Self::Identity, Self::Identity) => Self::Identity,
            (a, b) => {
                tracing::debug!(?kind, "compose operands disagree after promotion");
                Self::General(a.to_matrix().multiply(&b.to_matrix()))
            }
        }
    }

    /// Inverse transform, in the same kind.
    ///
    /// Fails with [`MathError::SingularMatrix`] for a zero uniform scale or
    /// a singular matrix.
    pub fn invert(&self) -> Result<Self, MathError> {
        Ok(match self {
            Self::Identity => Self::Identity,
            Self::Rigid {
                translation,
                rotation,
            } => {
                let inv = rotation.invert();
                Self::rigid(inv.rotate(translation).negate(), inv)
            }
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => {
                if scale.is_nan() || scale.abs() < f32::MIN_POSITIVE {
                    let determinant = scale * scale * scale;
                    tracing::debug!(scale, "refusing to invert zero-scale transform");
                    return Err(MathError::SingularMatrix { determinant });
                }
                let inv = rotation.invert();
                let inv_scale = 1.0 / scale;
                Self::uniform(
                    inv.rotate(translation).scale(-inv_scale),
                    inv,
                    inv_scale,
                )
            }
            Self::Affine(m) => Self::Affine(m.invert_affine()?),
            Self::General(m) => Self::General(m.invert()?),
        })
    }

    /// Interpolates between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Decomposed kinds lerp translation and scale and slerp rotation;
    /// matrix kinds lerp elementwise.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let kind = self.kind().max(other.kind());
        match (self.promote(kind), other.promote(kind)) {
            (
                Self::Rigid {
                    translation: t1,
                    rotation: r1,
                },
                Self::Rigid {
                    translation: t2,
                    rotation: r2,
                },
            ) => Self::rigid(t1.lerp(&t2, t), r1.slerp(&r2, t)),
            (
                Self::Uniform {
                    translation: t1,
                    rotation: r1,
                    scale: s1,
                },
                Self::Uniform {
                    translation: t2,
                    rotation: r2,
                    scale: s2,
                },
            ) => Self::uniform(
                t1.lerp(&t2, t),
                r1.slerp(&r2, t),
                orrery_math::lerp(s1, s2, t),
            ),
            (Self::Affine(a), Self::Affine(b)) => Self::Affine(a.lerp_affine(&b, t)),
            (Self::General(a), Self::General(b)) => Self::General(a.lerp(&b, t)),
            (Self::Identity, Self::Identity) => Self::Identity,
            (a, b) => {
                tracing::debug!(?kind, "lerp operands disagree after promotion");
                Self::General(a.to_matrix().lerp(&b.to_matrix(), t))
            }
        }
    }

    /// Applies a world-space translation after this transform.
    #[must_use]
    pub fn translate(&self, delta: &Vec3) -> Self {
        match *self {
            Self::Identity => Self::rigid(*delta, Quat::IDENTITY),
            Self::Rigid {
                translation,
                rotation,
            } => Self::rigid(Vec3::add(&translation, delta), rotation),
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => Self::uniform(Vec3::add(&translation, delta), rotation, scale),
            Self::Affine(m) => Self::Affine(
                Mat4::translation(delta.x(), delta.y(), delta.z()).multiply_affine(&m),
            ),
            Self::General(m) => {
                Self::General(Mat4::translation(delta.x(), delta.y(), delta.z()).multiply(&m))
            }
        }
    }

    /// Transforms a point. `General` transforms divide by the resulting `w`.
    #[must_use]
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        match self {
            Self::Identity => *point,
            Self::Rigid {
                translation,
                rotation,
            } => Vec3::add(&rotation.rotate(point), translation),
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => Vec3::add(&rotation.rotate(&point.scale(*scale)), translation),
            Self::Affine(m) => m.transform_point(point),
            Self::General(m) => m.project_point(point),
        }
    }

    /// Transforms a direction; translation does not apply.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vec3) -> Vec3 {
        match self {
            Self::Identity => *vector,
            Self::Rigid { rotation, .. } => rotation.rotate(vector),
            Self::Uniform {
                rotation, scale, ..
            } => rotation.rotate(vector).scale(*scale),
            Self::Affine(m) | Self::General(m) => m.transform_direction(vector),
        }
    }

    /// Bounds of `aabb` under this transform (see [`Aabb::transform`]).
    #[must_use]
    pub fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        aabb.transform(self)
    }

    /// Translation component.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        match self {
            Self::Identity => Vec3::ZERO,
            Self::Rigid { translation, .. } | Self::Uniform { translation, .. } => *translation,
            Self::Affine(m) | Self::General(m) => m.extract_translation(),
        }
    }

    /// Rotation component; matrix kinds recover it by polar decomposition,
    /// which fails on singular matrices.
    pub fn extract_rotation(&self) -> Result<Quat, MathError> {
        match self {
            Self::Identity => Ok(Quat::IDENTITY),
            Self::Rigid { rotation, .. } | Self::Uniform { rotation, .. } => Ok(*rotation),
            Self::Affine(m) | Self::General(m) => m.extract_rotation(),
        }
    }

    /// Per-axis scale. The uniform kind reports its signed factor on every
    /// axis; matrix kinds report column lengths.
    #[must_use]
    pub fn extract_scale(&self) -> Vec3 {
        match self {
            Self::Identity | Self::Rigid { .. } => Vec3::ONE,
            Self::Uniform { scale, .. } => Vec3::new(*scale, *scale, *scale),
            Self::Affine(m) | Self::General(m) => m.extract_scale(),
        }
    }

    /// Single scale factor best describing the transform; negative when
    /// mirrored.
    #[must_use]
    pub fn approximate_uniform_scale(&self) -> f32 {
        match self {
            Self::Identity | Self::Rigid { .. } => 1.0,
            Self::Uniform { scale, .. } => *scale,
            Self::Affine(m) | Self::General(m) => m.approximate_uniform_scale(),
        }
    }

    /// Returns `true` if the transform flips handedness.
    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        match self {
            Self::Identity | Self::Rigid { .. } => false,
            Self::Uniform { scale, .. } => *scale < 0.0,
            Self::Affine(m) | Self::General(m) => m.is_mirrored(),
        }
    }

    fn write_payload(&self, out: &mut Vec<f32>) {
        match self {
            Self::Identity => {}
            Self::Rigid {
                translation,
                rotation,
            } => {
                translation.write_fields(out);
                rotation.write_fields(out);
            }
            Self::Uniform {
                translation,
                rotation,
                scale,
            } => {
                translation.write_fields(out);
                rotation.write_fields(out);
                out.push(*scale);
            }
            Self::Affine(m) | Self::General(m) => m.write_fields(out),
        }
    }

    fn from_payload(kind: TransformKind, fields: &[f32]) -> Self {
        match kind {
            TransformKind::Identity => Self::Identity,
            TransformKind::Rigid => {
                Self::rigid(Vec3::from_fields(&fields[..3]), Quat::from_fields(&fields[3..7]))
            }
            TransformKind::Uniform => Self::uniform(
                Vec3::from_fields(&fields[..3]),
                Quat::from_fields(&fields[3..7]),
                fields[7],
            ),
            TransformKind::Affine => Self::Affine(Mat4::from_fields(fields)),
            TransformKind::General => Self::General(Mat4::from_fields(fields)),
        }
    }
}

/// Tagged encoding: the variant tag (`Identity` 0 through `General` 4)
/// followed by the variant's fields. Text writes the tag as an integer
/// field; binary writes it as a single byte.
impl Persist for Transform {
    fn encode_text(&self) -> String {
        let mut fields = Vec::new();
        self.write_payload(&mut fields);
        let tag = self.kind().tag();
        if fields.is_empty() {
            tag.to_string()
        } else {
            format!("{tag}, {}", join_fields(&fields))
        }
    }

    fn decode_text(text: &str) -> Result<Self, CodecError> {
        let (head, rest) = match text.split_once(',') {
            Some((_, rest)) if rest.trim().is_empty() => {
                tracing::debug!("transform tag is followed by an empty field");
                return Err(CodecError::InvalidNumber {
                    index: 1,
                    text: String::new(),
                });
            }
            Some(parts) => parts,
            None => (text, ""),
        };
        let head = head.trim();
        let tag = head.parse::<u32>().map_err(|_| {
            tracing::debug!(text = head, "transform tag is not an integer");
            CodecError::InvalidNumber {
                index: 0,
                text: head.to_owned(),
            }
        })?;
        let kind = TransformKind::from_tag(tag)?;
        let fields = parse_fields(rest).map_err(|err| match err {
            CodecError::InvalidNumber { index, text } => CodecError::InvalidNumber {
                index: index + 1,
                text,
            },
            other => other,
        })?;
        expect_fields(kind.payload_fields() + 1, fields.len() + 1)?;
        Ok(Self::from_payload(kind, &fields))
    }

    fn encode_binary<B: BufMut>(&self, out: &mut B) {
        out.put_u8(self.kind().tag());
        let mut fields = Vec::new();
        self.write_payload(&mut fields);
        for f in fields {
            out.put_f32(f);
        }
    }

    fn decode_binary<B: Buf>(input: &mut B) -> Result<Self, CodecError> {
        if !input.has_remaining() {
            tracing::debug!("transform stream is empty");
            return Err(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        let kind = TransformKind::from_tag(u32::from(input.get_u8()))?;
        let fields = read_fields(input, kind.payload_fields())?;
        Ok(Self::from_payload(kind, &fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_ordered_by_generality() {
        assert!(TransformKind::Identity < TransformKind::Rigid);
        assert!(TransformKind::Rigid < TransformKind::Uniform);
        assert!(TransformKind::Uniform < TransformKind::Affine);
        assert!(TransformKind::Affine < TransformKind::General);
    }

    #[test]
    fn rigid_compose_stays_rigid() {
        let a = Transform::rigid(Vec3::UNIT_X, Quat::from_angle_z(0.3));
        let b = Transform::rigid(Vec3::UNIT_Y, Quat::from_angle_x(1.2));
        assert_eq!(a.compose(&b).kind(), TransformKind::Rigid);
        assert_eq!(a.compose(&Transform::IDENTITY).kind(), TransformKind::Rigid);
    }

    #[test]
    fn promote_never_demotes() {
        let m = Transform::Affine(Mat4::scale(1.0, 2.0, 3.0));
        assert_eq!(m.promote(TransformKind::Rigid), m);
        assert_eq!(m.promote(TransformKind::General).kind(), TransformKind::General);
    }

    #[test]
    fn zero_scale_inversion_fails() {
        let t = Transform::uniform(Vec3::ZERO, Quat::IDENTITY, 0.0);
        assert!(matches!(t.invert(), Err(MathError::SingularMatrix { .. })));
    }

    #[test]
    fn from_matrix_classifies_projective_as_general() {
        let p = Mat4::perspective(1.0, 1.0, 0.1, 10.0);
        assert_eq!(Transform::from_matrix(p).kind(), TransformKind::General);
        assert_eq!(
            Transform::from_matrix(Mat4::translation(1.0, 0.0, 0.0)).kind(),
            TransformKind::Affine
        );
    }
}
