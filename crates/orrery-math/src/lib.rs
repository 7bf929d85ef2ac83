// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! orrery-math: float32 linear algebra for the Orrery geometry kernel.
//!
//! Scalar helpers, 2D/3D vectors, 3x3/4x4 column-major matrices, unit
//! quaternions and a seeded PRNG. Every type is a plain `Copy` value; all
//! operations return new values and the operator traits (`+`, `*`, `+=`,
//! `*=`, …) cover in-place editing without a second code path.
//!
//! Failures are explicit: matrix inversion and rotation extraction return
//! [`MathError::SingularMatrix`] instead of producing NaNs, and the
//! persistence codec reports malformed input through [`CodecError`].
#![forbid(unsafe_code)]

pub mod codec;
mod error;
mod mat3;
mod mat4;
mod prng;
mod quat;
pub mod scalar;
mod vec2;
mod vec3;

pub use codec::{FloatCodec, Persist};
pub use error::{CodecError, MathError};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use prng::Prng;
pub use quat::Quat;
pub use scalar::{clamp, deg_to_rad, lerp, rad_to_deg, EPSILON, POLAR_MAX_ITERATIONS};
pub use vec2::Vec2;
pub use vec3::Vec3;
