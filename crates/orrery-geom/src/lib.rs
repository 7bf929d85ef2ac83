// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for Orrery.

This crate provides:
- Variant transforms (`Transform`) that compose, invert and interpolate in
  the cheapest representation able to hold the result.
- Axis-aligned bounding boxes (`Aabb`) with ray, plane and transform
  queries.
- Planes (`Plane`), rays (`Ray`) and view frusta (`Frustum`) with
  conservative box classification (`IntersectionType`).

Design notes:
- Float32 throughout, built on `orrery-math`.
- Degenerate geometry (empty boxes, collinear plane points) is handled with
  documented fallbacks; only singular inversions return errors.
- Every type persists through `orrery_math::Persist`.
"]

/// Foundational geometric types.
pub mod types;

pub use types::aabb::Aabb;
pub use types::frustum::{plane_index, Frustum, IntersectionType};
pub use types::plane::Plane;
pub use types::ray::Ray;
pub use types::transform::{Transform, TransformKind};
