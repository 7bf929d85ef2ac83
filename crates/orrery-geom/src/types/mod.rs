// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types: transforms, boxes, planes, rays and frusta.
//!
//! Conventions:
//! - Overlap and containment are inclusive on faces.
//! - Plane distances are signed; frustum planes face outward, so "inside"
//!   means a distance `≤ 0`.
//! - Empty boxes propagate through every operation instead of failing.

#[doc = "Axis-aligned bounding boxes."]
pub mod aabb;
#[doc = "View frusta and box classification."]
pub mod frustum;
#[doc = "Oriented planes."]
pub mod plane;
#[doc = "Half-lines."]
pub mod ray;
#[doc = "Variant-typed 3D transforms."]
pub mod transform;
