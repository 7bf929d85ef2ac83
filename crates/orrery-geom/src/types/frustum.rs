// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use orrery_math::{FloatCodec, Vec3};

use crate::types::aabb::Aabb;
use crate::types::plane::Plane;
use crate::types::transform::Transform;

/// Result of classifying a box against a [`Frustum`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionType {
    /// The box is entirely outside at least one plane.
    None,
    /// The box may straddle the frustum boundary.
    Intersects,
    /// Every corner of the box is inside every plane.
    Contains,
}

/// Index of each plane in [`Frustum::planes`].
pub mod plane_index {
    /// Near plane.
    pub const NEAR: usize = 0;
    /// Far plane.
    pub const FAR: usize = 1;
    /// Left plane.
    pub const LEFT: usize = 2;
    /// Right plane.
    pub const RIGHT: usize = 3;
    /// Top plane.
    pub const TOP: usize = 4;
    /// Bottom plane.
    pub const BOTTOM: usize = 5;
}

/// Corner triples fitted per plane, in [`plane_index`] order. Windings are
/// chosen so `(b - a) × (c - a)` points out of the volume.
const PLANE_CORNERS: [[usize; 3]; 6] = [
    [0, 1, 2], // near
    [4, 7, 6], // far
    [0, 3, 7], // left
    [1, 6, 2], // right
    [3, 2, 6], // top
    [0, 5, 1], // bottom
];

/// View volume bounded by six planes.
///
/// Corners are stored as two quads, near (`0..4`) then far (`4..8`), each in
/// the order left-bottom, right-bottom, right-top, left-top as seen from the
/// eye. Planes face outward, so a point is inside when every signed
/// distance is `≤ 0`. Planes and bounds are derived from the corners and
/// rebuilt whenever the corners change.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frustum {
    vertices: [Vec3; 8],
    planes: [Plane; 6],
    bounds: Aabb,
}

impl Frustum {
    /// Symmetric perspective frustum looking down -Z.
    ///
    /// `fovy` is the full vertical field of view in radians; `aspect` is
    /// width over height.
    #[must_use]
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let top = near * (fovy * 0.5).tan();
        let right = top * aspect;
        Self::frustum(-right, right, -top, top, near, far)
    }

    /// Off-axis perspective frustum whose near rectangle is
    /// `[left, right] × [bottom, top]` at `z = -near`.
    #[must_use]
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::general(left, right, bottom, top, near, far, Vec3::UNIT_Z, false, false)
    }

    /// Box-shaped orthographic volume `[left, right] × [bottom, top]`
    /// between `z = -near` and `z = -far`.
    #[must_use]
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::general(left, right, bottom, top, near, far, Vec3::UNIT_Z, true, false)
    }

    /// Fully general construction.
    ///
    /// The near and far planes pass through `(0, 0, -near)` and
    /// `(0, 0, -far)` and share `near_far_normal`, which tilts them for
    /// oblique clipping; its `z` must be nonzero. For perspective volumes the
    /// side edges run from the eye through the near rectangle; for
    /// orthographic ones they run parallel to -Z. `mirrored` swaps the left
    /// and right corner slots so the planes still face outward when the
    /// rectangle itself is reflected (mirror and portal views).
    #[must_use]
    pub fn general(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
        near_far_normal: Vec3,
        ortho: bool,
        mirrored: bool,
    ) -> Self {
        let (nx, ny, nz) = (near_far_normal.x(), near_far_normal.y(), near_far_normal.z());
        let nrz = -1.0 / nz;
        let quad = [(left, bottom), (right, bottom), (right, top), (left, top)];
        let mut vertices = [Vec3::ZERO; 8];
        for (i, &(x, y)) in quad.iter().enumerate() {
            let tilt = (nx * x + ny * y) * nrz;
            if ortho {
                vertices[i] = Vec3::new(x, y, -near + tilt);
                vertices[i + 4] = Vec3::new(x, y, -far + tilt);
            } else {
                let on_near = Vec3::new(x, y, -near);
                let denom = near + tilt;
                vertices[i] = on_near.scale(near / denom);
                vertices[i + 4] = on_near.scale(far / denom);
            }
        }
        if mirrored {
            swap_sides(&mut vertices);
        }
        Self::from_vertices(vertices)
    }

    /// Builds a frustum from eight corners laid out as described on
    /// [`Frustum`], deriving planes and bounds.
    #[must_use]
    pub fn from_vertices(vertices: [Vec3; 8]) -> Self {
        let planes = PLANE_CORNERS
            .map(|[a, b, c]| Plane::from_points(&vertices[a], &vertices[b], &vertices[c]));
        let bounds = Aabb::from_points(&vertices);
        Self {
            vertices,
            planes,
            bounds,
        }
    }

    /// The eight corners.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// The six outward-facing planes, indexed by [`plane_index`].
    #[must_use]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Tight axis-aligned bounds of the corners.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// The frustum carried through `transform`.
    ///
    /// Mirroring transforms reverse the corner winding, so the side slots are
    /// swapped back to keep the planes facing outward.
    #[must_use]
    pub fn transform(&self, transform: &Transform) -> Self {
        let mut vertices = self.vertices.map(|v| transform.transform_point(&v));
        if transform.is_mirrored() {
            swap_sides(&mut vertices);
        }
        Self::from_vertices(vertices)
    }

    /// Largest signed plane distance: `≤ 0` inside, and an upper bound on
    /// the true distance outside.
    #[must_use]
    pub fn distance(&self, point: &Vec3) -> f32 {
        self.planes
            .iter()
            .map(|p| p.distance(point))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns `true` if `point` is inside or on the boundary.
    #[must_use]
    pub fn is_point_inside(&self, point: &Vec3) -> bool {
        self.distance(point) <= 0.0
    }

    /// Classifies `aabb` against the frustum.
    ///
    /// Boxes whose bounds miss the frustum's bounds are rejected outright.
    /// Otherwise each plane counts the box corners on its inner side: a
    /// plane with none inside means `None`; all corners inside all planes
    /// means `Contains`; anything else is `Intersects`. The test only
    /// separates along the frustum planes, so some boxes near the frustum's
    /// edges are reported as `Intersects` even though they lie outside.
    #[must_use]
    pub fn intersection_type(&self, aabb: &Aabb) -> IntersectionType {
        if !self.bounds.intersects(aabb) {
            return IntersectionType::None;
        }
        let corners = aabb.corners();
        let mut planes_fully_inside = 0;
        for plane in &self.planes {
            let inside = corners.iter().filter(|c| plane.distance(c) <= 0.0).count();
            if inside == 0 {
                return IntersectionType::None;
            }
            if inside == corners.len() {
                planes_fully_inside += 1;
            }
        }
        if planes_fully_inside == self.planes.len() {
            IntersectionType::Contains
        } else {
            IntersectionType::Intersects
        }
    }

    /// Returns `true` unless the box is classified [`IntersectionType::None`].
    #[must_use]
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        self.intersection_type(aabb) != IntersectionType::None
    }
}

/// Swaps left and right slots within both quads.
fn swap_sides(vertices: &mut [Vec3; 8]) {
    for base in [0, 4] {
        vertices.swap(base, base + 1);
        vertices.swap(base + 2, base + 3);
    }
}

/// The eight corners in slot order; planes and bounds are re-derived on
/// decode.
impl FloatCodec for Frustum {
    const FIELDS: usize = 24;

    fn write_fields(&self, out: &mut Vec<f32>) {
        for v in &self.vertices {
            out.extend_from_slice(&v.to_array());
        }
    }

    fn from_fields(fields: &[f32]) -> Self {
        let vertices = core::array::from_fn(|i| Vec3::from_fields(&fields[i * 3..i * 3 + 3]));
        Self::from_vertices(vertices)
    }
}
