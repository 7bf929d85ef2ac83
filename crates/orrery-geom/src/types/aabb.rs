// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use orrery_math::{FloatCodec, Mat4, Vec3, EPSILON};

use crate::types::plane::Plane;
use crate::types::ray::Ray;
use crate::types::transform::Transform;

/// Axis-aligned bounding box.
///
/// Invariants:
/// - A box is empty when any `min` component exceeds its `max` counterpart.
///   [`Aabb::EMPTY`] is the canonical empty box: it is the identity of
///   [`Aabb::union`] and absorbs [`Aabb::intersection`].
/// - Queries on empty boxes never fail; containment and overlap simply
///   come out `false`.
/// - Overlap and containment are inclusive on faces.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// The empty box (`min = +MAX`, `max = -MAX`).
    pub const EMPTY: Self = Self::new(Vec3::MAX_VALUE, Vec3::MIN_VALUE);

    /// The largest representable box.
    pub const MAX_VALUE: Self = Self::new(Vec3::MIN_VALUE, Vec3::MAX_VALUE);

    /// Unit cube centered at the origin.
    pub const UNIT: Self = Self::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));

    /// Constructs a box from its minimum and maximum corners. Inverted
    /// extents are accepted and make the box empty.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds a box centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Smallest box containing all `points`; [`Aabb::EMPTY`] for none.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |acc, p| acc.add_point(p))
    }

    /// Returns `true` if the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    /// Midpoint.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.lerp(&self.max, 0.5)
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Length of the longest edge.
    #[must_use]
    pub fn longest_edge(&self) -> f32 {
        let s = self.size();
        s.x().max(s.y()).max(s.z())
    }

    /// Distance between the minimum and maximum corners.
    #[must_use]
    pub fn diagonal_length(&self) -> f32 {
        self.min.distance(&self.max)
    }

    /// Corner selected by the low three bits of `code`: bit `i` set picks
    /// the maximum on axis `i` (x = bit 0, y = bit 1, z = bit 2).
    #[must_use]
    pub fn vertex(&self, code: u8) -> Vec3 {
        let pick = |axis: usize| {
            if code & (1 << axis) == 0 {
                self.min.get(axis)
            } else {
                self.max.get(axis)
            }
        };
        Vec3::new(pick(0), pick(1), pick(2))
    }

    /// All eight corners, indexed as in [`Aabb::vertex`].
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        core::array::from_fn(|i| self.vertex(i as u8))
    }

    /// The box grown to include `point`.
    #[must_use]
    pub fn add_point(&self, point: &Vec3) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Overlap of both boxes; [`Aabb::EMPTY`] when they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let result = Self::new(self.min.max(&other.min), self.max.min(&other.max));
        if result.is_empty() {
            Self::EMPTY
        } else {
            result
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        self.expand(&Vec3::new(m, m, m))
    }

    /// Grows the box by a per-axis `margin` on both sides.
    #[must_use]
    pub fn expand(&self, margin: &Vec3) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(self.min.sub(margin), self.max.add(margin))
    }

    /// Returns `true` if this box overlaps another (inclusive on faces).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
            && !self.is_empty()
            && !other.is_empty()
    }

    /// Returns `true` if `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        let inner = other.min.max(&self.min) == other.min && other.max.min(&self.max) == other.max;
        inner && !self.is_empty()
    }

    /// Returns `true` if `point` lies inside or on the box.
    #[must_use]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (0..3).all(|i| point.get(i) >= self.min.get(i) && point.get(i) <= self.max.get(i))
    }

    /// Bounds of the box under `transform`.
    ///
    /// Empty boxes stay empty. Decomposed and affine transforms use the
    /// exact per-element extremum rule; `General` transforms project the
    /// eight corners.
    #[must_use]
    pub fn transform(&self, transform: &Transform) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        match transform {
            Transform::Identity => *self,
            Transform::General(m) => self.project(m),
            other => self.transform_affine(&other.to_matrix()),
        }
    }

    /// Bounds of the box under an affine matrix.
    ///
    /// Each output extent starts at the translation and accumulates, per
    /// matrix element, whichever of `m · min` or `m · max` is smaller (for
    /// the minimum) or larger (for the maximum). Tight without visiting the
    /// corners.
    #[must_use]
    pub fn transform_affine(&self, m: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let extent = |row: usize| {
            (0..3).fold((m.at(row, 3), m.at(row, 3)), |(lo, hi), col| {
                let a = m.at(row, col) * self.min.get(col);
                let b = m.at(row, col) * self.max.get(col);
                (lo + a.min(b), hi + a.max(b))
            })
        };
        let (x, y, z) = (extent(0), extent(1), extent(2));
        Self::new(Vec3::new(x.0, y.0, z.0), Vec3::new(x.1, y.1, z.1))
    }

    /// Bounds of the eight corners after a homogeneous divide by `m`.
    ///
    /// Corners that land on `w = 0` produce non-finite bounds; callers
    /// projecting boxes that may straddle the eye plane should clip first.
    #[must_use]
    pub fn project(&self, m: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        self.corners()
            .iter()
            .fold(Self::EMPTY, |acc, c| acc.add_point(&m.project_point(c)))
    }

    /// First point where `ray` meets the box (slab test).
    ///
    /// A ray starting inside the box hits at its origin. Hits behind the
    /// origin do not count. Axes whose direction component is within
    /// `EPSILON` of zero are treated as parallel to their slab.
    #[must_use]
    pub fn ray_intersection(&self, ray: &Ray) -> Option<Vec3> {
        if self.is_empty() {
            return None;
        }
        let origin = ray.origin();
        if self.contains_point(&origin) {
            return Some(origin);
        }
        let dir = ray.direction();
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            let (o, d) = (origin.get(axis), dir.get(axis));
            let (lo, hi) = (self.min.get(axis), self.max.get(axis));
            if d.abs() <= EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }
        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(ray.point_at(t_near))
    }

    /// Returns `true` if `ray` meets the box.
    #[must_use]
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.ray_intersection(ray).is_some()
    }

    /// Returns `true` if the plane passes through the box: the corners
    /// nearest to and farthest along the plane normal lie on opposite sides
    /// (or on the plane).
    #[must_use]
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        if self.is_empty() {
            return false;
        }
        let n = plane.normal();
        let code_toward = |positive: bool| {
            (0..3).fold(0u8, |code, axis| {
                if (n.get(axis) >= 0.0) == positive {
                    code | (1 << axis)
                } else {
                    code
                }
            })
        };
        let far = plane.distance(&self.vertex(code_toward(true)));
        let near = plane.distance(&self.vertex(code_toward(false)));
        near <= 0.0 && far >= 0.0
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Minimum corner then maximum corner.
impl FloatCodec for Aabb {
    const FIELDS: usize = 6;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.min.to_array());
        out.extend_from_slice(&self.max.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(
            Vec3::new(fields[0], fields[1], fields[2]),
            Vec3::new(fields[3], fields[4], fields[5]),
        )
    }
}
