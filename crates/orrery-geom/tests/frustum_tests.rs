// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

use orrery_geom::{plane_index, Aabb, Frustum, IntersectionType, Transform};
use orrery_math::{Mat4, Persist, Quat, Vec3};

fn view() -> Frustum {
    Frustum::perspective(FRAC_PI_2, 1.0, 1.0, 100.0)
}

fn box_at(x: f32, y: f32, z: f32, half: f32) -> Aabb {
    Aabb::from_center_half_extents(Vec3::new(x, y, z), half, half, half)
}

#[test]
fn box_in_front_is_contained() {
    assert_eq!(view().intersection_type(&box_at(0.0, 0.0, -5.0, 0.5)), IntersectionType::Contains);
}

#[test]
fn box_behind_eye_is_rejected() {
    let f = view();
    assert_eq!(f.intersection_type(&box_at(0.0, 0.0, 5.0, 0.5)), IntersectionType::None);
    assert!(!f.intersects(&box_at(0.0, 0.0, 5.0, 0.5)));
}

#[test]
fn box_outside_one_side_plane_is_rejected() {
    // Inside the frustum's bounds but wholly left of the left plane.
    assert_eq!(view().intersection_type(&box_at(-50.0, 0.0, -10.0, 1.0)), IntersectionType::None);
}

#[test]
fn straddling_boxes_intersect() {
    let f = view();
    assert_eq!(f.intersection_type(&box_at(0.0, 0.0, -1.0, 0.5)), IntersectionType::Intersects);
    assert_eq!(f.intersection_type(&box_at(0.0, 0.0, -100.0, 2.0)), IntersectionType::Intersects);
    assert_eq!(f.intersection_type(&box_at(5.0, 0.0, -5.0, 0.5)), IntersectionType::Intersects);
}

#[test]
fn box_enclosing_frustum_intersects() {
    let huge = box_at(0.0, 0.0, 0.0, 1000.0);
    assert_eq!(view().intersection_type(&huge), IntersectionType::Intersects);
    assert!(huge.contains(&view().bounds()));
}

#[test]
fn point_queries() {
    let f = view();
    assert!(f.is_point_inside(&Vec3::new(0.0, 0.0, -5.0)));
    assert!(f.is_point_inside(&Vec3::new(0.0, 0.0, -1.0)));
    assert!(!f.is_point_inside(&Vec3::new(0.0, 0.0, 5.0)));
    assert!(!f.is_point_inside(&Vec3::new(0.0, 0.0, -101.0)));
    // Nearest boundary from the axis at depth 5 is a side plane.
    let d = f.distance(&Vec3::new(0.0, 0.0, -5.0));
    assert!((d + 5.0 * FRAC_1_SQRT_2).abs() < 1e-4, "{d}");
}

#[test]
fn corners_sit_on_near_and_far_rectangles() {
    let f = Frustum::frustum(-1.0, 2.0, -0.5, 0.5, 1.0, 10.0);
    let v = f.vertices();
    assert_eq!(v[0], Vec3::new(-1.0, -0.5, -1.0));
    assert_eq!(v[2], Vec3::new(2.0, 0.5, -1.0));
    assert_eq!(v[4], Vec3::new(-10.0, -5.0, -10.0));
    assert_eq!(v[6], Vec3::new(20.0, 5.0, -10.0));
    let near = f.planes()[plane_index::NEAR];
    assert!((near.distance(&Vec3::ZERO) - 1.0).abs() < 1e-6);
}

#[test]
fn oblique_near_plane_tilts_through_its_anchor() {
    let tilt = Vec3::new(0.0, 0.5, 1.0).normalize();
    let f = Frustum::general(-1.0, 1.0, -1.0, 1.0, 2.0, 20.0, tilt, false, false);
    let near = f.planes()[plane_index::NEAR];
    assert!(near.distance(&Vec3::new(0.0, 0.0, -2.0)).abs() < 1e-5);
    let n = near.normal();
    assert!((n.dot(&tilt).abs() - 1.0).abs() < 1e-5, "{n:?}");
    for c in &f.vertices()[..4] {
        assert!(near.distance(c).abs() < 1e-4);
    }
}

#[test]
fn ortho_volume_classification() {
    let f = Frustum::ortho(-2.0, 2.0, -1.0, 1.0, 1.0, 9.0);
    assert_eq!(f.intersection_type(&box_at(0.0, 0.0, -5.0, 0.5)), IntersectionType::Contains);
    assert_eq!(f.intersection_type(&box_at(0.0, 3.0, -5.0, 0.5)), IntersectionType::None);
    assert_eq!(f.intersection_type(&box_at(2.0, 0.0, -5.0, 0.5)), IntersectionType::Intersects);
}

#[test]
fn rigid_transform_moves_the_volume() {
    let moved = view().transform(&Transform::rigid(Vec3::new(0.0, 0.0, -10.0), Quat::IDENTITY));
    assert_eq!(moved.intersection_type(&box_at(0.0, 0.0, -15.0, 0.5)), IntersectionType::Contains);
    assert_eq!(moved.intersection_type(&box_at(0.0, 0.0, -5.0, 0.5)), IntersectionType::None);

    let turned = view().transform(&Transform::rigid(Vec3::ZERO, Quat::from_angle_y(FRAC_PI_2)));
    // Looking down -Z turned a quarter about +Y looks down -X.
    assert!(turned.is_point_inside(&Vec3::new(-5.0, 0.0, 0.0)));
    assert!(!turned.is_point_inside(&Vec3::new(0.0, 0.0, -5.0)));
}

#[test]
fn mirrored_transform_keeps_planes_outward() {
    let f = Frustum::frustum(-1.0, 2.0, -1.0, 1.0, 1.0, 50.0);
    let mirror = Transform::from_matrix(Mat4::scale(-1.0, 1.0, 1.0));
    assert!(mirror.is_mirrored());
    let m = f.transform(&mirror);
    let inside = Vec3::new(-1.0, 0.1, -5.0);
    for plane in m.planes() {
        assert!(plane.distance(&inside) < 0.0, "{plane:?}");
    }
    assert!(!m.is_point_inside(&Vec3::new(1.8, 0.1, -1.5)));
    assert_eq!(m.intersection_type(&box_at(-1.0, 0.0, -10.0, 0.5)), IntersectionType::Contains);
}

#[test]
fn frustum_persists_its_corners() {
    let f = Frustum::perspective(1.0, 1.5, 0.5, 30.0);
    let mut buf = Vec::new();
    f.encode_binary(&mut buf);
    assert_eq!(buf.len(), 24 * 4);
    assert_eq!(Frustum::decode_binary(&mut buf.as_slice()), Ok(f));
    assert_eq!(Frustum::decode_text(&f.encode_text()), Ok(f));
}
