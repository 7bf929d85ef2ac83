// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::FRAC_PI_2;

use orrery_geom::{Aabb, Plane, Ray, Transform};
use orrery_math::{Mat4, Persist, Quat, Vec3};

fn approx_eq3(a: Vec3, b: Vec3, eps: f32) {
    assert!(a.distance(&b) <= eps, "expected {b:?}, got {a:?}");
}

fn cube(min: f32, max: f32) -> Aabb {
    Aabb::new(Vec3::new(min, min, min), Vec3::new(max, max, max))
}

#[test]
fn empty_box_is_union_identity() {
    let b = cube(-1.0, 2.0);
    assert!(Aabb::EMPTY.is_empty());
    assert!(Aabb::default().is_empty());
    assert_eq!(Aabb::EMPTY.union(&b), b);
    assert_eq!(b.union(&Aabb::EMPTY), b);
    assert_eq!(Aabb::from_points(&[]), Aabb::EMPTY);
    assert_eq!(Aabb::EMPTY.inflate(3.0), Aabb::EMPTY);
    assert_eq!(Aabb::EMPTY.intersection(&b), Aabb::EMPTY);
}

#[test]
fn disjoint_intersection_is_canonical_empty() {
    let a = cube(0.0, 1.0);
    let b = cube(2.0, 3.0);
    assert_eq!(a.intersection(&b), Aabb::EMPTY);
    assert_eq!(cube(0.0, 2.0).intersection(&cube(1.0, 3.0)), cube(1.0, 2.0));
}

#[test]
fn overlap_is_inclusive_on_faces() {
    assert!(cube(0.0, 1.0).intersects(&cube(1.0, 2.0)));
    assert!(!cube(0.0, 1.0).intersects(&cube(1.5, 2.0)));
    assert!(!Aabb::EMPTY.intersects(&Aabb::MAX_VALUE));
}

#[test]
fn containment_rules() {
    let outer = cube(-2.0, 2.0);
    assert!(outer.contains(&Aabb::UNIT));
    assert!(outer.contains(&outer));
    assert!(!Aabb::UNIT.contains(&outer));
    assert!(outer.contains(&Aabb::EMPTY));
    assert!(!Aabb::EMPTY.contains(&Aabb::UNIT));
    assert!(!Aabb::EMPTY.contains(&Aabb::EMPTY));
    assert!(Aabb::UNIT.contains_point(&Vec3::new(0.5, -0.5, 0.0)));
    assert!(!Aabb::UNIT.contains_point(&Vec3::new(0.6, 0.0, 0.0)));
}

#[test]
fn measurements() {
    let b = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 4.0));
    assert_eq!(b.center(), Vec3::new(2.0, 1.0, 2.0));
    assert_eq!(b.size(), Vec3::new(4.0, 2.0, 4.0));
    assert_eq!(b.longest_edge(), 4.0);
    assert_eq!(b.diagonal_length(), 6.0);
    assert_eq!(
        Aabb::from_center_half_extents(Vec3::new(1.0, 1.0, 1.0), 1.0, 0.5, 2.0),
        Aabb::new(Vec3::new(0.0, 0.5, -1.0), Vec3::new(2.0, 1.5, 3.0))
    );
    assert_eq!(Aabb::UNIT.inflate(0.5), cube(-1.0, 1.0));
}

#[test]
fn vertex_codes_select_per_axis_extremes() {
    let b = Aabb::new(Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0));
    assert_eq!(b.vertex(0), b.min());
    assert_eq!(b.vertex(7), b.max());
    assert_eq!(b.vertex(0b001), Vec3::new(3.0, 1.0, 2.0));
    assert_eq!(b.vertex(0b110), Vec3::new(0.0, 4.0, 5.0));
    assert_eq!(Aabb::from_points(&b.corners()), b);
}

#[test]
fn transform_rotates_extents() {
    let b = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
    let t = Transform::rigid(Vec3::ZERO, Quat::from_angle_z(FRAC_PI_2));
    let r = b.transform(&t);
    approx_eq3(r.min(), Vec3::new(-1.0, 0.0, 0.0), 1e-6);
    approx_eq3(r.max(), Vec3::new(0.0, 2.0, 1.0), 1e-6);
    assert_eq!(b.transform(&Transform::IDENTITY), b);
    assert_eq!(Aabb::EMPTY.transform(&t), Aabb::EMPTY);
}

#[test]
fn affine_bounds_enclose_every_corner() {
    let m = Mat4::compose(
        Vec3::new(1.0, -2.0, 0.5),
        &Quat::from_angles_xyz(0.4, 1.0, -0.3),
        Vec3::new(2.0, 0.5, -1.0),
    );
    let b = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(0.5, 3.0, 2.5));
    let bounds = b.transform_affine(&m);
    let exact = Aabb::from_points(&b.corners().map(|c| m.transform_point(&c)));
    approx_eq3(bounds.min(), exact.min(), 1e-5);
    approx_eq3(bounds.max(), exact.max(), 1e-5);
}

#[test]
fn general_transform_projects_corners() {
    let m = Mat4::translation(0.0, 0.0, -5.0);
    let via_general = Aabb::UNIT.transform(&Transform::General(m));
    assert_eq!(via_general, Aabb::UNIT.transform_affine(&m));
}

#[test]
fn ray_hits_nearest_face() {
    let b = cube(0.0, 1.0);
    let hit = b.ray_intersection(&Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::UNIT_X));
    assert_eq!(hit, Some(Vec3::new(0.0, 0.5, 0.5)));
    assert!(b.intersects_ray(&Ray::new(Vec3::new(-1.0, -1.0, 0.5), Vec3::new(1.0, 1.0, 0.0))));
}

#[test]
fn ray_misses() {
    let b = cube(0.0, 1.0);
    // Pointing away.
    assert_eq!(b.ray_intersection(&Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::UNIT_X.negate())), None);
    // Parallel to a slab and outside it.
    assert_eq!(b.ray_intersection(&Ray::new(Vec3::new(-5.0, 2.0, 0.5), Vec3::UNIT_X)), None);
    assert_eq!(Aabb::EMPTY.ray_intersection(&Ray::new(Vec3::ZERO, Vec3::UNIT_X)), None);
}

#[test]
fn ray_starting_inside_hits_at_origin() {
    let origin = Vec3::new(0.25, 0.5, 0.75);
    let ray = Ray::new(origin, Vec3::UNIT_Z);
    assert_eq!(cube(0.0, 1.0).ray_intersection(&ray), Some(origin));
}

#[test]
fn plane_crossing_box() {
    assert!(Aabb::UNIT.intersects_plane(&Plane::XY));
    assert!(!cube(1.0, 2.0).intersects_plane(&Plane::XY));
    let diagonal = Plane::from_point_normal(&Vec3::ZERO, &Vec3::new(1.0, 1.0, 1.0));
    assert!(Aabb::UNIT.intersects_plane(&diagonal));
    assert!(!cube(0.1, 1.0).intersects_plane(&diagonal));
    assert!(!Aabb::EMPTY.intersects_plane(&Plane::XY));
}

#[test]
fn plane_from_points_faces_by_winding() {
    let p = Plane::from_points(&Vec3::ZERO, &Vec3::UNIT_X, &Vec3::UNIT_Y);
    assert_eq!(p.normal(), Vec3::UNIT_Z);
    assert_eq!(p.distance(&Vec3::new(5.0, 5.0, 2.0)), 2.0);
    let flipped = Plane::from_points(&Vec3::ZERO, &Vec3::UNIT_Y, &Vec3::UNIT_X);
    assert_eq!(flipped.normal(), Vec3::UNIT_Z.negate());
    assert_eq!(
        Plane::from_points(&Vec3::ZERO, &Vec3::UNIT_X, &Vec3::UNIT_X.scale(2.0)),
        Plane::ZERO
    );
}

#[test]
fn plane_projection_and_negation() {
    let p = Plane::from_point_normal(&Vec3::new(0.0, 0.0, 3.0), &Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(p.constant(), -3.0);
    assert_eq!(p.project_point(&Vec3::new(1.0, 2.0, 7.0)), Vec3::new(1.0, 2.0, 3.0));
    let n = p.negate();
    assert_eq!(n.distance(&Vec3::ZERO), -p.distance(&Vec3::ZERO));
}

#[test]
fn plane_ray_intersection() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::UNIT_Z.negate());
    assert_eq!(Plane::XY.ray_intersection(&ray), Some(Vec3::ZERO));
    let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::UNIT_Z);
    assert_eq!(Plane::XY.ray_intersection(&behind), None);
    let parallel = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::UNIT_X);
    assert_eq!(Plane::XY.ray_intersection(&parallel), None);
}

#[test]
fn plane_reflection_matrix_mirrors_points() {
    let p = Plane::new(Vec3::UNIT_Y, -1.0);
    approx_eq3(
        p.reflection_matrix().transform_point(&Vec3::new(2.0, 3.0, 0.0)),
        Vec3::new(2.0, -1.0, 0.0),
        1e-6,
    );
}

#[test]
fn geometry_persists_as_text() {
    assert_eq!(Aabb::UNIT.encode_text(), "-0.5, -0.5, -0.5, 0.5, 0.5, 0.5");
    assert_eq!(Aabb::decode_text(&Aabb::UNIT.encode_text()), Ok(Aabb::UNIT));
    let plane = Plane::new(Vec3::UNIT_Y, -1.5);
    assert_eq!(plane.encode_text(), "0, 1, 0, -1.5");
    assert_eq!(Plane::decode_text("0, 1, 0, -1.5"), Ok(plane));
    let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UNIT_Z);
    let mut buf = Vec::new();
    ray.encode_binary(&mut buf);
    assert_eq!(buf.len(), 24);
    assert_eq!(Ray::decode_binary(&mut buf.as_slice()), Ok(ray));
}
