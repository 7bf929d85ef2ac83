// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::PI;

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use orrery_math::{Mat4, Persist, Quat, Vec3};

// Pinned seed so failures reproduce across machines and CI. Override locally
// with PROPTEST_SEED or edit `SEED_BYTES`.
const SEED_BYTES: [u8; 32] = [
    0x0e, 0x77, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0,
];

fn runner() -> TestRunner {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    TestRunner::new_with_rng(PropConfig::default(), rng)
}

fn angles() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(-PI..PI)
}

fn quat_from(a: [f32; 3]) -> Quat {
    Quat::from_angles_xyz(a[0], a[1], a[2])
}

#[test]
fn proptest_affine_inverse_round_trips() {
    let translation = prop::array::uniform3(-100.0f32..100.0);
    let scale = prop::array::uniform3(prop_oneof![-4.0f32..-0.5, 0.5f32..4.0]);
    let strategy = (translation, angles(), scale);

    runner()
        .run(&strategy, |(t, a, s)| {
            let m = Mat4::compose(Vec3::from(t), &quat_from(a), Vec3::from(s));
            let inv = m.invert_affine().expect("scales bounded away from zero");
            let id = m.multiply(&inv).to_array();
            for (got, want) in id.iter().zip(Mat4::IDENTITY.to_array().iter()) {
                prop_assert!((got - want).abs() < 1e-3, "{id:?}");
            }
            let general = m.invert().expect("invertible");
            for (g, f) in general.to_array().iter().zip(inv.to_array().iter()) {
                prop_assert!((g - f).abs() < 1e-3 * (1.0 + f.abs()));
            }
            Ok(())
        })
        .expect("affine inverse property");
}

#[test]
fn proptest_rotation_preserves_length_and_unit_norm() {
    let v = prop::array::uniform3(-1.0e3f32..1.0e3);
    runner()
        .run(&(angles(), v), |(a, v)| {
            let q = quat_from(a);
            prop_assert!((q.length() - 1.0).abs() < 1e-5);
            let v = Vec3::from(v);
            let rotated = q.rotate(&v);
            prop_assert!((rotated.length() - v.length()).abs() <= 1e-4 * (1.0 + v.length()));
            let back = q.invert().rotate(&rotated);
            prop_assert!(back.distance(&v) <= 1e-4 * (1.0 + v.length()));
            Ok(())
        })
        .expect("rotation property");
}

#[test]
fn proptest_slerp_endpoints_and_unit_results() {
    runner()
        .run(&(angles(), angles(), 0.0f32..1.0), |(a, b, t)| {
            let qa = quat_from(a);
            let qb = quat_from(b);
            prop_assert!(qa.slerp(&qb, 0.0).dot(&qa).abs() > 1.0 - 1e-4);
            prop_assert!(qa.slerp(&qb, 1.0).dot(&qb).abs() > 1.0 - 1e-4);
            prop_assert!((qa.slerp(&qb, t).length() - 1.0).abs() < 1e-4);
            Ok(())
        })
        .expect("slerp property");
}

#[test]
fn proptest_binary_codec_is_bit_exact() {
    let words = prop::array::uniform4(any::<u32>());
    runner()
        .run(&words, |w| {
            let q = Quat::new(
                f32::from_bits(w[0]),
                f32::from_bits(w[1]),
                f32::from_bits(w[2]),
                f32::from_bits(w[3]),
            );
            let mut buf = Vec::new();
            q.encode_binary(&mut buf);
            let back = Quat::decode_binary(&mut buf.as_slice()).expect("decode");
            prop_assert_eq!(back.to_array().map(f32::to_bits), w);
            Ok(())
        })
        .expect("binary codec property");
}

#[test]
fn proptest_text_codec_is_bit_exact() {
    let field = any::<f32>().prop_filter("not NaN", |v| !v.is_nan());
    runner()
        .run(&prop::array::uniform3(field), |v| {
            let original = Vec3::from(v);
            let back = Vec3::decode_text(&original.encode_text()).expect("decode");
            prop_assert_eq!(back.to_array().map(f32::to_bits), v.map(f32::to_bits));
            Ok(())
        })
        .expect("text codec property");
}
