// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::FRAC_PI_2;

use vista_math::{Frame, Mat4, Transform, TransformParts, Vec3};

fn approx_eq3(a: [f32; 3], b: [f32; 3]) {
    const ABS_TOL: f32 = 1e-6;
    const REL_TOL: f32 = 1e-5;
    for i in 0..3 {
        let diff = (a[i] - b[i]).abs();
        let scale = a[i].abs().max(b[i].abs());
        let tol = ABS_TOL.max(REL_TOL * scale);
        assert!(diff <= tol, "index {i}: {a:?} vs {b:?}, diff={diff}, tol={tol}");
    }
}

fn approx_eq12(a: [f32; 12], b: [f32; 12]) {
    const ABS_TOL: f32 = 1e-5;
    const REL_TOL: f32 = 1e-5;
    for i in 0..12 {
        let diff = (a[i] - b[i]).abs();
        let scale = a[i].abs().max(b[i].abs());
        let tol = ABS_TOL.max(REL_TOL * scale);
        assert!(diff <= tol, "index {i}: {a:?} vs {b:?}, diff={diff}, tol={tol}");
    }
}

/// Full affine product with no fast paths, for cross-checking dispatch.
fn reference_concat(a: &Transform, b: &Transform) -> [f32; 12] {
    let am = a.to_array();
    let bm = b.to_array();
    let mut out = [0.0_f32; 12];
    for col in 0..3 {
        for row in 0..3 {
            let mut sum = 0.0;
            for k in 0..3 {
                sum += am[k * 3 + row] * bm[col * 3 + k];
            }
            out[col * 3 + row] = sum;
        }
    }
    for row in 0..3 {
        let mut sum = am[9 + row];
        for k in 0..3 {
            sum += am[k * 3 + row] * bm[9 + k];
        }
        out[9 + row] = sum;
    }
    out
}

/// Worst deviation of the linear block's column gram from the identity.
fn gram_deviation(entries: [f32; 12]) -> f32 {
    let mut worst: f32 = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            let mut g = 0.0;
            for r in 0..3 {
                g += entries[i * 3 + r] * entries[j * 3 + r];
            }
            let target = if i == j { 1.0 } else { 0.0 };
            worst = worst.max((g - target).abs());
        }
    }
    worst
}

fn sample_transforms() -> Vec<Transform> {
    let mut rot_scaled = Transform::rotation(Vec3::new(1.0, 2.0, 3.0), 0.8);
    rot_scaled.scale(Vec3::new(1.5, 2.0, 0.75));
    let mut full = Transform::rotation(Vec3::UNIT_Y, -1.2);
    full.translate(Vec3::new(-2.0, 0.5, 4.0));
    full.scale(Vec3::new(0.5, 3.0, 1.25));
    vec![
        Transform::identity(),
        Transform::translation(Vec3::new(4.0, -1.0, 2.5)),
        Transform::scaling(Vec3::new(2.0, 0.5, -1.5)),
        Transform::rotation(Vec3::new(0.3, -1.0, 0.2), 2.1),
        Transform::rotation_2d(30.0, Vec3::new(1.0, -2.0, 0.0)),
        rot_scaled,
        full,
    ]
}

#[test]
fn identity_is_neutral_and_unflagged() {
    let id = Transform::identity();
    assert!(id.parts().is_empty());
    let p = Vec3::new(4.0, -8.0, 15.0);
    assert_eq!(id.transform_point(&p).to_array(), p.to_array());
    assert_eq!(id.transform_normal(&p).to_array(), p.to_array());
    assert_eq!(Transform::default(), id);
}

#[test]
fn constructors_set_minimal_flags() {
    assert_eq!(
        Transform::translation(Vec3::ONE).parts(),
        TransformParts::TRANSLATION
    );
    assert_eq!(
        Transform::scaling(Vec3::new(2.0, 1.0, 1.0)).parts(),
        TransformParts::SCALE
    );
    assert_eq!(
        Transform::rotation(Vec3::UNIT_X, 0.5).parts(),
        TransformParts::ROTATION
    );
    assert_eq!(
        Transform::rotation_2d(45.0, Vec3::ZERO).parts(),
        TransformParts::TRANSLATION | TransformParts::ROTATION
    );
    assert_eq!(
        Transform::mirror(Vec3::new(-1.0, 1.0, 1.0), Vec3::ZERO).parts(),
        TransformParts::TRANSLATION | TransformParts::SCALE
    );
    assert_eq!(
        Transform::force_depth(1.0).parts(),
        TransformParts::TRANSLATION | TransformParts::SCALE
    );
    assert_eq!(
        Transform::from_array(Transform::identity().to_array()).parts(),
        TransformParts::ALL
    );
}

#[test]
fn mutators_match_their_constructors() {
    let offset = Vec3::new(1.0, -2.0, 3.0);
    let mut t = Transform::identity();
    t.translate(offset);
    assert_eq!(t, Transform::translation(offset));

    let factors = Vec3::new(2.0, 3.0, 0.5);
    let mut s = Transform::identity();
    s.scale(factors);
    assert_eq!(s, Transform::scaling(factors));

    let axis = Vec3::new(1.0, 1.0, -0.5);
    let mut r = Transform::identity();
    r.rotate(axis, 0.9);
    assert_eq!(r, Transform::rotation(axis, 0.9));
}

#[test]
fn concatenation_applies_right_operand_first() {
    // translate ∘ rotate: the rotation sees the point first
    let mut a = Transform::identity();
    a.concatenate(&Transform::translation(Vec3::new(1.0, 2.0, 3.0)));
    a.concatenate(&Transform::rotation(Vec3::UNIT_Z, FRAC_PI_2));
    approx_eq3(a.transform_point(&Vec3::UNIT_X).to_array(), [1.0, 3.0, 3.0]);

    // rotate ∘ translate: same pieces, opposite order
    let mut b = Transform::identity();
    b.concatenate(&Transform::rotation(Vec3::UNIT_Z, FRAC_PI_2));
    b.concatenate(&Transform::translation(Vec3::new(1.0, 2.0, 3.0)));
    approx_eq3(b.transform_point(&Vec3::UNIT_X).to_array(), [-2.0, 2.0, 3.0]);
}

#[test]
fn concatenation_matches_the_full_product_across_flag_kinds() {
    let samples = sample_transforms();
    for a in &samples {
        for b in &samples {
            let mut combined = *a;
            combined.concatenate(b);
            approx_eq12(combined.to_array(), reference_concat(a, b));
            assert_eq!(combined.parts(), a.parts().union(b.parts()));
        }
    }
}

#[test]
fn concatenating_identity_changes_nothing() {
    for sample in &sample_transforms() {
        let mut left = Transform::identity();
        left.concatenate(sample);
        assert_eq!(left, *sample);

        let mut right = *sample;
        right.concatenate(&Transform::identity());
        assert_eq!(right, *sample);
    }
}

#[test]
fn concatenation_is_associative_within_float_noise() {
    let mut a = Transform::rotation(Vec3::new(0.1, 0.9, -0.3), 1.7);
    a.translate(Vec3::new(3.0, -1.0, 0.5));
    let b = Transform::scaling(Vec3::new(1.5, 0.75, 2.0));
    let c = Transform::rotation_2d(72.0, Vec3::new(-1.0, 2.0, 0.0));

    let mut left = a;
    left.concatenate(&b);
    left.concatenate(&c);

    let mut inner = b;
    inner.concatenate(&c);
    let mut right = a;
    right.concatenate(&inner);

    approx_eq12(left.to_array(), right.to_array());
}

#[test]
fn application_dispatch_matches_the_general_path() {
    let p = Vec3::new(1.5, -2.0, 0.25);

    let diag = Transform::scaling(Vec3::new(2.0, 3.0, 4.0));
    let blanket = Transform::from_array(diag.to_array());
    assert_eq!(
        diag.transform_point(&p).to_array(),
        blanket.transform_point(&p).to_array()
    );

    let spin = Transform::rotation(Vec3::new(0.2, 1.0, -0.4), 1.3);
    let blanket_spin = Transform::from_array(spin.to_array());
    assert_eq!(
        spin.transform_point(&p).to_array(),
        blanket_spin.transform_point(&p).to_array()
    );
}

#[test]
fn normals_ignore_translation() {
    let mut m = Transform::rotation(Vec3::UNIT_Z, FRAC_PI_2);
    m.translate(Vec3::new(100.0, -50.0, 25.0));
    approx_eq3(m.transform_normal(&Vec3::UNIT_X).to_array(), [0.0, 1.0, 0.0]);
}

#[test]
fn force_depth_pins_z() {
    let flat = Transform::force_depth(2.0);
    assert_eq!(
        flat.transform_point(&Vec3::new(5.0, 6.0, 7.0)).to_array(),
        [5.0, 6.0, 2.0]
    );
}

#[test]
fn mirror_reflects_about_its_pivot() {
    let flip = Transform::mirror(Vec3::new(-1.0, 1.0, 1.0), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(
        flip.transform_point(&Vec3::new(3.0, 5.0, -1.0)).to_array(),
        [1.0, 5.0, -1.0]
    );
    assert_eq!(flip.determinant(), -1.0);
}

#[test]
fn rotation_2d_spins_about_its_pivot() {
    let pivot = Vec3::new(1.0, 1.0, 0.0);
    let spin = Transform::rotation_2d(90.0, pivot);
    approx_eq3(spin.transform_point(&pivot).to_array(), pivot.to_array());
    approx_eq3(
        spin.transform_point(&Vec3::new(2.0, 1.0, 0.0)).to_array(),
        [1.0, 2.0, 0.0],
    );
}

#[test]
fn determinant_reports_block_volume() {
    assert_eq!(
        Transform::scaling(Vec3::new(2.0, 3.0, 4.0)).determinant(),
        24.0
    );
    let det = Transform::rotation(Vec3::new(0.4, -0.7, 1.1), 1.234).determinant();
    assert!((det - 1.0).abs() < 1e-5);
}

#[test]
fn inverting_translation_negates_the_offset() {
    let mut t = Transform::translation(Vec3::new(1.0, -2.0, 3.0));
    t.invert();
    assert_eq!(t, Transform::translation(Vec3::new(-1.0, 2.0, -3.0)));
}

#[test]
fn inverting_scale_takes_reciprocals() {
    let mut s = Transform::scaling(Vec3::new(2.0, 4.0, 8.0));
    s.invert();
    assert_eq!(s, Transform::scaling(Vec3::new(0.5, 0.25, 0.125)));
}

#[test]
fn inverting_rotation_is_its_transpose() {
    let r = Transform::rotation(Vec3::new(1.0, 2.0, 3.0), 0.7);
    let mut inv = r;
    inv.invert();

    let a = r.to_array();
    let b = inv.to_array();
    for col in 0..3 {
        for row in 0..3 {
            assert_eq!(a[col * 3 + row], b[row * 3 + col]);
        }
    }

    let mut round = r;
    round.concatenate(&inv);
    approx_eq12(round.to_array(), Transform::identity().to_array());
}

#[test]
fn inverting_mixed_content_round_trips() {
    let mut m = Transform::rotation(Vec3::new(0.5, -1.0, 0.25), 1.1);
    m.scale(Vec3::new(2.0, 1.5, 0.75));
    m.translate(Vec3::new(4.0, -2.0, 1.0));
    assert_eq!(m.parts(), TransformParts::ALL);

    let mut inv = m;
    inv.invert();
    // the inverse carries the same component set
    assert_eq!(inv.parts(), TransformParts::ALL);

    let mut round = m;
    round.concatenate(&inv);
    approx_eq12(round.to_array(), Transform::identity().to_array());

    let p = Vec3::new(1.5, -2.0, 0.25);
    let there_and_back = inv.transform_point(&m.transform_point(&p));
    approx_eq3(there_and_back.to_array(), p.to_array());
}

#[test]
fn orthonormalize_recovers_a_drifted_rotation() {
    const NOISE: [f32; 9] = [
        3.5e-4, -2.6e-4, 4.1e-4, -1.4e-4, 0.9e-4, -3.1e-4, 2.2e-4, -1.8e-4, 2.7e-4,
    ];
    let mut r = Transform::rotation(Vec3::new(1.0, 2.0, 3.0), 0.9);
    r.translate(Vec3::new(5.0, 6.0, 7.0));
    let mut entries = r.to_array();
    for (slot, delta) in entries.iter_mut().take(9).zip(NOISE) {
        *slot += delta;
    }

    let mut drifted = Transform::from_array(entries);
    let before = gram_deviation(drifted.to_array());
    assert!(before > 1e-5, "noise should register as drift, got {before}");

    drifted.orthonormalize();
    let after = gram_deviation(drifted.to_array());
    assert!(after < 5e-6, "one pass should flatten the drift, got {after}");
    assert!(after < before);

    // translation survives bit for bit
    let healed = drifted.to_array();
    assert_eq!(healed[9].to_bits(), entries[9].to_bits());
    assert_eq!(healed[10].to_bits(), entries[10].to_bits());
    assert_eq!(healed[11].to_bits(), entries[11].to_bits());
}

#[test]
fn classification_rebuilds_flags_from_entries() {
    // a blanket mask over identity entries tightens to none
    let mut blank = Transform::from_array(Transform::identity().to_array());
    blank.classify();
    assert_eq!(blank.parts(), TransformParts::NONE);

    // sub-threshold translation clears
    let mut nudged = Transform::translation(Vec3::new(1e-6, -2e-6, 0.0));
    nudged.classify();
    assert_eq!(nudged.parts(), TransformParts::NONE);

    let mut moved = Transform::translation(Vec3::new(0.5, 0.0, 0.0));
    moved.classify();
    assert_eq!(moved.parts(), TransformParts::TRANSLATION);

    let mut grown = Transform::scaling(Vec3::new(2.0, 1.0, 1.0));
    grown.classify();
    assert_eq!(grown.parts(), TransformParts::SCALE);

    let mut spun = Transform::rotation(Vec3::UNIT_Z, 1.0);
    spun.classify();
    assert_eq!(spun.parts(), TransformParts::ROTATION);
}

#[test]
fn classification_marks_shrinking_diagonals_conservatively() {
    let mut shrunk = Transform::scaling(Vec3::new(0.5, 0.5, 0.5));
    shrunk.classify();
    assert!(shrunk.parts().contains(TransformParts::SCALE));
    // shrinking diagonals also trip the rotation check; that only costs
    // fast paths, never correctness
    assert!(shrunk.parts().contains(TransformParts::ROTATION));
}

#[test]
fn classification_agrees_with_running_flags_for_plain_compositions() {
    let mut m = Transform::identity();

    m.translate(Vec3::new(1.0, 2.0, 3.0));
    let mut readback = m;
    readback.classify();
    assert_eq!(readback.parts(), m.parts());

    m.rotate(Vec3::new(1.0, 1.0, 0.0), 0.9);
    readback = m;
    readback.classify();
    assert_eq!(readback.parts(), m.parts());

    m.scale(Vec3::new(2.0, 2.0, 2.0));
    readback = m;
    readback.classify();
    assert_eq!(readback.parts(), m.parts());
}

#[test]
fn from_axes_carries_up_onto_the_direction() {
    let direction = Vec3::new(1.0, 2.0, 3.0);
    let heading = Vec3::UNIT_Z;
    let position = Vec3::new(-2.0, 4.0, 0.5);
    let m = Transform::from_axes(direction, Some(heading), Some(position));

    let dir = direction.normalize();
    approx_eq3(m.transform_normal(&Vec3::UNIT_Y).to_array(), dir.to_array());

    let expected_forward = (heading - dir * dir.dot(&heading)).normalize();
    approx_eq3(
        m.transform_normal(&Vec3::UNIT_Z).to_array(),
        expected_forward.to_array(),
    );

    assert!(gram_deviation(m.to_array()) < 1e-5);
    assert!((m.determinant() - 1.0).abs() < 1e-5);
    assert_eq!(m.translation_part().to_array(), position.to_array());
    assert_eq!(
        m.parts(),
        TransformParts::ROTATION | TransformParts::TRANSLATION
    );
}

#[test]
fn from_axes_substitutes_a_perpendicular_for_degenerate_headings() {
    // no heading at all
    let plain = Transform::from_axes(Vec3::UNIT_Y, None, None);
    assert!(gram_deviation(plain.to_array()) < 1e-6);
    approx_eq3(plain.transform_normal(&Vec3::UNIT_Y).to_array(), [0.0, 1.0, 0.0]);

    // heading parallel to the direction
    let parallel = Transform::from_axes(Vec3::UNIT_Z, Some(Vec3::UNIT_Z * 2.0), None);
    assert!(gram_deviation(parallel.to_array()) < 1e-6);
    approx_eq3(parallel.transform_normal(&Vec3::UNIT_Y).to_array(), [0.0, 0.0, 1.0]);
    for entry in parallel.to_array() {
        assert!(entry.is_finite());
    }
}

#[test]
fn difference_carries_one_frame_onto_the_other() {
    let from = Frame::new(Vec3::UNIT_Y)
        .with_heading(Vec3::UNIT_Z)
        .with_position(Vec3::new(1.0, 1.0, 1.0));
    let to = Frame::new(Vec3::UNIT_X)
        .with_heading(Vec3::UNIT_Y)
        .with_position(Vec3::new(4.0, 5.0, 6.0));
    let m = Transform::difference(&from, &to);

    approx_eq3(
        m.transform_point(&Vec3::new(1.0, 1.0, 1.0)).to_array(),
        [4.0, 5.0, 6.0],
    );
    approx_eq3(m.transform_normal(&Vec3::UNIT_Y).to_array(), [1.0, 0.0, 0.0]);
    approx_eq3(m.transform_normal(&Vec3::UNIT_Z).to_array(), [0.0, 1.0, 0.0]);
    assert_eq!(
        m.parts(),
        TransformParts::TRANSLATION | TransformParts::ROTATION
    );
}

#[test]
fn difference_takes_a_half_turn_for_antiparallel_directions() {
    let m = Transform::difference(&Frame::new(Vec3::UNIT_Y), &Frame::new(-Vec3::UNIT_Y));
    approx_eq3(m.transform_normal(&Vec3::UNIT_Y).to_array(), [0.0, -1.0, 0.0]);
    assert!(gram_deviation(m.to_array()) < 1e-5);
}

#[test]
fn difference_without_positions_is_a_pure_rotation() {
    let m = Transform::difference(&Frame::new(Vec3::UNIT_Y), &Frame::new(Vec3::UNIT_Z));
    assert_eq!(m.parts(), TransformParts::ROTATION);
    assert_eq!(m.translation_part().to_array(), [0.0, 0.0, 0.0]);
    approx_eq3(m.transform_normal(&Vec3::UNIT_Y).to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn widening_to_mat4_appends_the_homogeneous_row() {
    let mut m = Transform::translation(Vec3::new(1.0, 2.0, 3.0));
    m.scale(Vec3::new(2.0, 2.0, 2.0));
    let wide = m.to_mat4().to_array();
    // translation column carries w = 1
    assert_eq!([wide[12], wide[13], wide[14], wide[15]], [2.0, 4.0, 6.0, 1.0]);
    // linear columns carry w = 0
    assert_eq!([wide[3], wide[7], wide[11]], [0.0, 0.0, 0.0]);
    assert_eq!(wide[0], 2.0);
    assert_eq!(Mat4::from(&m).to_array(), wide);
}
