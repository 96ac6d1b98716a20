use super::Mat4;

/// Rate of the Y rotation relative to the X rotation.
pub const Y_RATE: f32 = 0.5;

/// Right-handed rotation about +X by `angle` radians.
pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-handed rotation about +Y by `angle` radians.
pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Cube transform for a given angle: `rotate_x(angle) * rotate_y(angle * 0.5)`.
///
/// Recomputed from scratch on every call, so there is no accumulated drift.
/// `angle` is typically elapsed seconds.
pub fn compose(angle: f32) -> Mat4 {
    rotate_x(angle).mul_mat(&rotate_y(angle * Y_RATE))
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{PI, TAU};

    use super::*;

    const EPS: f32 = 1e-5;

    // Closed form of Rx(a) * Ry(b), written out by hand.
    fn reference(a: f32) -> [[f32; 4]; 4] {
        let (ca, sa) = (a.cos(), a.sin());
        let (cb, sb) = ((a * 0.5).cos(), (a * 0.5).sin());
        [
            [cb, 0.0, sb, 0.0],
            [sa * sb, ca, -sa * cb, 0.0],
            [-ca * sb, sa, ca * cb, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    fn angles() -> impl Iterator<Item = f32> {
        (-40..=40).map(|i| i as f32 * 0.37)
    }

    // ── compose ───────────────────────────────────────────────────────────

    #[test]
    fn compose_matches_closed_form() {
        for a in angles() {
            let got = compose(a);
            let want = Mat4::from_rows(reference(a));
            assert!(got.approx_eq(&want, EPS), "angle {a}: {got:?} != {want:?}");
        }
    }

    #[test]
    fn compose_zero_is_identity() {
        assert!(compose(0.0).approx_eq(&Mat4::IDENTITY, EPS));
    }

    #[test]
    fn compose_bottom_row_and_translation_are_affine() {
        for a in angles() {
            let m = compose(a);
            assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0]);
            assert_eq!([m.m[0][3], m.m[1][3], m.m[2][3]], [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn compose_linear_block_is_orthonormal() {
        for a in angles() {
            let r = compose(a).linear_block();
            for i in 0..3 {
                for j in 0..3 {
                    let dot: f32 = (0..3).map(|k| r[i][k] * r[j][k]).sum();
                    let want = if i == j { 1.0 } else { 0.0 };
                    assert!((dot - want).abs() < 1e-4, "angle {a}: row {i}·row {j} = {dot}");
                }
            }
        }
    }

    // ── periodicity ───────────────────────────────────────────────────────

    #[test]
    fn x_rotation_is_two_pi_periodic() {
        for a in [0.0, 0.3, 1.7, 4.0] {
            assert!(rotate_x(a).approx_eq(&rotate_x(a + TAU), 1e-4));
        }
    }

    #[test]
    fn compose_is_four_pi_periodic() {
        for a in [0.0, 0.3, 1.7, 4.0] {
            assert!(compose(a).approx_eq(&compose(a + 2.0 * TAU), 1e-4));
        }
    }

    #[test]
    fn compose_is_not_two_pi_periodic() {
        // Y runs at half rate; after 2π it sits at π, flipping X and Z.
        let a = 0.3;
        assert!(!compose(a).approx_eq(&compose(a + TAU), 1e-2));
    }

    #[test]
    fn y_half_turn_after_two_pi() {
        let m = compose(TAU);
        let want = rotate_y(PI);
        assert!(m.approx_eq(&want, 1e-4));
    }

    // ── axes ──────────────────────────────────────────────────────────────

    #[test]
    fn rotate_x_keeps_x_axis() {
        let m = rotate_x(1.1);
        let p = m.transform_point([1.0, 0.0, 0.0]);
        assert!((p[0] - 1.0).abs() < EPS && p[1].abs() < EPS && p[2].abs() < EPS);
    }

    #[test]
    fn rotate_y_quarter_turn_maps_z_to_x() {
        let p = rotate_y(PI / 2.0).transform_point([0.0, 0.0, 1.0]);
        assert!((p[0] - 1.0).abs() < EPS && p[1].abs() < EPS && p[2].abs() < EPS);
    }
}
