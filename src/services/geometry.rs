//! Joint angle geometry
//!
//! The angle is computed in the 2-D image plane only (z ignored) using the
//! two-argument arctangent of each ray, matching the feature the classifier
//! was trained on. The same function feeds both sample labeling and live
//! inference, so it must stay bit-for-bit reproducible.

use crate::domain::types::JointPosition;

/// Absolute angle in degrees between ray `b -> a` and ray `b -> c`,
/// with `b` the vertex (e.g. the elbow). Total and pure; range [0, 360).
pub fn joint_angle_degrees(a: JointPosition, b: JointPosition, c: JointPosition) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    radians.to_degrees().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> JointPosition {
        // z deliberately varied to show it has no effect
        JointPosition::new(x, y, x + y)
    }

    #[test]
    fn test_right_angle_fixture() {
        let shoulder = p(0.0, 0.0);
        let elbow = p(0.0, 1.0);
        let wrist = p(1.0, 1.0);

        let angle = joint_angle_degrees(shoulder, elbow, wrist);
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn test_straight_line() {
        let angle = joint_angle_degrees(p(0.0, 0.5), p(0.5, 0.5), p(1.0, 0.5));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_rays() {
        let angle = joint_angle_degrees(p(1.0, 1.0), p(0.0, 0.0), p(1.0, 1.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_symmetric_under_endpoint_swap() {
        let triples = [
            (p(0.1, 0.9), p(0.5, 0.5), p(0.9, 0.8)),
            (p(0.0, 0.0), p(0.3, 0.7), p(1.0, 0.2)),
            (p(0.2, 0.2), p(0.2, 0.8), p(0.7, 0.8)),
        ];

        for (a, b, c) in triples {
            assert_eq!(joint_angle_degrees(a, b, c), joint_angle_degrees(c, b, a));
        }
    }

    #[test]
    fn test_range_zero_to_360() {
        // Sweep one endpoint around the vertex
        for i in 0..36 {
            let theta = f64::from(i) * 10.0_f64.to_radians();
            let a = p(theta.cos(), theta.sin());
            let angle = joint_angle_degrees(a, p(0.0, 0.0), p(1.0, 0.0));
            assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
        }
    }

    #[test]
    fn test_z_is_ignored() {
        let a1 = JointPosition::new(0.0, 0.0, 0.0);
        let a2 = JointPosition::new(0.0, 0.0, 9.5);
        let b = JointPosition::new(0.0, 1.0, -3.0);
        let c = JointPosition::new(1.0, 1.0, 0.25);

        assert_eq!(joint_angle_degrees(a1, b, c), joint_angle_degrees(a2, b, c));
    }
}
