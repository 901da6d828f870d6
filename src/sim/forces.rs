//! External forces: tilt-derived gravity and friction damping

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::params::SimParams;
use crate::consts::*;

/// How the tilt sensor sits relative to the display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltCalibration {
    /// Rotation about the sensor Y axis into the display plane (radians)
    pub mounting_angle: f32,
    /// Raw reading corresponding to 1g
    pub counts_per_g: f32,
}

impl Default for TiltCalibration {
    fn default() -> Self {
        Self {
            mounting_angle: MOUNTING_ANGLE,
            counts_per_g: COUNTS_PER_G,
        }
    }
}

impl TiltCalibration {
    /// Rotate a sensor-space vector about Y by the mounting angle
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let (sin, cos) = self.mounting_angle.sin_cos();
        Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
    }
}

/// Per-frame acceleration and damping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceModel {
    pub calibration: TiltCalibration,
}

impl ForceModel {
    pub fn new(calibration: TiltCalibration) -> Self {
        Self { calibration }
    }

    /// Gravity vector in simulation space from a raw accelerometer reading.
    ///
    /// Sensor +x runs up the screen and +y to its left, so the in-plane
    /// components swap and flip on the way into simulation coordinates.
    pub fn gravity_from_tilt(&self, raw: [i16; 3]) -> Vec2 {
        let scale = self.calibration.counts_per_g;
        if scale == 0.0 {
            return Vec2::ZERO;
        }
        let g = Vec3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) / scale;
        let rotated = self.calibration.rotate(g);
        Vec2::new(-rotated.y, -rotated.x)
    }

    /// Acceleration applied to every disc this frame
    pub fn acceleration(&self, params: &SimParams) -> Vec2 {
        if params.gravity_enabled {
            params.gravity * GRAVITY_GAIN
        } else {
            Vec2::ZERO
        }
    }

    /// Velocity multiplier applied after acceleration (gravity on only)
    pub fn dampening(&self, params: &SimParams) -> f32 {
        if !params.gravity_enabled {
            return 1.0;
        }
        dampening(params.friction)
    }
}

/// `1 - friction / FRICTION_DIVISOR`, exactly 1.0 for tiny positive friction
pub fn dampening(friction: f32) -> f32 {
    if friction > 0.0 && friction < FRICTION_EPSILON {
        1.0
    } else {
        1.0 - friction / FRICTION_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dampening_clamps_near_zero() {
        assert_eq!(dampening(0.0005), 1.0);
        assert_eq!(dampening(0.0), 1.0);
        assert!((dampening(0.02) - 0.998).abs() < 1e-6);
        assert!(dampening(-0.1) > 1.0);
    }

    #[test]
    fn test_no_gravity_no_force() {
        let model = ForceModel::default();
        let params = SimParams {
            gravity_enabled: false,
            friction: 0.5,
            ..Default::default()
        };
        assert_eq!(model.acceleration(&params), Vec2::ZERO);
        assert_eq!(model.dampening(&params), 1.0);
    }

    #[test]
    fn test_gravity_gain() {
        let model = ForceModel::default();
        let params = SimParams {
            gravity_enabled: true,
            gravity: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        let a = model.acceleration(&params);
        assert!((a.y - GRAVITY_GAIN).abs() < 1e-6);
        assert_eq!(a.x, 0.0);
    }

    #[test]
    fn test_tilt_without_mounting_angle_is_axis_swap() {
        let model = ForceModel::new(TiltCalibration {
            mounting_angle: 0.0,
            counts_per_g: 1000.0,
        });
        let g = model.gravity_from_tilt([500, -1000, 0]);
        assert!((g.x - 1.0).abs() < 1e-6);
        assert!((g.y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mounting_angle_rotation() {
        let cal = TiltCalibration {
            mounting_angle: std::f32::consts::FRAC_PI_2,
            counts_per_g: 1.0,
        };
        // A reading straight out of the sensor face lies along +x once rotated
        let v = cal.rotate(Vec3::new(0.0, 0.0, 1.0));
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
    }

    #[test]
    fn test_zero_scale_is_ignored() {
        let model = ForceModel::new(TiltCalibration {
            mounting_angle: 0.0,
            counts_per_g: 0.0,
        });
        assert_eq!(model.gravity_from_tilt([100, 100, 100]), Vec2::ZERO);
    }
}
