//! Disc Sim - interactive 2D disc simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped physics (disc store, forces, collisions, merging, viewport)
//! - `platform`: Renderer / tilt sensor / input abstraction
//! - `settings`: JSON configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Simulation, tick};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Simulation space size at 1:1 scale (matches the render surface)
    pub const SURFACE_WIDTH: f32 = 480.0;
    pub const SURFACE_HEIGHT: f32 = 480.0;

    /// Soft limit on live discs
    pub const MAX_DISCS: usize = 255;
    /// Discs seeded at startup
    pub const INITIAL_DISCS: usize = 2;

    /// Spawned radius range [MIN, MAX)
    pub const MIN_SPAWN_RADIUS: u32 = 2;
    pub const MAX_SPAWN_RADIUS: u32 = 40;
    /// Minimum r+g+b for a spawned colour (keeps discs visible on black)
    pub const MIN_COLOR_BRIGHTNESS: u32 = 224;

    /// Scale applied to the gravity vector each frame
    pub const GRAVITY_GAIN: f32 = 0.2;
    /// dampening = 1 - friction / FRICTION_DIVISOR
    pub const FRICTION_DIVISOR: f32 = 10.0;
    /// Friction below this (and above zero) is treated as none
    pub const FRICTION_EPSILON: f32 = 0.0008;
    pub const DEFAULT_FRICTION: f32 = 0.02;

    /// Accelerometer counts for 1g
    pub const COUNTS_PER_G: f32 = 17000.0;
    /// Sensor mounting angle relative to the display plane (radians)
    pub const MOUNTING_ANGLE: f32 = -0.932;

    /// Impulse multiplier when collisions are not mass-weighted
    pub const FIXED_IMPULSE_SCALE: f32 = 10.0;
    /// Overlap below r_sum / ANTI_STICK_DIVISOR collides even in force mode
    pub const ANTI_STICK_DIVISOR: f32 = 4.0;
    pub const DEFAULT_FORCE_POWER: f32 = -4.0;

    /// Zoom-out growth factor over the disc bounding box
    pub const ZOOM_OUT_FACTOR: f32 = 1.5;
    /// Zoom-in half extent divisor (slightly under 2 leaves a margin)
    pub const ZOOM_IN_DIVISOR: f32 = 1.95;
    /// Widest viewport side zoom-out may produce (sim units)
    pub const MAX_VIEW_EXTENT: f32 = 1.0e7;
    /// Smallest radius handed to the renderer when scaled
    pub const MIN_RENDER_RADIUS: i32 = 2;

    /// Frame pacing delay for the demo loop
    pub const FRAME_DELAY_MS: u64 = 16;
}

/// Largest and smallest corners of a set of points, `None` when empty
pub fn bounding_box(points: impl IntoIterator<Item = Vec2>) -> Option<(Vec2, Vec2)> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let pts = [Vec2::new(1.0, 5.0), Vec2::new(-2.0, 3.0), Vec2::new(4.0, -1.0)];
        let (lo, hi) = bounding_box(pts).unwrap();
        assert_eq!(lo, Vec2::new(-2.0, -1.0));
        assert_eq!(hi, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(std::iter::empty()).is_none());
    }
}
