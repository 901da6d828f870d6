//! Live simulation parameters
//!
//! Mutated in place by input handling between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Interaction model between discs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Discs only interact on contact
    #[default]
    Bounce,
    /// Inverse-square attraction/repulsion between separated discs
    Force,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Bounce => Mode::Force,
            Mode::Force => Mode::Bounce,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub mode: Mode,
    /// Negative attracts, positive repels
    pub force_power: f32,
    /// Scale impulses by the other disc's radius instead of a constant
    pub mass_weighted: bool,
    pub gravity_enabled: bool,
    /// Gravity direction in simulation space (1.0 = 1g)
    pub gravity: Vec2,
    /// Per-frame velocity loss; negative values inject energy
    pub friction: f32,
    /// Merge deeply overlapping discs (force mode only)
    pub merge_enabled: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            mode: Mode::Bounce,
            force_power: DEFAULT_FORCE_POWER,
            mass_weighted: true,
            gravity_enabled: false,
            gravity: Vec2::new(0.0, 1.0),
            friction: DEFAULT_FRICTION,
            merge_enabled: false,
        }
    }
}

impl SimParams {
    /// Whether merge candidates should be collected this frame
    #[inline]
    pub fn merging(&self) -> bool {
        self.mode == Mode::Force && self.merge_enabled
    }

    /// Increment used when a force button is held, based on current magnitude
    pub fn force_step(&self) -> f32 {
        match self.force_power.abs() {
            p if p < 4.0 => 0.1,
            p if p < 20.0 => 1.0,
            p if p < 40.0 => 2.0,
            p if p < 80.0 => 4.0,
            _ => 10.0,
        }
    }

    /// Ramp the force power while a button is held for `held_ms`.
    ///
    /// Nothing happens during the first half second; after that the step
    /// grows the longer the button stays down.
    pub fn ramp_force_power(&mut self, increase: bool, held_ms: u32) {
        if held_ms <= 500 {
            return;
        }
        let step = self.force_step();
        let delta = if held_ms > 8000 {
            step * held_ms as f32 / 1000.0
        } else if held_ms > 4000 {
            step * 4.0
        } else if held_ms > 2000 {
            step * 2.0
        } else {
            step
        };
        self.force_power += if increase { delta } else { -delta };
    }

    /// Force power from a touch along the screen edge: squared distance from
    /// the middle, attractive in the upper half.
    pub fn set_force_from_touch(&mut self, y: f32, height: f32) {
        let power = ((y - height / 2.0) / 16.0).powi(2);
        self.force_power = if y < height / 2.0 { -power } else { power };
    }

    /// Friction from a touch along the screen edge. The bottom 10 px give
    /// (amplified) negative friction.
    pub fn set_friction_from_touch(&mut self, y: f32, height: f32) {
        let friction = 0.08 * (height - 10.0 - y) / height;
        self.friction = if friction < 0.0 { friction * 4.0 } else { friction };
    }

    /// One-line summary, e.g. `Force -4.0(mcg) Balls:3 Friction: 0.25`
    pub fn status_label(&self, disc_count: usize) -> String {
        let mut label = match self.mode {
            Mode::Bounce => "Bounce".to_string(),
            Mode::Force => format!("Force {:.1}", self.force_power),
        };
        let flags: String = [
            (self.mass_weighted, 'm'),
            (self.merge_enabled, 'c'),
            (self.gravity_enabled, 'g'),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, c)| *c)
        .collect();
        if !flags.is_empty() {
            label.push('(');
            label.push_str(&flags);
            label.push(')');
        }
        label.push_str(&format!(
            " Balls:{} Friction: {:.2}",
            disc_count,
            self.friction * 12.5
        ));
        label
    }
}
