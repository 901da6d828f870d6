//! Per-frame driver
//!
//! Applies the input gathered since the last frame, refreshes gravity from
//! the tilt sensor, then advances the physics by one step.

use glam::Vec2;

use super::state::{FrameStats, Simulation};

/// A discrete, already-debounced user action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Spawn a random disc at a simulation-space position
    Spawn { pos: Vec2 },
    /// Spawn a random disc under a render-surface point
    SpawnAtScreen { pos: Vec2 },
    /// Spawn a random disc somewhere in the viewport
    SpawnRandom,
    ToggleMode,
    ToggleMass,
    ToggleMerge,
    ToggleGravity,
    ZoomIn,
    ZoomOut,
    /// Force button held down for `held_ms`
    AdjustForce { increase: bool, held_ms: u32 },
    /// Touch along the force edge at surface height `y`
    ForceFromTouch { y: f32 },
    /// Touch along the friction edge at surface height `y`
    FrictionFromTouch { y: f32 },
    /// Start over with the current parameters
    Reset,
}

/// Everything collected for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    /// Raw accelerometer reading, if a sensor is attached
    pub tilt: Option<[i16; 3]>,
}

/// Advance the simulation by one frame
pub fn tick(sim: &mut Simulation, input: &FrameInput) -> FrameStats {
    for event in &input.events {
        apply_event(sim, *event);
    }

    if sim.params.gravity_enabled {
        if let Some(raw) = input.tilt {
            sim.update_tilt(raw);
        }
    }

    sim.step_frame()
}

/// Apply one input event to the simulation parameters or disc set
pub fn apply_event(sim: &mut Simulation, event: InputEvent) {
    match event {
        InputEvent::Spawn { pos } => {
            sim.spawn_at(pos);
        }
        InputEvent::SpawnAtScreen { pos } => {
            sim.spawn_at_screen(pos);
        }
        InputEvent::SpawnRandom => {
            sim.spawn_random();
        }
        InputEvent::ToggleMode => {
            let mode = sim.params.mode.toggled();
            sim.set_mode(mode);
            log::info!("Mode: {:?}", mode);
        }
        InputEvent::ToggleMass => {
            let on = !sim.params.mass_weighted;
            sim.set_mass_weighted(on);
            log::info!("Mass weighting: {}", on);
        }
        InputEvent::ToggleMerge => {
            let on = !sim.params.merge_enabled;
            sim.set_merge_enabled(on);
            log::info!("Merging: {}", on);
        }
        InputEvent::ToggleGravity => {
            let on = !sim.params.gravity_enabled;
            sim.set_gravity_enabled(on);
            log::info!("Gravity: {}", on);
        }
        InputEvent::ZoomIn => {
            sim.zoom_in();
        }
        InputEvent::ZoomOut => {
            sim.zoom_out();
        }
        InputEvent::AdjustForce { increase, held_ms } => {
            sim.params.ramp_force_power(increase, held_ms);
        }
        InputEvent::ForceFromTouch { y } => {
            let height = sim.viewport.surface().y;
            sim.params.set_force_from_touch(y, height);
        }
        InputEvent::FrictionFromTouch { y } => {
            let height = sim.viewport.surface().y;
            sim.params.set_friction_from_touch(y, height);
        }
        InputEvent::Reset => {
            let params = sim.params.clone();
            sim.reset(params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::params::Mode;

    fn sim() -> Simulation {
        Simulation::new(&Settings {
            initial_discs: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_toggle_events() {
        let mut sim = sim();
        let input = FrameInput {
            events: vec![
                InputEvent::ToggleMode,
                InputEvent::ToggleMerge,
                InputEvent::ToggleMass,
                InputEvent::ToggleGravity,
            ],
            tilt: None,
        };
        tick(&mut sim, &input);
        assert_eq!(sim.params.mode, Mode::Force);
        assert!(sim.params.merge_enabled);
        assert!(!sim.params.mass_weighted);
        assert!(sim.params.gravity_enabled);
    }

    #[test]
    fn test_spawn_events() {
        let mut sim = sim();
        let input = FrameInput {
            events: vec![
                InputEvent::Spawn { pos: Vec2::new(100.0, 100.0) },
                InputEvent::SpawnAtScreen { pos: Vec2::new(300.0, 300.0) },
                InputEvent::SpawnRandom,
            ],
            tilt: None,
        };
        let stats = tick(&mut sim, &input);
        assert_eq!(stats.live, 3);
        assert_eq!(stats.frame, 1);
    }

    #[test]
    fn test_tilt_only_read_with_gravity() {
        let mut sim = sim();
        let before = sim.params.gravity;
        let input = FrameInput {
            events: Vec::new(),
            tilt: Some([17000, 0, 0]),
        };
        tick(&mut sim, &input);
        assert_eq!(sim.params.gravity, before);

        sim.set_gravity_enabled(true);
        tick(&mut sim, &input);
        assert_ne!(sim.params.gravity, before);
    }

    #[test]
    fn test_touch_adjustments_use_surface_height() {
        let mut sim = sim();
        apply_event(&mut sim, InputEvent::ForceFromTouch { y: 240.0 + 48.0 });
        assert_eq!(sim.params.force_power, 9.0);
        apply_event(&mut sim, InputEvent::FrictionFromTouch { y: 470.0 });
        assert_eq!(sim.params.friction, 0.0);
    }

    #[test]
    fn test_zoom_events_move_viewport() {
        let mut sim = sim();
        sim.spawn_at(Vec2::new(200.0, 200.0));
        apply_event(&mut sim, InputEvent::ZoomOut);
        assert!(!sim.viewport.is_default());
        apply_event(&mut sim, InputEvent::ZoomIn);
        assert!(sim.viewport.is_default());
    }

    #[test]
    fn test_reset_event_keeps_params() {
        let mut sim = sim();
        sim.set_mode(Mode::Force);
        sim.spawn_random();
        apply_event(&mut sim, InputEvent::Reset);
        assert_eq!(sim.params.mode, Mode::Force);
        assert_eq!(sim.live_count(), 0);
    }
}
