//! Platform abstraction layer
//!
//! The simulation never talks to hardware. Devices plug in through:
//! - `Renderer`: draws mapped discs
//! - `TiltSource`: accelerometer readings
//! - `InputSource`: debounced touch/button actions

use crate::sim::{FrameInput, InputEvent, ScreenDisc, Simulation};

/// Display backend
pub trait Renderer {
    fn clear(&mut self);
    fn draw_disc(&mut self, disc: &ScreenDisc);
    /// Push the finished frame to the panel
    fn present(&mut self);
}

/// Accelerometer in device-native counts
pub trait TiltSource {
    /// `None` when no reading is available this frame
    fn read_tilt(&mut self) -> Option<[i16; 3]>;
}

/// Board without a tilt sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTilt;

impl TiltSource for NoTilt {
    fn read_tilt(&mut self) -> Option<[i16; 3]> {
        None
    }
}

/// Source of user actions, each delivered once per gesture
pub trait InputSource {
    /// Append any events that arrived since the last call
    fn poll_events(&mut self, events: &mut Vec<InputEvent>);
}

/// Collect this frame's input. The sensor is only read while gravity is on.
pub fn gather_input(
    sim: &Simulation,
    input: &mut impl InputSource,
    tilt: &mut impl TiltSource,
) -> FrameInput {
    let mut events = Vec::new();
    input.poll_events(&mut events);
    let tilt = if sim.params.gravity_enabled {
        tilt.read_tilt()
    } else {
        None
    };
    FrameInput { events, tilt }
}

/// Draw the current frame if the render throttle allows it.
/// Returns true when a frame was presented.
pub fn render_frame(sim: &mut Simulation, renderer: &mut impl Renderer) -> bool {
    if !sim.viewport.should_render() {
        return false;
    }
    renderer.clear();
    sim.for_each_renderable_disc(|disc| renderer.draw_disc(&disc));
    renderer.present();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: usize,
        drawn: Vec<ScreenDisc>,
        clears: usize,
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self) {
            self.clears += 1;
            self.drawn.clear();
        }

        fn draw_disc(&mut self, disc: &ScreenDisc) {
            self.drawn.push(*disc);
        }

        fn present(&mut self) {
            self.frames += 1;
        }
    }

    struct CountingTilt(usize);

    impl TiltSource for CountingTilt {
        fn read_tilt(&mut self) -> Option<[i16; 3]> {
            self.0 += 1;
            Some([0, 0, 17000])
        }
    }

    struct Script(Vec<InputEvent>);

    impl InputSource for Script {
        fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
            events.append(&mut self.0);
        }
    }

    fn sim(discs: usize) -> Simulation {
        Simulation::new(&Settings {
            initial_discs: discs,
            ..Default::default()
        })
    }

    #[test]
    fn test_render_draws_every_live_disc() {
        let mut sim = sim(4);
        let mut renderer = RecordingRenderer::default();
        assert!(render_frame(&mut sim, &mut renderer));
        assert_eq!(renderer.drawn.len(), 4);
        assert_eq!(renderer.frames, 1);
        assert!(renderer.drawn.iter().all(|d| d.radius >= 2));
    }

    #[test]
    fn test_render_respects_throttle() {
        let mut sim = sim(1);
        sim.zoom_out();
        let mut renderer = RecordingRenderer::default();
        let presented = (0..6).filter(|_| render_frame(&mut sim, &mut renderer)).count();
        assert_eq!(presented, 3);
        assert_eq!(renderer.clears, 3);
    }

    #[test]
    fn test_gather_input_reads_tilt_only_with_gravity() {
        let mut sim = sim(0);
        let mut tilt = CountingTilt(0);
        let mut script = Script(vec![InputEvent::Spawn { pos: Vec2::splat(50.0) }]);

        let input = gather_input(&sim, &mut script, &mut tilt);
        assert_eq!(input.events.len(), 1);
        assert!(input.tilt.is_none());
        assert_eq!(tilt.0, 0);

        sim.set_gravity_enabled(true);
        let input = gather_input(&sim, &mut script, &mut tilt);
        assert!(input.events.is_empty());
        assert_eq!(input.tilt, Some([0, 0, 17000]));
    }

    #[test]
    fn test_no_tilt() {
        assert!(NoTilt.read_tilt().is_none());
    }
}
