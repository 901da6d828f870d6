//! Disc Sim entry point
//!
//! Runs the simulation headless on the host. A scripted input source stands
//! in for the touch screen, a swaying sensor for the accelerometer, and each
//! presented frame is summarised to the log instead of a panel.
//!
//! Usage: `disc-sim [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Duration, Instant};

    use disc_sim::Settings;
    use disc_sim::platform::{InputSource, Renderer, TiltSource, gather_input, render_frame};
    use disc_sim::sim::{InputEvent, ScreenDisc, Simulation, tick};

    /// Frames between status lines
    const STATUS_INTERVAL: u64 = 120;
    /// Length of the demo script before it repeats
    const SCRIPT_CYCLE: u64 = 1800;

    /// Counts what would have been drawn
    #[derive(Default)]
    struct LogRenderer {
        drawn: usize,
        largest: i32,
        presented: u64,
    }

    impl Renderer for LogRenderer {
        fn clear(&mut self) {
            self.drawn = 0;
            self.largest = 0;
        }

        fn draw_disc(&mut self, disc: &ScreenDisc) {
            self.drawn += 1;
            self.largest = self.largest.max(disc.radius);
        }

        fn present(&mut self) {
            self.presented += 1;
            log::trace!("Presented {} discs (largest r={})", self.drawn, self.largest);
        }
    }

    /// Replays a fixed tour of the controls
    struct DemoScript {
        frame: u64,
    }

    impl InputSource for DemoScript {
        fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
            let step = self.frame % SCRIPT_CYCLE;
            self.frame += 1;
            match step {
                0..=29 => events.push(InputEvent::SpawnRandom),
                300 => events.push(InputEvent::ToggleGravity),
                600 => events.push(InputEvent::ToggleGravity),
                700 => events.push(InputEvent::ToggleMode),
                701 => events.push(InputEvent::ForceFromTouch { y: 176.0 }),
                900 => events.push(InputEvent::ToggleMerge),
                1200 => events.push(InputEvent::ZoomOut),
                1400 => events.push(InputEvent::ZoomIn),
                1500 => events.push(InputEvent::ToggleMerge),
                1501 => events.push(InputEvent::ToggleMode),
                1799 => events.push(InputEvent::Reset),
                _ => {}
            }
        }
    }

    /// Accelerometer slowly rocking side to side
    struct SwayingTilt {
        phase: f32,
    }

    impl TiltSource for SwayingTilt {
        fn read_tilt(&mut self) -> Option<[i16; 3]> {
            self.phase += 0.01;
            let (sin, cos) = self.phase.sin_cos();
            Some([(cos * 4000.0) as i16, (sin * 8000.0) as i16, 14000])
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Disc Sim (native) starting...");

        let settings = match std::env::args_os().nth(1) {
            Some(path) => Settings::load_from(&PathBuf::from(path)),
            None => Settings::default(),
        };
        let delay = Duration::from_millis(settings.frame_delay_ms);

        let mut sim = Simulation::new(&settings);
        let mut renderer = LogRenderer::default();
        let mut script = DemoScript { frame: 0 };
        let mut tilt = SwayingTilt { phase: 0.0 };

        let mut window_start = Instant::now();
        // The simulation's own counter restarts on reset
        let mut frames: u64 = 0;
        loop {
            let input = gather_input(&sim, &mut script, &mut tilt);
            tick(&mut sim, &input);
            render_frame(&mut sim, &mut renderer);
            frames += 1;

            if frames % STATUS_INTERVAL == 0 {
                let elapsed = window_start.elapsed().as_secs_f32();
                let fps = if elapsed > 0.0 { STATUS_INTERVAL as f32 / elapsed } else { 0.0 };
                log::info!("{} fps:{:.2}", sim.status_label(), fps);
                window_start = Instant::now();
            }

            if settings.frames.is_some_and(|n| frames >= n) {
                break;
            }
            thread::sleep(delay);
        }

        log::info!(
            "Stopped after {} frames ({} presented), {} discs live",
            frames,
            renderer.presented,
            sim.live_count()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the only wasm deliverable
}
