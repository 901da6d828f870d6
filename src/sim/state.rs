//! The simulation aggregate
//!
//! Owns the disc store, live parameters and viewport. Everything that
//! changes during a frame goes through `&mut Simulation`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{PassContext, resolve_pass};
use super::disc::{Disc, DiscId, DiscStore};
use super::forces::ForceModel;
use super::merge::{MergeCandidate, consolidate};
use super::params::{Mode, SimParams};
use super::viewport::{ScreenDisc, Viewport};
use crate::settings::Settings;

/// Counters for one simulation frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub impulses: usize,
    pub merges: usize,
    pub wall_hits: usize,
    pub live: usize,
}

/// Disc store, parameters and viewport for one running simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    pub store: DiscStore,
    pub params: SimParams,
    pub viewport: Viewport,
    pub forces: ForceModel,
    /// Filled by the collision pass, drained by consolidation
    candidates: Vec<MergeCandidate>,
    rng: Pcg32,
    seed: u64,
    initial_discs: usize,
    frame: u64,
}

impl Simulation {
    /// Create a simulation and seed its initial discs
    pub fn new(settings: &Settings) -> Self {
        let mut sim = Self {
            store: DiscStore::new(settings.max_discs),
            params: settings.params.clone(),
            viewport: Viewport::new(settings.surface()),
            forces: ForceModel::new(settings.calibration),
            candidates: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            seed: settings.seed,
            initial_discs: settings.initial_discs,
            frame: 0,
        };
        sim.seed_discs();
        sim
    }

    /// Start over with new parameters: fresh discs, 1:1 viewport, same seed
    pub fn reset(&mut self, params: SimParams) {
        self.params = params;
        self.store.clear();
        self.candidates.clear();
        self.viewport.reset();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.frame = 0;
        self.seed_discs();
        log::info!("Simulation reset: {}", self.status_label());
    }

    fn seed_discs(&mut self) {
        for _ in 0..self.initial_discs {
            self.spawn_random();
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn live_count(&self) -> usize {
        self.store.live_count()
    }

    /// Add a fully specified disc (no-op at capacity)
    pub fn spawn(&mut self, disc: Disc) -> Option<DiscId> {
        self.store.spawn(disc)
    }

    /// Random disc at a simulation-space position
    pub fn spawn_at(&mut self, pos: Vec2) -> Option<DiscId> {
        let disc = Disc::random_at(pos, &mut self.rng);
        self.store.spawn(disc)
    }

    /// Random disc under a render-surface point
    pub fn spawn_at_screen(&mut self, screen: Vec2) -> Option<DiscId> {
        let pos = self.viewport.to_sim(screen);
        self.spawn_at(pos)
    }

    /// Random disc anywhere inside the viewport
    pub fn spawn_random(&mut self) -> Option<DiscId> {
        let (min, max) = (self.viewport.min, self.viewport.max);
        let x = random_between(&mut self.rng, min.x, max.x);
        let y = random_between(&mut self.rng, min.y, max.y);
        self.spawn_at(Vec2::new(x, y))
    }

    /// Set gravity from a raw accelerometer reading
    pub fn update_tilt(&mut self, raw: [i16; 3]) {
        self.params.gravity = self.forces.gravity_from_tilt(raw);
    }

    /// Advance one frame: integrate, collide, then merge and compact
    pub fn step_frame(&mut self) -> FrameStats {
        let ctx = PassContext {
            params: &self.params,
            accel: self.forces.acceleration(&self.params),
            dampening: self.forces.dampening(&self.params),
            min: self.viewport.min,
            max: self.viewport.max,
        };
        let pass = resolve_pass(self.store.as_mut_slice(), &ctx, &mut self.candidates);

        let merges = if self.params.merging() {
            consolidate(&mut self.store, &mut self.candidates, self.params.mass_weighted)
        } else {
            self.candidates.clear();
            0
        };

        self.frame += 1;
        let stats = FrameStats {
            frame: self.frame,
            impulses: pass.impulses,
            merges,
            wall_hits: pass.wall_hits,
            live: self.store.live_count(),
        };
        log::trace!("{stats:?}");
        stats
    }

    /// Visit every live disc mapped into render-surface pixels
    pub fn for_each_renderable_disc(&self, mut f: impl FnMut(ScreenDisc)) {
        self.store.for_each_live(|_, disc| f(self.viewport.to_screen(disc)));
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(self.store.iter_live().map(|d| d.pos))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(self.store.iter_live().map(|d| d.pos))
    }

    pub fn status_label(&self) -> String {
        self.params.status_label(self.store.live_count())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.params.mode = mode;
    }

    pub fn set_force_power(&mut self, force_power: f32) {
        self.params.force_power = force_power;
    }

    pub fn set_mass_weighted(&mut self, mass_weighted: bool) {
        self.params.mass_weighted = mass_weighted;
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.params.gravity_enabled = enabled;
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.params.gravity = gravity;
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.params.friction = friction;
    }

    pub fn set_merge_enabled(&mut self, enabled: bool) {
        self.params.merge_enabled = enabled;
    }
}

/// Uniform in `lo..hi`, or `lo` when that range is empty or unbounded
fn random_between(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
