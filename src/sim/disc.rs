//! Disc entities and the bounded disc store
//!
//! Indices into the store are only stable between compactions: a merge pass
//! tombstones discs (radius 0) and `remove_dead` shifts the survivors down.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Index of a disc in the store, valid until the next `remove_dead`
pub type DiscId = usize;

/// Opaque colour token handed to the renderer (packed 0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscColor(pub u32);

impl DiscColor {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Random colour that is not too dark to see on a black background
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        loop {
            let r: u8 = rng.random_range(0..255);
            let g: u8 = rng.random_range(0..255);
            let b: u8 = rng.random_range(0..255);
            if r as u32 + g as u32 + b as u32 >= MIN_COLOR_BRIGHTNESS {
                return Self::from_rgb(r, g, b);
            }
        }
    }
}

/// A simulated disc
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Zero marks a tombstone awaiting `remove_dead`
    pub radius: f32,
    pub color: DiscColor,
}

impl Disc {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: DiscColor) -> Self {
        Self { pos, vel, radius, color }
    }

    /// Disc with random size, velocity and colour at `pos`
    pub fn random_at<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(MIN_SPAWN_RADIUS..MAX_SPAWN_RADIUS) as f32;
        let vel = Vec2::new(random_speed(rng), random_speed(rng));
        Self::new(pos, vel, radius, DiscColor::random(rng))
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.radius > 0.0
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Per-axis spawn speed in (-4, 4]
fn random_speed<R: Rng>(rng: &mut R) -> f32 {
    4.0 - rng.random_range(0..255u32) as f32 / 32.0
}

/// Bounded, insertion-ordered disc storage
#[derive(Debug, Clone)]
pub struct DiscStore {
    discs: Vec<Disc>,
    cap: usize,
}

impl DiscStore {
    pub fn new(cap: usize) -> Self {
        Self {
            discs: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Add a disc. Returns `None` without touching the store when the cap is
    /// reached, the disc has no positive radius, or its state is not finite.
    pub fn spawn(&mut self, disc: Disc) -> Option<DiscId> {
        if !disc.is_live() || !disc.radius.is_finite() {
            log::debug!("Ignoring spawn of disc with radius {}", disc.radius);
            return None;
        }
        if !(disc.pos.is_finite() && disc.vel.is_finite()) {
            log::debug!("Ignoring spawn of disc at {:?} moving {:?}", disc.pos, disc.vel);
            return None;
        }
        if self.live_count() >= self.cap {
            log::debug!("Disc cap {} reached, spawn ignored", self.cap);
            return None;
        }
        self.discs.push(disc);
        Some(self.discs.len() - 1)
    }

    pub fn live_count(&self) -> usize {
        self.discs.iter().filter(|d| d.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &Disc> {
        self.discs.iter().filter(|d| d.is_live())
    }

    pub fn for_each_live(&self, mut f: impl FnMut(DiscId, &Disc)) {
        for (id, disc) in self.discs.iter().enumerate() {
            if disc.is_live() {
                f(id, disc);
            }
        }
    }

    /// Physically drop tombstoned discs; survivors keep their relative order
    pub fn remove_dead(&mut self) -> usize {
        let before = self.discs.len();
        self.discs.retain(Disc::is_live);
        before - self.discs.len()
    }

    pub fn clear(&mut self) {
        self.discs.clear();
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Disc] {
        &mut self.discs
    }
}
