//! Disc-disc collision detection and response
//!
//! Each frame makes a single asymmetric pass: disc `i` is integrated and
//! then checked against every earlier disc `j < i`, which has already moved
//! this frame. Every pair is visited exactly once, with one side post-update
//! and the other current. This ordering is part of the observable behaviour
//! and must not be turned into a symmetric two-pass scheme.
//!
//! Impulses act on each axis independently (the push is the raw separation
//! vector, not a unit normal), and the pair's summed speed is renormalized
//! afterwards so the system neither gains nor loses energy from the push.

use glam::Vec2;

use super::disc::Disc;
use super::merge::MergeCandidate;
use super::params::{Mode, SimParams};
use crate::consts::*;

/// What a pair of discs does to each other this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// No velocity change (coincident centres, passing through, or out of range)
    None,
    /// Push applied as `this -= push * k_other`, `other += push * k_this`
    Push(Vec2),
    /// Deep overlap with merging on: consolidate after the pass
    Merge,
}

/// Decide how `this` (already integrated) interacts with an earlier `other`
pub fn interaction(this: &Disc, other: &Disc, params: &SimParams) -> Interaction {
    let sep = other.pos - this.pos;
    let dist = sep.length();

    // Coincident centres have no direction
    if dist == 0.0 || !dist.is_finite() {
        return Interaction::None;
    }

    let radius_sum = this.radius + other.radius;
    if dist < radius_sum {
        // In force mode overlapping discs pass through each other unless the
        // centres get really close; forces at that range just glue them together.
        if params.mode == Mode::Bounce || dist < radius_sum / ANTI_STICK_DIVISOR {
            if params.merging() {
                Interaction::Merge
            } else {
                Interaction::Push(sep)
            }
        } else {
            Interaction::None
        }
    } else {
        match params.mode {
            Mode::Force => {
                // Inverse square law, sign of force_power picks attract/repel
                let force = params.force_power / (dist * dist);
                Interaction::Push(sep * (force / dist))
            }
            Mode::Bounce => Interaction::None,
        }
    }
}

/// Apply an equal and opposite push, then rescale both velocities so the
/// summed speed of the pair is unchanged.
///
/// The rescale is skipped when either speed sum is zero: starting from rest
/// the raw push is kept, and a push that cancels both velocities is left alone.
pub fn apply_impulse(this: &mut Disc, other: &mut Disc, push: Vec2, mass_weighted: bool) {
    let pre_power = this.speed() + other.speed();

    let (k_this, k_other) = if mass_weighted {
        (this.radius, other.radius)
    } else {
        (FIXED_IMPULSE_SCALE, FIXED_IMPULSE_SCALE)
    };
    this.vel -= push * k_other;
    other.vel += push * k_this;

    let post_power = this.speed() + other.speed();
    if pre_power > f32::EPSILON && post_power > f32::EPSILON {
        let scale = pre_power / post_power;
        this.vel *= scale;
        other.vel *= scale;
    }
}

/// Hard reflection off the viewport edges. Returns true if any edge was hit.
pub fn reflect_at_bounds(disc: &mut Disc, min: Vec2, max: Vec2) -> bool {
    let mut hit = false;
    let r = disc.radius;

    if disc.pos.x - r < min.x {
        disc.vel.x = -disc.vel.x;
        disc.pos.x = min.x + r;
        hit = true;
    }
    if disc.pos.x + r >= max.x {
        disc.vel.x = -disc.vel.x;
        disc.pos.x = max.x - r;
        hit = true;
    }
    if disc.pos.y - r < min.y {
        disc.vel.y = -disc.vel.y;
        disc.pos.y = min.y + r;
        hit = true;
    }
    if disc.pos.y + r >= max.y {
        disc.vel.y = -disc.vel.y;
        disc.pos.y = max.y - r;
        hit = true;
    }
    hit
}

/// Inputs shared by every disc during one pass
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub params: &'a SimParams,
    pub accel: Vec2,
    pub dampening: f32,
    pub min: Vec2,
    pub max: Vec2,
}

/// Counters from one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pairs that exchanged a push
    pub impulses: usize,
    /// Pairs recorded for merging
    pub merge_candidates: usize,
    /// Discs reflected off an edge
    pub wall_hits: usize,
}

/// Integrate and resolve every live disc once, in store order.
///
/// Merge candidates are appended to `candidates`; the store is never
/// resized here.
pub fn resolve_pass(
    discs: &mut [Disc],
    ctx: &PassContext,
    candidates: &mut Vec<MergeCandidate>,
) -> PassStats {
    let mut stats = PassStats::default();

    for i in 0..discs.len() {
        let (earlier, rest) = discs.split_at_mut(i);
        let this = &mut rest[0];
        if !this.is_live() {
            continue;
        }

        this.vel += ctx.accel;
        this.vel *= ctx.dampening;
        this.pos += this.vel;

        for (j, other) in earlier.iter_mut().enumerate() {
            if !other.is_live() {
                continue;
            }
            match interaction(this, other, ctx.params) {
                Interaction::None => {}
                Interaction::Push(push) => {
                    apply_impulse(this, other, push, ctx.params.mass_weighted);
                    stats.impulses += 1;
                }
                Interaction::Merge => {
                    candidates.push(MergeCandidate { keep: i, absorb: j });
                    stats.merge_candidates += 1;
                }
            }
        }

        if reflect_at_bounds(this, ctx.min, ctx.max) {
            stats.wall_hits += 1;
        }
    }

    stats
}
