//! Merge consolidation
//!
//! Candidates are collected during the collision pass and applied here
//! afterwards, so no disc moves while indices are still being handed out.
//! Absorbed discs are tombstoned (radius 0) and only compacted once every
//! candidate has been processed.

use super::disc::{Disc, DiscId, DiscStore};

/// A pair of store indices to combine; `absorb` is folded into `keep`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    pub keep: DiscId,
    pub absorb: DiscId,
}

/// Combine two discs into one at their midpoint.
///
/// Area is conserved: r = sqrt(r_a² + r_b²). Velocity is the radius-weighted
/// average when mass-weighted, otherwise the plain sum.
pub fn merge_discs(keep: &Disc, absorb: &Disc, mass_weighted: bool) -> Disc {
    let vel = if mass_weighted {
        (keep.vel * keep.radius + absorb.vel * absorb.radius) / (keep.radius + absorb.radius)
    } else {
        keep.vel + absorb.vel
    };

    Disc {
        pos: (keep.pos + absorb.pos) / 2.0,
        vel,
        radius: (keep.radius.powi(2) + absorb.radius.powi(2)).sqrt(),
        color: keep.color,
    }
}

/// Apply all candidates in recorded order, then compact the store.
///
/// After each merge, later candidates that name the absorbed disc are
/// redirected to the survivor. Candidates that end up pointing at a single
/// disc, or at a tombstone, are dropped. Returns the number of merges made.
pub fn consolidate(
    store: &mut DiscStore,
    candidates: &mut Vec<MergeCandidate>,
    mass_weighted: bool,
) -> usize {
    if candidates.is_empty() {
        return 0;
    }

    let discs = store.as_mut_slice();
    let mut merges = 0;

    for n in 0..candidates.len() {
        let MergeCandidate { keep, absorb } = candidates[n];
        if keep == absorb || keep >= discs.len() || absorb >= discs.len() {
            continue;
        }
        if !discs[keep].is_live() || !discs[absorb].is_live() {
            continue;
        }

        discs[keep] = merge_discs(&discs[keep], &discs[absorb], mass_weighted);
        discs[absorb].radius = 0.0;
        merges += 1;
        log::debug!(
            "Merged disc {} into {} (r={:.1}), {} candidates",
            absorb,
            keep,
            discs[keep].radius,
            candidates.len()
        );

        for later in &mut candidates[n + 1..] {
            if later.keep == absorb {
                later.keep = keep;
            }
            if later.absorb == absorb {
                later.absorb = keep;
            }
        }
    }

    candidates.clear();
    store.remove_dead();
    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::disc::DiscColor;
    use glam::Vec2;
    use proptest::prelude::*;

    fn disc(x: f32, r: f32, vx: f32) -> Disc {
        Disc::new(Vec2::new(x, 0.0), Vec2::new(vx, 0.0), r, DiscColor::default())
    }

    fn store_of(discs: &[Disc]) -> DiscStore {
        let mut store = DiscStore::new(16);
        for d in discs {
            store.spawn(d.clone());
        }
        store
    }

    #[test]
    fn test_merge_discs_mass_weighted() {
        let a = disc(0.0, 3.0, 4.0);
        let b = disc(10.0, 1.0, -4.0);
        let m = merge_discs(&a, &b, true);
        assert_eq!(m.pos, Vec2::new(5.0, 0.0));
        assert!((m.vel.x - 2.0).abs() < 1e-6);
        assert!((m.radius - 10.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_merge_discs_sums_velocity() {
        let a = disc(0.0, 3.0, 4.0);
        let b = disc(10.0, 1.0, -1.0);
        let m = merge_discs(&a, &b, false);
        assert_eq!(m.vel.x, 3.0);
    }

    #[test]
    fn test_single_merge() {
        let mut store = store_of(&[disc(0.0, 3.0, 0.0), disc(1.0, 4.0, 0.0)]);
        let mut candidates = vec![MergeCandidate { keep: 1, absorb: 0 }];

        assert_eq!(consolidate(&mut store, &mut candidates, true), 1);
        assert!(candidates.is_empty());
        assert_eq!(store.live_count(), 1);
        let survivor = store.iter_live().next().unwrap();
        assert!((survivor.radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_chained_merges_rewrite_indices() {
        let mut store = store_of(&[disc(0.0, 3.0, 0.0), disc(1.0, 4.0, 0.0), disc(2.0, 12.0, 0.0)]);
        let mut candidates = vec![
            MergeCandidate { keep: 1, absorb: 0 },
            MergeCandidate { keep: 2, absorb: 0 },
            MergeCandidate { keep: 2, absorb: 1 },
        ];

        // The third candidate collapses onto disc 2 and is skipped
        assert_eq!(consolidate(&mut store, &mut candidates, true), 2);
        assert_eq!(store.live_count(), 1);
        let survivor = store.iter_live().next().unwrap();
        assert!((survivor.radius - 13.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_candidates_is_noop() {
        let mut store = store_of(&[disc(0.0, 3.0, 0.0)]);
        assert_eq!(consolidate(&mut store, &mut Vec::new(), true), 0);
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_stale_candidate_is_ignored() {
        let mut store = store_of(&[disc(0.0, 3.0, 0.0)]);
        let mut candidates = vec![MergeCandidate { keep: 0, absorb: 5 }];
        assert_eq!(consolidate(&mut store, &mut candidates, true), 0);
        assert_eq!(store.live_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_single_merge_conserves_area(
            radii in prop::collection::vec(1.0f32..40.0, 2..8),
            pick in any::<prop::sample::Index>(),
            mass in any::<bool>(),
        ) {
            let discs: Vec<Disc> = radii.iter().enumerate().map(|(i, &r)| disc(i as f32, r, 1.0)).collect();
            let mut store = store_of(&discs);
            let absorb = pick.index(discs.len() - 1);
            let keep = discs.len() - 1;
            let mut candidates = vec![MergeCandidate { keep, absorb }];

            prop_assert_eq!(consolidate(&mut store, &mut candidates, mass), 1);
            prop_assert_eq!(store.live_count(), discs.len() - 1);

            let expected = radii[keep].powi(2) + radii[absorb].powi(2);
            let merged = store.iter_live().last().unwrap();
            prop_assert!((merged.radius.powi(2) - expected).abs() <= expected * 1e-4);
        }
    }
}
