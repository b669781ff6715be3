// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broad-phase candidate pair search
//!
//! A broad phase only proposes pairs; the detector confirms every candidate
//! with the exact per-pair test. Contract for all implementations:
//! - Pair identity is `(i, j)` with `i < j` (indices into the input slice).
//! - The emitted list is sorted ascending by `(i, j)`.
//! - Overlap is inclusive on faces, so the candidate set is a superset of
//!   the boundary-exclusive clash set.

use crate::BoundingVolume;
use crate::BroadPhaseKind;

/// Candidate pair generator
pub trait BroadPhase: Send + Sync {
    /// Canonical, sorted candidate pairs for `volumes`
    fn candidate_pairs(&self, volumes: &[BoundingVolume]) -> Vec<(usize, usize)>;
}

/// Every unordered pair, in `(i, j)` order
#[derive(Clone, Copy, Debug, Default)]
pub struct AllPairs;

impl BroadPhase for AllPairs {
    fn candidate_pairs(&self, volumes: &[BoundingVolume]) -> Vec<(usize, usize)> {
        let n = volumes.len();
        let mut out = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                out.push((i, j));
            }
        }
        out
    }
}

/// Sort-and-sweep along the x axis
///
/// Volumes are ordered by `min.x` (index as tie-break). Sweeping that order,
/// each volume is tested against the still-open intervals; an interval closes
/// once its `max.x` falls strictly below the current `min.x`. Y/Z overlap is
/// checked inclusively before a pair is emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepAndPrune;

impl BroadPhase for SweepAndPrune {
    fn candidate_pairs(&self, volumes: &[BoundingVolume]) -> Vec<(usize, usize)> {
        let mut order: Vec<usize> = (0..volumes.len()).collect();
        order.sort_by(|&a, &b| {
            volumes[a]
                .min()
                .x
                .total_cmp(&volumes[b].min().x)
                .then(a.cmp(&b))
        });

        let mut active: Vec<usize> = Vec::new();
        let mut out = Vec::new();
        for &current in &order {
            let vol = &volumes[current];
            active.retain(|&open| volumes[open].max().x >= vol.min().x);
            for &open in &active {
                if overlaps_yz(&volumes[open], vol) {
                    out.push((open.min(current), open.max(current)));
                }
            }
            active.push(current);
        }
        out.sort_unstable();
        out
    }
}

fn overlaps_yz(a: &BoundingVolume, b: &BoundingVolume) -> bool {
    (1..3).all(|axis| a.max()[axis] >= b.min()[axis] && b.max()[axis] >= a.min()[axis])
}

/// Boxed broad phase for a configured kind
pub fn broad_phase_for(kind: BroadPhaseKind) -> Box<dyn BroadPhase> {
    match kind {
        BroadPhaseKind::AllPairs => Box::new(AllPairs),
        BroadPhaseKind::SweepAndPrune => Box::new(SweepAndPrune),
    }
}
