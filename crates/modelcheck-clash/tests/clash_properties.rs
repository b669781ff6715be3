// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-based tests for bounding volumes, detection and reports
//!
//! Coordinates are drawn on a 10 mm grid so that face contact happens often
//! and exact float comparisons stay meaningful.

use modelcheck_clash::{
    BoundingVolume, BroadPhaseKind, ClashDetector, ClashElement, ClashReportBuilder,
    DetectorOptions,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn volume_strategy() -> impl Strategy<Value = BoundingVolume> {
    (
        (0i32..100, 0i32..100, 0i32..100),
        (0i32..40, 0i32..40, 0i32..40),
    )
        .prop_map(|((x, y, z), (dx, dy, dz))| {
            let (x, y, z) = (x as f64 * 10.0, y as f64 * 10.0, z as f64 * 10.0);
            BoundingVolume::from_extents(
                x,
                y,
                z,
                x + dx as f64 * 10.0,
                y + dy as f64 * 10.0,
                z + dz as f64 * 10.0,
            )
            .expect("generated bounds are ordered")
        })
}

fn elements_strategy() -> impl Strategy<Value = Vec<ClashElement>> {
    prop::collection::vec(volume_strategy(), 0..30).prop_map(|volumes| {
        volumes
            .into_iter()
            .enumerate()
            .map(|(i, v)| ClashElement::new(i as i64, v))
            .collect()
    })
}

// ============================================================================
// Bounding volume properties
// ============================================================================

proptest! {
    #[test]
    fn intersects_is_symmetric(a in volume_strategy(), b in volume_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn volume_zero_iff_disjoint(a in volume_strategy(), b in volume_strategy()) {
        let volume = a.intersection_volume(&b);
        if a.intersects(&b) {
            let expected: f64 = (0..3)
                .map(|i| a.max()[i].min(b.max()[i]) - a.min()[i].max(b.min()[i]))
                .product();
            prop_assert!(volume > 0.0);
            prop_assert_eq!(volume, expected);
        } else {
            prop_assert_eq!(volume, 0.0);
        }
    }

    #[test]
    fn face_contact_is_not_a_clash(a in volume_strategy(), axis in 0usize..3) {
        // Place b flush against a's max face on `axis`
        let mut min = a.min();
        let mut max = a.max();
        let extent = max[axis] - min[axis];
        min[axis] = a.max()[axis];
        max[axis] = a.max()[axis] + extent + 10.0;
        let b = BoundingVolume::new(min, max).expect("ordered");
        prop_assert!(!a.intersects(&b));
    }

    // ========================================================================
    // Detector / report properties
    // ========================================================================

    #[test]
    fn sweep_and_prune_matches_all_pairs(elements in elements_strategy()) {
        let mut naive = ClashDetector::with_options(
            DetectorOptions::default().with_broad_phase(BroadPhaseKind::AllPairs),
        );
        let mut sweep = ClashDetector::with_options(
            DetectorOptions::default().with_broad_phase(BroadPhaseKind::SweepAndPrune),
        );
        prop_assert_eq!(naive.check_all(&elements), sweep.check_all(&elements));
    }

    #[test]
    fn clash_matrix_is_symmetric(elements in elements_strategy()) {
        let mut detector = ClashDetector::new();
        let report = ClashReportBuilder::new("prop")
            .add_clashes(detector.check_all(&elements))
            .build();

        for (a, neighbors) in report.clash_matrix() {
            for b in neighbors {
                let forward = neighbors.iter().filter(|n| *n == b).count();
                let backward = report.clash_matrix()[b].iter().filter(|n| *n == a).count();
                prop_assert_eq!(forward, backward);
            }
        }
        let edge_total: usize = report.clash_matrix().values().map(Vec::len).sum();
        prop_assert_eq!(edge_total, 2 * report.clash_count());
    }

    #[test]
    fn document_survives_json(elements in elements_strategy()) {
        let mut detector = ClashDetector::new();
        let report = ClashReportBuilder::new("prop")
            .add_clashes(detector.check_all(&elements))
            .set_elements_checked(elements.len())
            .build();

        let json = report.to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        prop_assert_eq!(
            value["summary"]["total_clashes"].as_u64(),
            Some(report.clash_count() as u64)
        );
        prop_assert_eq!(
            value["clashes"].as_array().map(Vec::len),
            Some(report.clash_count())
        );
    }
}
