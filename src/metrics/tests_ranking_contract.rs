// Ranking metric contract: bounds, monotonicity and a worked example.

use crate::metrics::ranking::*;
use std::collections::HashSet;

fn set(items: &[usize]) -> HashSet<usize> {
    items.iter().copied().collect()
}

/// FALSIFY-RK-001: HR@K is binary
#[test]
fn falsify_rk_001_hit_rate_binary() {
    let recs = vec![5, 3, 1, 4, 2];
    for k in 0..=6 {
        let h = hit_rate_at_k(&recs, &set(&[1]), k);
        assert!(
            h == 0.0 || h == 1.0,
            "FALSIFIED RK-001: hit_rate_at_k={h} for k={k}, expected 0.0 or 1.0"
        );
    }
}

/// FALSIFY-RK-002: HR@K and recall@K are monotone non-decreasing in K
#[test]
fn falsify_rk_002_monotone_in_k() {
    let recs = vec![5, 3, 1, 4, 2];
    let relevant = set(&[1, 2, 8]);
    let mut prev_hit = 0.0;
    let mut prev_recall = 0.0;
    for k in 1..=5 {
        let h = hit_rate_at_k(&recs, &relevant, k);
        let r = recall_at_k(&recs, &relevant, k).expect("defined");
        assert!(h >= prev_hit, "FALSIFIED RK-002: HR fell to {h} at k={k}");
        assert!(r >= prev_recall, "FALSIFIED RK-002: recall fell to {r} at k={k}");
        prev_hit = h;
        prev_recall = r;
    }
}

/// FALSIFY-RK-003: nDCG, recall, ideal recall and nRecall lie in [0, 1]
#[test]
fn falsify_rk_003_bounded() {
    let lists: [&[usize]; 6] = [
        &[1, 2, 3],
        &[9, 8, 7, 1],
        &[4],
        &[2, 9, 1, 6, 3],
        &[1, 1],
        &[2, 2, 9, 2, 3],
    ];
    let relevant = set(&[1, 2, 3, 4]);
    for recs in lists {
        for k in 1..=5 {
            for v in [
                ndcg_at_k(recs, &relevant, k),
                recall_at_k(recs, &relevant, k),
                ideal_recall_at_k(recs, &relevant, k),
                normalized_recall_at_k(recs, &relevant, k),
            ]
            .into_iter()
            .flatten()
            {
                assert!(
                    (0.0..=1.0 + 1e-12).contains(&v),
                    "FALSIFIED RK-003: metric={v} for recs={recs:?} k={k}"
                );
            }
        }
    }
}

/// FALSIFY-RK-004: recall never exceeds ideal recall
#[test]
fn falsify_rk_004_recall_le_ideal() {
    let relevant = set(&[0, 1, 2, 3, 4, 5]);
    for recs in [vec![0, 1], vec![7, 8, 9], vec![5, 4, 3, 2, 1, 0]] {
        for k in 1..=6 {
            let r = recall_at_k(&recs, &relevant, k).expect("defined");
            let ideal = ideal_recall_at_k(&recs, &relevant, k).expect("defined");
            assert!(r <= ideal, "FALSIFIED RK-004: recall {r} > ideal {ideal}");
        }
    }
}

/// FALSIFY-RK-005: worked example, recs [B, C] against ground truth {B, D}
#[test]
fn falsify_rk_005_worked_example() {
    let (b, c, d) = (1, 2, 3);
    let recs = [b, c];
    let relevant = set(&[b, d]);

    assert_eq!(hit_rate_at_k(&recs, &relevant, 2), 1.0);
    assert_eq!(recall_at_k(&recs, &relevant, 2), Some(0.5));
    assert_eq!(ideal_recall_at_k(&recs, &relevant, 2), Some(1.0));
    assert_eq!(normalized_recall_at_k(&recs, &relevant, 2), Some(0.5));

    let expected = (1.0 / 2f64.log2()) / (1.0 / 2f64.log2() + 1.0 / 3f64.log2());
    let ndcg = ndcg_at_k(&recs, &relevant, 2).expect("defined");
    assert!(
        (ndcg - expected).abs() < 1e-12,
        "FALSIFIED RK-005: nDCG={ndcg}, expected {expected}"
    );
}

/// FALSIFY-RK-006: zero ideal recall leaves nRecall undefined
#[test]
fn falsify_rk_006_zero_ideal_undefined() {
    assert_eq!(normalized_recall_at_k::<usize>(&[], &set(&[1]), 10), None);
    assert_eq!(normalized_recall_at_k(&[1, 2], &set(&[1]), 0), None);
}
