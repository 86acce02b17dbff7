//! Minimum-spanning-tree properties, checked against brute force on small
//! fixtures.

use hashart::pieces::network::minimum_spanning_tree;

fn weight(points: &[(i64, i64)], edges: &[(usize, usize)]) -> i64 {
    edges
        .iter()
        .map(|&(i, j)| {
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            dx * dx + dy * dy
        })
        .sum()
}

/// Is the edge set a spanning tree over `n` vertices?
fn spans(n: usize, edges: &[(usize, usize)]) -> bool {
    if edges.len() + 1 != n {
        return false;
    }
    let mut reached = vec![false; n];
    reached[0] = true;
    // n passes of relaxation are plenty for n vertices.
    for _ in 0..n {
        for &(i, j) in edges {
            if reached[i] || reached[j] {
                reached[i] = true;
                reached[j] = true;
            }
        }
    }
    reached.iter().all(|&r| r)
}

/// Minimum spanning-tree weight by enumerating every edge subset.
fn brute_force_weight(points: &[(i64, i64)]) -> i64 {
    let n = points.len();
    let mut all_edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            all_edges.push((i, j));
        }
    }

    let mut best = i64::MAX;
    for mask in 0u32..(1 << all_edges.len()) {
        if mask.count_ones() as usize != n - 1 {
            continue;
        }
        let subset: Vec<(usize, usize)> = all_edges
            .iter()
            .enumerate()
            .filter(|(k, _)| mask & (1 << k) != 0)
            .map(|(_, &e)| e)
            .collect();
        if spans(n, &subset) {
            best = best.min(weight(points, &subset));
        }
    }
    best
}

#[test]
fn kruskal_matches_brute_force_on_small_sets() {
    let fixtures: Vec<Vec<(i64, i64)>> = vec![
        vec![(0, 0), (4, 0), (0, 3)],
        vec![(0, 0), (10, 10), (10, 0), (0, 10)],
        vec![(1, 1), (2, 8), (9, 3), (4, 4), (7, 7)],
        vec![(0, 0), (255, 255), (128, 0), (0, 128), (200, 50), (50, 200)],
    ];

    for points in fixtures {
        let tree = minimum_spanning_tree(&points);
        assert_eq!(tree.len(), points.len() - 1);
        assert!(spans(points.len(), &tree), "not a spanning tree");
        assert_eq!(weight(&points, &tree), brute_force_weight(&points));
    }
}

#[test]
fn tree_has_no_cycle() {
    // V-1 edges that span V vertices cannot contain a cycle, so spanning
    // plus the edge count is the whole acyclicity check.
    let points = vec![(3, 1), (1, 4), (6, 2), (8, 8), (2, 2), (5, 9)];
    let tree = minimum_spanning_tree(&points);
    assert_eq!(tree.len(), 5);
    assert!(spans(points.len(), &tree));
}

#[test]
fn determinism_across_calls() {
    let points = vec![(0, 0), (5, 5), (5, 0), (0, 5), (3, 3)];
    assert_eq!(
        minimum_spanning_tree(&points),
        minimum_spanning_tree(&points)
    );
}

#[test]
fn zero_weight_edges_come_first() {
    let points = vec![(7, 7), (7, 7), (7, 7), (100, 100)];
    let tree = minimum_spanning_tree(&points);
    assert_eq!(tree.len(), 3);
    assert_eq!(weight(&points, &tree[..2]), 0);
}
