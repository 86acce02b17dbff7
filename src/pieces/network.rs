// src/pieces/network.rs
//! Twelve hash-derived points, fully connected, with their minimum
//! spanning tree drawn in bold.

use log::debug;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{project, scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

const NUM_POINTS: usize = 12;

/// Disjoint-set forest with path compression and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            // Path halving keeps the forest shallow.
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    /// Merge the sets holding `a` and `b`. Returns false if already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

/// Squared Euclidean distance. Monotonic in true distance, so it orders
/// edges identically without the square root.
fn weight(a: (i64, i64), b: (i64, i64)) -> i64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Kruskal's algorithm over the complete graph on `points`.
///
/// Returns MST edges as index pairs into `points`, exactly `V - 1` of them
/// for `V >= 1`. Ties in edge weight break by enumeration order (i, then j),
/// so identical inputs always produce identical trees. Duplicate points are
/// fine; their zero-weight edges sort first.
pub fn minimum_spanning_tree(points: &[(i64, i64)]) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            edges.push((i, j));
        }
    }
    // Stable sort: equal-weight edges keep enumeration order.
    edges.sort_by_key(|&(i, j)| weight(points[i], points[j]));

    let mut forest = UnionFind::new(points.len());
    let mut tree = Vec::with_capacity(points.len().saturating_sub(1));
    for (i, j) in edges {
        if forest.union(i, j) {
            tree.push((i, j));
            if tree.len() + 1 == points.len() {
                break;
            }
        }
    }
    tree
}

pub struct Network {
    template: ByteTemplate,
}

impl Network {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("x", 1),
            ("y", 1),
            ("others", (NUM_POINTS - 1) * 2),
        ])
        .expect("static template");
        Self { template }
    }

    fn points(fields: &Fields) -> Result<Vec<(i64, i64)>, ArtError> {
        let mut coords = Vec::with_capacity(NUM_POINTS * 2);
        coords.extend_from_slice(fields.bytes("x")?);
        coords.extend_from_slice(fields.bytes("y")?);
        coords.extend_from_slice(fields.bytes("others")?);

        Ok((0..NUM_POINTS)
            .map(|i| (coords[2 * i] as i64, coords[2 * i + 1] as i64))
            .collect())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Network {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(format!(
            "Read {NUM_POINTS} byte pairs from the digest as a series of \
             (x, y) points. Draw each point, connecting it to every other \
             point. Then determine the minimum spanning tree of the points \
             using Kruskal's algorithm, and draw its lines in bold."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width;
        let h = canvas.height;
        let points = Self::points(fields)?;

        // Padding around the unit square the points land in.
        let p = scale(120.0, w);
        let px = |v: i64| project(v as f64, 0.0, 256.0, p, w as f64 - p);
        let py = |v: i64| project(v as f64, 0.0, 256.0, p, h as f64 - p);

        // The full network, thin.
        let thin = scale(1.0, w).max(1.0);
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                canvas.stroke_line(
                    px(points[i].0),
                    py(points[i].1),
                    px(points[j].0),
                    py(points[j].1),
                    thin,
                    Rgb::BLACK,
                );
            }
        }

        // The minimum spanning tree, bold.
        let tree = minimum_spanning_tree(&points);
        debug!("mst has {} edges over {} points", tree.len(), points.len());
        let bold = scale(10.0, w);
        for (i, j) in tree {
            canvas.stroke_line(
                px(points[i].0),
                py(points[i].1),
                px(points[j].0),
                py(points[j].1),
                bold,
                Rgb::BLACK,
            );
        }

        // White discs with outlines on every node.
        let r = scale(15.0, w);
        for &(x, y) in &points {
            canvas.fill_circle(px(x), py(y), r, Rgb::WHITE);
            canvas.stroke_circle(px(x), py(y), r, thin, Rgb::BLACK);
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "22 May 2022",
            source: "network.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mst_edge_count() {
        let points = vec![(0, 0), (10, 0), (0, 10), (20, 20), (5, 5)];
        let tree = minimum_spanning_tree(&points);
        assert_eq!(tree.len(), points.len() - 1);
    }

    #[test]
    fn mst_single_point_is_empty() {
        assert!(minimum_spanning_tree(&[(3, 4)]).is_empty());
    }

    #[test]
    fn mst_handles_duplicate_points() {
        let points = vec![(1, 1), (1, 1), (9, 9)];
        let tree = minimum_spanning_tree(&points);
        assert_eq!(tree.len(), 2);
        // The zero-weight edge between the duplicates is taken first.
        assert_eq!(tree[0], (0, 1));
    }

    #[test]
    fn mst_picks_the_short_chain() {
        // Collinear points: the chain is the unique MST.
        let points = vec![(0, 0), (10, 0), (20, 0), (30, 0)];
        let mut tree = minimum_spanning_tree(&points);
        tree.sort();
        assert_eq!(tree, vec![(0, 1), (1, 2), (2, 3)]);
    }
}
