//! Uniform-grid bucket index over path segments.
//!
//! Each segment is registered in every cell its bounding box touches. A query
//! walks square rings of cells outward from the query cell and stops once the
//! best distance found is no larger than the ring's guaranteed clearance, so
//! the answer always equals the exhaustive scan.

use super::geometry::{nearest_segment_linear, point_segment_distance};
use crate::sim::Float2;

#[derive(Debug, Clone)]
pub struct SegmentGrid {
    origin: Float2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<u32>>,
}

impl SegmentGrid {
    /// Buckets the segments of `path`. `cell_size` is clamped to a small positive minimum.
    pub fn build(path: &[Float2], cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(1e-3)
        } else {
            1.0
        };

        let (min, max) = bounds(path);
        let cols = ((max.x - min.x) / cell_size).floor() as usize + 1;
        let rows = ((max.y - min.y) / cell_size).floor() as usize + 1;
        let mut grid = Self {
            origin: min,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        };

        for (i, pair) in path.windows(2).enumerate() {
            let (c0, r0) = grid.clamped_cell(Float2::new(
                pair[0].x.min(pair[1].x),
                pair[0].y.min(pair[1].y),
            ));
            let (c1, r1) = grid.clamped_cell(Float2::new(
                pair[0].x.max(pair[1].x),
                pair[0].y.max(pair[1].y),
            ));
            for r in r0..=r1 {
                for c in c0..=c1 {
                    grid.cells[r * cols + c].push(i as u32);
                }
            }
        }

        grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Nearest segment to `p`: `(segment index, distance)`.
    ///
    /// `path` must be the slice the grid was built from.
    pub fn nearest(&self, path: &[Float2], p: Float2) -> Option<(usize, f32)> {
        if path.len() < 2 {
            return None;
        }
        if !p.is_finite() {
            return nearest_segment_linear(path, p);
        }

        let fc = ((p.x - self.origin.x) / self.cell_size).floor();
        let fr = ((p.y - self.origin.y) / self.cell_size).floor();
        let cols = self.cols as i64;
        let rows = self.rows as i64;

        // Far outside the grid every ring is mostly empty; a flat scan is cheaper.
        let reach = (cols.max(rows) * 2) as f32;
        if fc < -reach || fr < -reach || fc > cols as f32 + reach || fr > rows as f32 + reach {
            return nearest_segment_linear(path, p);
        }
        let qc = fc as i64;
        let qr = fr as i64;

        // Ring at which every cell of the grid has been visited.
        let max_ring = qc.abs().max((cols - 1 - qc).abs()).max(qr.abs()).max((rows - 1 - qr).abs());

        let mut best: Option<(usize, f32)> = None;
        for ring in 0..=max_ring {
            for r in (qr - ring).max(0)..=(qr + ring).min(rows - 1) {
                let edge_row = r == qr - ring || r == qr + ring;
                if edge_row {
                    for c in (qc - ring).max(0)..=(qc + ring).min(cols - 1) {
                        self.scan_cell(path, p, c as usize, r as usize, &mut best);
                    }
                } else {
                    for c in [qc - ring, qc + ring] {
                        if (0..cols).contains(&c) {
                            self.scan_cell(path, p, c as usize, r as usize, &mut best);
                        }
                    }
                }
            }

            // Unvisited segments lie outside the (2 * ring + 1) cell square around `p`.
            if let Some((_, d)) = best {
                if d <= ring as f32 * self.cell_size {
                    break;
                }
            }
        }

        best
    }

    fn scan_cell(
        &self,
        path: &[Float2],
        p: Float2,
        c: usize,
        r: usize,
        best: &mut Option<(usize, f32)>,
    ) {
        for &seg in &self.cells[r * self.cols + c] {
            let seg = seg as usize;
            let d = point_segment_distance(p, path[seg], path[seg + 1]);
            match *best {
                Some((best_seg, best_d)) if d > best_d || (d == best_d && seg >= best_seg) => {}
                _ => *best = Some((seg, d)),
            }
        }
    }

    fn clamped_cell(&self, p: Float2) -> (usize, usize) {
        let c = ((p.x - self.origin.x) / self.cell_size).floor().max(0.0) as usize;
        let r = ((p.y - self.origin.y) / self.cell_size).floor().max(0.0) as usize;
        (c.min(self.cols - 1), r.min(self.rows - 1))
    }
}

fn bounds(path: &[Float2]) -> (Float2, Float2) {
    let mut min = Float2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Float2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in path {
        min = Float2::new(min.x.min(p.x), min.y.min(p.y));
        max = Float2::new(max.x.max(p.x), max.y.max(p.y));
    }
    if path.is_empty() {
        return (Float2::ZERO, Float2::ZERO);
    }
    (min, max)
}
