//! Per-agent fog-of-war: a monotone revealed-tile bitmap plus a
//! cone+Bresenham-LOS reveal algorithm.
//!
//! The map is held as `Arc<Map>` rather than a private copy, since many
//! agents share one immutable map and cloning the grid per agent would be
//! wasteful.

use std::sync::Arc;

use crate::graph::Graph;
use crate::map::Map;

/// A fog-of-war companion of an immutable [`Map`].
///
/// Each agent owns exactly one `MapView`, with no shared mutable state
/// between agents. `revealed` only ever flips `false -> true`.
#[derive(Clone, Debug)]
pub struct MapView {
    map: Arc<Map>,
    width: u32,
    height: u32,
    revealed: Vec<bool>,
}

impl MapView {
    pub fn new(map: Arc<Map>) -> Self {
        let width = map.width();
        let height = map.height();
        let n = (width * height) as usize;
        Self {
            map,
            width,
            height,
            revealed: vec![false; n],
        }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (x as u32 * self.height + y as u32) as usize
    }

    /// Out-of-bounds queries return `true`.
    #[inline]
    pub fn is_revealed(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.revealed[self.idx(x, y)]
    }

    /// Ground-truth wall lookup, delegated to the owning [`Map`].
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.map.is_wall(x, y)
    }

    #[inline]
    pub fn map(&self) -> &Map {
        &self.map
    }

    fn set_revealed(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let i = self.idx(x, y);
            self.revealed[i] = true;
        }
    }

    /// Number of revealed tiles, used by tests to assert `revealed` grows
    /// monotonically over a run.
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|&&r| r).count()
    }

    /// Reveal every cell within `radius` of `(x0, y0)`, inside the
    /// `view_angle`-degree cone centered on `heading`, with line of sight
    /// unbroken by walls.
    ///
    /// `in_tower` is accepted for call-site symmetry with the original
    /// `_reveal_visible(..., in_tower)` signature; towers narrow `view_angle`
    /// and swap in `tower_view_range` at the call site (`sv-agent`), so the
    /// reveal math itself does not need to branch on it.
    pub fn reveal_visible(
        &mut self,
        x0: i32,
        y0: i32,
        radius: f32,
        view_angle: f32,
        heading: f32,
        _in_tower: bool,
    ) {
        if radius < 0.0 {
            return;
        }
        let r_ceil = radius.ceil() as i32 + 1;
        let r2 = radius * radius;
        let half_angle = view_angle / 2.0;

        for dx in -r_ceil..=r_ceil {
            for dy in -r_ceil..=r_ceil {
                let x = x0 + dx;
                let y = y0 + dy;
                if !self.map.in_bounds(x, y) {
                    continue;
                }
                let fdx = dx as f32;
                let fdy = dy as f32;
                if fdx * fdx + fdy * fdy > r2 {
                    continue;
                }

                let raw_angle = ((y0 - y) as f32).atan2((x0 - x) as f32).to_degrees();
                let rel = sv_core::position::normalize_deg(raw_angle + heading + 90.0);
                if rel.abs() > half_angle {
                    continue;
                }

                if !self.has_los(x0, y0, x, y) {
                    continue;
                }

                self.set_revealed(x, y);
            }
        }
    }

    /// Bresenham line of sight from `(x0, y0)` to `(x1, y1)`: fails if any
    /// *intermediate* cell is a wall. The destination itself is always
    /// considered visible, even if it is a wall (so walls become revealed
    /// once seen).
    ///
    /// Ground-truth: checks the owning [`Map`] directly and ignores
    /// `revealed`, so it doubles as the capture-check LOS test as well as
    /// the reveal algorithm's own internal use.
    pub fn has_los(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let path = bresenham_line(x0, y0, x1, y1);
        if path.len() <= 2 {
            return true;
        }
        path[1..path.len() - 1]
            .iter()
            .all(|&(x, y)| !self.map.is_wall(x, y))
    }

}

/// Bresenham's line algorithm; returns the full path including both
/// endpoints, in order from `(x0, y0)` to `(x1, y1)`.
fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

impl Graph for MapView {
    /// The four axis-aligned neighbors that are passable, plus the four
    /// diagonals — each diagonal only if *both* adjacent axis-aligned
    /// neighbors are passable (no corner cutting).
    fn neighbors(&self, node: (i32, i32)) -> Vec<(i32, i32)> {
        let (x, y) = node;
        let axis = [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)];
        let mut axis_ok = [false; 4];
        let mut out = Vec::with_capacity(8);
        for (i, &n) in axis.iter().enumerate() {
            if self.passable(n) {
                axis_ok[i] = true;
                out.push(n);
            }
        }

        let diagonals = [
            ((x + 1, y + 1), axis_ok[0] && axis_ok[2]),
            ((x + 1, y - 1), axis_ok[0] && axis_ok[3]),
            ((x - 1, y + 1), axis_ok[1] && axis_ok[2]),
            ((x - 1, y - 1), axis_ok[1] && axis_ok[3]),
        ];
        for (n, corner_clear) in diagonals {
            if corner_clear && self.passable(n) {
                out.push(n);
            }
        }
        out
    }

    fn cost(&self, from: (i32, i32), to: (i32, i32)) -> f32 {
        let dx = (to.0 - from.0).abs();
        let dy = (to.1 - from.1).abs();
        if dx == 1 && dy == 1 {
            std::f32::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// In bounds and not a *known* wall. Unrevealed cells are treated as
    /// passable ("hoped for") since a path that hasn't been seen yet might
    /// still be open.
    fn passable(&self, node: (i32, i32)) -> bool {
        let (x, y) = node;
        if !self.map.in_bounds(x, y) {
            return false;
        }
        !(self.is_revealed(x, y) && self.map.is_wall(x, y))
    }
}
