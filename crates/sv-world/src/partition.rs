//! Patrol-area partition: carve the map into a `kx * ky` grid of rectangles
//! and hand each patroller-tagged agent two opposite corners of its own
//! rectangle as a routing hint.

use sv_core::Position;

/// Two opposite corners of a patrol rectangle, inset by 1.5 units on every
/// side of its cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatrolArea {
    pub corner_a: Position,
    pub corner_b: Position,
}

/// Compute the `kx * ky` grid dimensions for `n` patrollers.
///
/// `kx = floor(sqrt(n))`, `ky = kx`; bumped to `kx + 1` when `kx^2 < n <=
/// kx * (kx + 1)`.
fn grid_dims(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let kx = (n as f64).sqrt().floor() as usize;
    let kx = kx.max(1);
    let ky = if kx * kx < n && n <= kx * (kx + 1) {
        kx + 1
    } else {
        kx
    };
    (kx, ky)
}

/// Partition a `width * height` map into `n` patrol rectangles, one per
/// patroller, assigned in row-major order (row by row, left to right within
/// a row).
///
/// Returns an empty vec for `n == 0`.
pub fn partition(n: usize, width: f32, height: f32) -> Vec<PatrolArea> {
    if n == 0 {
        return Vec::new();
    }
    let (kx, ky) = grid_dims(n);
    let cell_w = width / kx as f32;
    let cell_h = height / ky as f32;

    let mut areas = Vec::with_capacity(kx * ky);
    for row in 0..ky {
        for col in 0..kx {
            let x0 = col as f32 * cell_w;
            let y0 = row as f32 * cell_h;
            let x1 = x0 + cell_w;
            let y1 = y0 + cell_h;
            areas.push(PatrolArea {
                corner_a: Position::new(x0 + 1.5, y0 + 1.5),
                corner_b: Position::new(x1 - 1.5, y1 - 1.5),
            });
        }
    }
    areas.truncate(n);
    areas
}
