//! A*/Dijkstra search over a [`Graph`], plus the `find_path` convenience
//! used by agent strategies.
//!
//! The priority-queue shape follows the classic redblobgames.com treatment
//! of grid pathfinding; both searches share one frontier-walking `search`
//! function, parameterized only by the heuristic (zero for Dijkstra).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use sv_core::Position;

use crate::graph::Graph;

type Cell = (i32, i32);

/// Min-heap entry ordered by `(cost, tie_break)` ascending. `BinaryHeap` is a
/// max-heap, so `Ord` is reversed: the smallest `(cost, tie_break)` pair
/// compares greatest.
#[derive(Copy, Clone, PartialEq)]
struct HeapEntry {
    priority: (f32, f32),
    node: Cell,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest (f, h) pair first.
        other
            .priority
            .0
            .partial_cmp(&self.priority.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                other
                    .priority
                    .1
                    .partial_cmp(&self.priority.1)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Runs Dijkstra's algorithm from `start` and returns `(came_from, cost_so_far)`.
///
/// Search stops as soon as `goal` is popped off the frontier; unreached
/// cells are simply absent from both maps.
pub fn dijkstra_search<G: Graph>(
    graph: &G,
    start: Cell,
    goal: Cell,
) -> (HashMap<Cell, Cell>, HashMap<Cell, f32>) {
    search(graph, start, goal, |_goal, _next| 0.0)
}

/// Runs A* from `start` to `goal` using `heuristic(goal, next)` as the
/// estimated remaining cost, and returns `(came_from, cost_so_far)`.
pub fn a_star_search<G: Graph>(
    graph: &G,
    start: Cell,
    goal: Cell,
    heuristic: impl Fn(Cell, Cell) -> f32,
) -> (HashMap<Cell, Cell>, HashMap<Cell, f32>) {
    search(graph, start, goal, heuristic)
}

fn search<G: Graph>(
    graph: &G,
    start: Cell,
    goal: Cell,
    heuristic: impl Fn(Cell, Cell) -> f32,
) -> (HashMap<Cell, Cell>, HashMap<Cell, f32>) {
    let mut frontier = BinaryHeap::new();
    frontier.push(HeapEntry {
        priority: (0.0, 0.0),
        node: start,
    });

    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut cost_so_far: HashMap<Cell, f32> = HashMap::new();
    cost_so_far.insert(start, 0.0);

    while let Some(HeapEntry { node: current, .. }) = frontier.pop() {
        if current == goal {
            break;
        }

        let current_cost = cost_so_far[&current];
        for next in graph.neighbors(current) {
            let new_cost = current_cost + graph.cost(current, next);
            let better = match cost_so_far.get(&next) {
                Some(&existing) => new_cost < existing,
                None => true,
            };
            if better {
                cost_so_far.insert(next, new_cost);
                let h = heuristic(goal, next);
                came_from.insert(next, current);
                frontier.push(HeapEntry {
                    priority: (new_cost + h, h),
                    node: next,
                });
            }
        }
    }

    (came_from, cost_so_far)
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                current = prev;
                path.push(current);
            }
            None => return None,
        }
    }
    path.reverse();
    Some(path)
}

/// Manhattan+diagonal (octile) heuristic with `D = 1`, `D2 = sqrt(2)`.
fn octile_heuristic(goal: Cell, from: Cell) -> f32 {
    const D: f32 = 1.0;
    const D2: f32 = std::f32::consts::SQRT_2;
    let dx = (goal.0 - from.0).unsigned_abs() as f32;
    let dy = (goal.1 - from.1).unsigned_abs() as f32;
    D * (dx + dy) + (D2 - 2.0 * D) * dx.min(dy)
}

/// Maximum ring radius searched by [`nearest_passable`] before giving up.
/// Generous for any grid this simulator is expected to run on.
const MAX_SUBSTITUTE_RADIUS: i32 = 64;

/// Find the nearest passable cell to `cell` (by ascending Euclidean
/// distance), expanding outward ring by ring. Used to substitute an
/// impassable destination.
fn nearest_passable<G: Graph>(graph: &G, cell: Cell) -> Option<Cell> {
    for radius in 1..=MAX_SUBSTITUTE_RADIUS {
        let mut ring: Vec<Cell> = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx.abs().max(dy.abs()) != radius {
                    continue;
                }
                ring.push((cell.0 + dx, cell.1 + dy));
            }
        }
        ring.sort_by(|a, b| {
            let da = ((a.0 - cell.0).pow(2) + (a.1 - cell.1).pow(2)) as f32;
            let db = ((b.0 - cell.0).pow(2) + (b.1 - cell.1).pow(2)) as f32;
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
        if let Some(&found) = ring.iter().find(|&&c| graph.passable(c)) {
            return Some(found);
        }
    }
    None
}

/// Find a path from `from` to `to`, snapping both to integer cells.
///
/// - If `from == to` (after snapping), returns the singleton path.
/// - If `to` is not passable, substitutes its nearest passable neighbor.
/// - Otherwise runs A* with the octile heuristic, tie-broken by `(f, h)`.
/// - Returns `None` when no path exists.
///
/// The returned waypoints are cell centers (`x + 0.5, y + 0.5`).
pub fn find_path<G: Graph>(graph: &G, from: Position, to: Position) -> Option<Vec<Position>> {
    let start = (from.x.floor() as i32, from.y.floor() as i32);
    let mut goal = (to.x.floor() as i32, to.y.floor() as i32);

    if start == goal {
        return Some(vec![cell_center(start)]);
    }

    if !graph.passable(goal) {
        goal = nearest_passable(graph, goal)?;
        if start == goal {
            return Some(vec![cell_center(start)]);
        }
    }

    let (came_from, _cost) = a_star_search(graph, start, goal, octile_heuristic);
    reconstruct_path(&came_from, start, goal)
        .map(|cells| cells.into_iter().map(cell_center).collect())
}

#[inline]
fn cell_center(cell: Cell) -> Position {
    Position::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5)
}
