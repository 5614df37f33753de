//! The `Graph` trait consumed by the pathfinder.
//!
//! There is exactly one graph worth pathing over here — an agent's
//! fog-of-war grid — so the trait is implemented directly for `(i32, i32)`
//! cell coordinates rather than abstracting over multiple routing modes.

/// Interface a graph must implement so A*/Dijkstra can traverse it.
///
/// Implemented by [`crate::view::MapView`] with 8-connectivity and no
/// corner-cutting.
pub trait Graph {
    /// Passable neighbors of `node`, in an unspecified but deterministic
    /// order (stable iteration keeps search results reproducible).
    fn neighbors(&self, node: (i32, i32)) -> Vec<(i32, i32)>;

    /// Cost of stepping from `from` to `to`. Only called for pairs returned
    /// by `neighbors`.
    fn cost(&self, from: (i32, i32), to: (i32, i32)) -> f32;

    /// Whether `node` itself could be entered. `find_path` uses this to
    /// substitute an impassable destination with its nearest passable
    /// neighbor; `neighbors`/`cost` alone can't answer "is this cell itself
    /// open".
    fn passable(&self, node: (i32, i32)) -> bool;
}
