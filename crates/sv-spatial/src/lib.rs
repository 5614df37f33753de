//! `sv-spatial` — the static grid map, per-agent fog-of-war, and pathfinding.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|-------------------------------------------------------------|
//! | [`map`]     | `Map`/`MapBuilder`, walls, vision modifier, markers, towers |
//! | [`view`]    | `MapView` — per-agent fog-of-war, Bresenham LOS reveal      |
//! | [`graph`]   | `Graph` trait, 8-connectivity `neighbors`/`cost`            |
//! | [`pathfind`]| A*/Dijkstra search, `find_path` helper                      |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod error;
pub mod graph;
pub mod map;
pub mod pathfind;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::Graph;
pub use map::{Map, MapBuilder, Marker, MarkerType};
pub use pathfind::{a_star_search, dijkstra_search, find_path};
pub use view::MapView;
