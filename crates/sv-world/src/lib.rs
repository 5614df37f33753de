//! `sv-world` — the tick scheduler: owns the map and every agent, drives the
//! fixed six-phase tick loop, and arbitrates the win condition.
//!
//! # Crate layout
//!
//! | Module       | Contents                                          |
//! |--------------|------------------------------------------------------|
//! | [`world`]    | `World`, `WorldBuilder`, `Outcome`, the tick loop  |
//! | [`partition`]| Patrol-area grid partition (§4.7)                  |
//! | [`observer`] | `WorldObserver`, `NoopObserver`                    |
//! | [`error`]    | `WorldError`, `WorldResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Forwarded to `sv-core`/`sv-spatial`/`sv-agent`.       |

pub mod error;
pub mod observer;
pub mod partition;
pub mod world;


pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, WorldObserver};
pub use partition::{partition, PatrolArea};
pub use world::{Outcome, World, WorldBuilder};
