//! `sv-core` — foundational types for the surveillance simulation engine.
//!
//! This crate is a dependency of every other `sv-*` crate. It intentionally
//! has no `sv-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                   |
//! |--------------|---------------------------------------------|
//! | [`ids`]      | `AgentId`                                    |
//! | [`position`] | `Position`, heading math                     |
//! | [`time`]     | `Tick`, tick-rate constants                  |
//! | [`rng`]      | `SimRng` — the single deterministic stream   |
//! | [`config`]   | `WorldConfig`                                |
//! | [`error`]    | `SvError`, `SvResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod position;
pub mod rng;
pub mod time;


pub use config::WorldConfig;
pub use error::{SvError, SvResult};
pub use ids::AgentId;
pub use position::Position;
pub use rng::SimRng;
pub use time::{Tick, TICK_RATE, TIME_PER_TICK};
