//! `sv-agent` — per-agent state, the pluggable strategy hook interface,
//! kinematics/collision, noise, and messaging.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|-----------------------------------------------------------|
//! | [`agent`]    | `Agent`, lifecycle `tick()`, the stable agent API (§4.6)  |
//! | [`behavior`] | `AgentBehavior` trait, `AgentKind`, `AgentView`, `NoopBehavior` |
//! | [`movement`] | Turn/move integration, wall collision resolution          |
//! | [`noise`]    | `NoiseEvent`, `PerceivedNoise`, self/ambient noise formulas |
//! | [`message`]  | `Message`                                                  |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod agent;
pub mod behavior;
pub mod error;
pub mod message;
pub mod movement;
pub mod noise;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use behavior::{AgentBehavior, AgentKind, AgentView, NoopBehavior};
pub use error::{AgentError, AgentResult};
pub use message::Message;
pub use movement::{resolve_collision, CollisionOutcome};
pub use noise::{emission_chance_per_tick, self_noise_radius, NoiseEvent, PerceivedNoise};
