//! `AgentBehavior` — the polymorphic strategy hook interface, and the
//! capability-limited views passed into it.
//!
//! Every agent owns exactly one boxed `dyn AgentBehavior`; the world calls
//! through it rather than knowing anything about concrete strategies.

use sv_core::{AgentId, Position, SimRng};

use crate::agent::Agent;
use crate::message::Message;
use crate::noise::PerceivedNoise;

/// Which team an agent belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    Guard,
    Intruder,
}

/// A short-lived, capability-limited view of another agent, produced fresh
/// each tick — never a handle back into the owning `Agent`.
#[derive(Copy, Clone, Debug)]
pub struct AgentView {
    pub id: AgentId,
    pub location: Position,
    pub heading: f32,
    pub is_guard: bool,
    pub is_intruder: bool,
}

impl AgentView {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            location: agent.location,
            heading: agent.heading,
            is_guard: agent.kind == AgentKind::Guard,
            is_intruder: agent.kind == AgentKind::Intruder,
        }
    }
}

/// Pluggable per-agent strategy. Exactly one instance is owned by each
/// [`Agent`]; hooks receive `&mut Agent` (the owning agent, with its API of
/// §4.6 available) so behaviors read/act through the same surface a human
/// strategy author would.
///
/// Only [`on_pick_start`][Self::on_pick_start] and
/// [`on_tick`][Self::on_tick] are required; every other hook defaults to
/// doing nothing, following `BehaviorModel`'s `on_contacts`/`on_message`
/// no-op defaults.
pub trait AgentBehavior {
    /// Called once during `World::setup()`, after a starting location has
    /// been assigned.
    fn on_setup(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {}

    /// Must return a valid (in-bounds, not-a-wall) starting position.
    fn on_pick_start(&mut self, agent: &Agent, rng: &mut SimRng) -> (f32, f32);

    /// Called whenever `reveal_visible` actually changed the revealed set
    /// this tick.
    fn on_vision_update(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {}

    /// Called when there are perceived noises this tick and the agent is not
    /// deaf.
    fn on_noise(&mut self, _agent: &mut Agent, _noises: &[PerceivedNoise], _rng: &mut SimRng) {}

    /// Called once per inbound message, before `on_tick`.
    fn on_message(&mut self, _agent: &mut Agent, _message: &Message, _rng: &mut SimRng) {}

    /// Called once when `_has_collided` was set on the previous movement
    /// step.
    fn on_collide(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {}

    /// Main per-tick decision hook: may enqueue turn/move/message/tower/
    /// sprint actions through `agent`'s API.
    fn on_tick(&mut self, agent: &mut Agent, seen_agents: &[AgentView], rng: &mut SimRng);

    /// Intruder-only: called once, the first tick `is_captured` becomes
    /// true.
    fn on_captured(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {}

    /// Intruder-only: called once, the first tick `reached_target` becomes
    /// true.
    fn on_reached_target(&mut self, _agent: &mut Agent, _rng: &mut SimRng) {}
}

/// A behavior that never acts: a valid starting cell of `(0.5, 0.5)` and an
/// empty `on_tick`. Useful for tests and for "passive" agents that simply
/// occupy space.
pub struct NoopBehavior;

impl AgentBehavior for NoopBehavior {
    fn on_pick_start(&mut self, _agent: &Agent, _rng: &mut SimRng) -> (f32, f32) {
        (0.5, 0.5)
    }

    fn on_tick(&mut self, _agent: &mut Agent, _seen_agents: &[AgentView], _rng: &mut SimRng) {}
}
