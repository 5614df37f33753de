//! Inter-agent messages, routed by the world with a one-tick delay.

use sv_core::AgentId;

/// A message sent from one agent to another, delivered on the *next* tick
/// after it was sent.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub source: AgentId,
    pub target: AgentId,
    pub payload: String,
}

impl Message {
    pub fn new(source: AgentId, target: AgentId, payload: impl Into<String>) -> Self {
        Self {
            source,
            target,
            payload: payload.into(),
        }
    }
}
