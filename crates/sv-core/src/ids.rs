//! Strongly typed, zero-cost identifier wrapper.
//!
//! Agent IDs are dense and 1-based (the world's first agent is `AgentId(1)`),
//! unlike a 0-based index — `index()` accounts for the offset so the ID can
//! still be used directly against SoA-style `Vec`s if a caller wants to.

use std::fmt;

/// Identifier of an agent within a [`World`](../sv_world/index.html).
///
/// `Copy + Ord + Hash` so it can be used as a map key and sorted collection
/// element without ceremony.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: AgentId = AgentId(0);

    /// The first ID ever allocated by a world.
    pub const FIRST: AgentId = AgentId(1);

    /// Cast to `usize` for use as a zero-based `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The ID that would be allocated immediately after this one.
    #[inline(always)]
    pub fn next(self) -> AgentId {
        AgentId(self.0 + 1)
    }
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
