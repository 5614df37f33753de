//! `sv-io` — versioned JSON save-file schema and outcome reporting.
//!
//! The entire output surface is two small load/save schemas and one
//! summary object written once per run — plain `serde_json`, no writer
//! trait or batching needed.
//!
//! # Crate layout
//!
//! | Module     | Contents                                        |
//! |------------|--------------------------------------------------|
//! | [`save`]   | `MapFile`/`AgentsFile`, load/save to/from `Map`   |
//! | [`report`] | `OutcomeReport`, written once at the end of a run |

pub mod report;
pub mod save;

#[cfg(test)]
mod tests;

pub use report::{load_report, save_report, OutcomeReport};
pub use save::{load_agents_file, load_map_file, save_agents_file, save_map_file, AgentsFile, MapFile};
