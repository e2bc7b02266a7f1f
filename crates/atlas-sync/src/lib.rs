//! # atlas-sync
//!
//! The sync orchestrator: single source of truth for the user's private
//! journal during a session.
//!
//! Views call the mutation operations here and read immutable copies back;
//! the orchestrator keeps the in-memory snapshot consistent and mirrors it
//! to the envelope store after every change. Shared catalog data (roasters,
//! beans, community notes) has no path through this crate; see
//! `atlas-catalog`.

pub mod orchestrator;
pub mod status;

pub use orchestrator::{ImportSummary, SyncOrchestrator};
pub use status::SyncStatus;
