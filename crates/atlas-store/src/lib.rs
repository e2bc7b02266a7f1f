//! # atlas-store
//!
//! Durable local persistence for the Coffee Atlas journal.
//!
//! The user's entire private journal travels as one [`SyncEnvelope`] blob
//! stored under a fixed key in a quota-limited [`StorageArea`], the
//! on-disk analogue of the `localStorage` area the mobile app writes to.
//! [`EnvelopeStore`] wraps the area with the envelope-level operations:
//! save, load, file export/import and quota introspection.
//!
//! [`SyncEnvelope`]: atlas_shared::models::SyncEnvelope

pub mod area;
pub mod envelope;

mod error;

pub use area::{StorageArea, StorageUsage};
pub use envelope::{EnvelopeStore, LoadOutcome};
pub use error::{Result, StoreError};
