//! # atlas-shared
//!
//! Domain types shared by every Coffee Atlas crate: the user's journal
//! entries, the sync envelope they are persisted in, the fixed storage
//! constants, and the demonstration dataset shown on a fresh install.
//!
//! This crate is I/O-free; persistence lives in `atlas-store` and
//! orchestration in `atlas-sync`.

pub mod constants;
pub mod models;
pub mod seed;

pub use models::*;
