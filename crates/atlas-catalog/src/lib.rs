//! # atlas-catalog
//!
//! Read-only client for the shared coffee catalog: roasters, beans and
//! recent community tasting notes served by an external managed table
//! store.
//!
//! This is reference data, not the user's journal. The sync orchestrator
//! never reads or writes through this crate, and nothing here touches
//! local storage.

pub mod gateway;
pub mod models;

mod error;

pub use error::{CatalogError, Result};
pub use gateway::{CatalogGateway, HttpCatalogGateway};
pub use models::*;
