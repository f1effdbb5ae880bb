//! `tally-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, the
//! ledger and the store (no storage or presentation concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::CustomerId;
