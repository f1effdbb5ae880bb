//! Persistence for the ledger.
//!
//! The whole ledger lives under one key of a [`KeyValueSlot`] as a JSON array
//! of customer records. [`LedgerStore`] is the [`LedgerPersistence`]
//! implementation the register is wired with: loading never fails (missing or
//! corrupt data means an empty ledger) and save failures are logged.

pub mod error;
pub mod record;
pub mod slot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use slot::{FileSlot, InMemorySlot, KeyValueSlot};
pub use store::{LEGACY_KEY, LedgerPersistence, LedgerStore, STORAGE_KEY};
