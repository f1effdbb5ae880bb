//! `tally-register`
//!
//! **Responsibility:** the application state container and its terminal
//! front end.
//!
//! - [`Register`] owns the ledger and is its only write path. After every
//!   applied operation it hands the ledger to its persistence collaborator.
//! - [`Confirm`] gates destructive operations.
//! - [`Config`] is read from the environment by the `tally` binary.
//! - [`cli`] parses and runs the line-oriented command loop.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod format;
pub mod register;

pub use config::{Config, ConfigError};
pub use confirm::Confirm;
pub use register::Register;
