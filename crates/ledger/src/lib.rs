//! Customer ledger for the stall (pure domain logic, no IO).
//!
//! - [`Ledger`] is the ordered set of [`Customer`] records and the only
//!   mutable state. Its mutation methods are total: bad input degrades to
//!   "no change" and every applied operation reports a [`LedgerChange`].
//! - [`totals`] derives per-customer and aggregate amounts from the catalog.
//! - [`view`] derives the filtered, name-sorted list shown to the operator.

pub mod change;
pub mod collation;
pub mod customer;
pub mod ledger;
pub mod totals;
pub mod view;

pub use change::LedgerChange;
pub use customer::Customer;
pub use ledger::Ledger;
pub use totals::{grand_total, paid_total, pending_total, total_for};
pub use view::{locate, visible_customers};
