//! Product catalog: the fixed price table the vendor sells from.
//!
//! The catalog is built once and never mutated. It is iterated as an
//! explicitly ordered list so totals, labels and persisted field order are
//! deterministic.

pub mod product;

pub use product::{Catalog, CatalogEntry, Price, ProductId};
