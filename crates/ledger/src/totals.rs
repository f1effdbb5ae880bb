//! Derived amounts. Nothing here is cached; callers recompute on every query.

use tally_catalog::Catalog;

use crate::customer::Customer;
use crate::ledger::Ledger;

/// Σ over catalog products of `quantity × price`.
///
/// Quantities for keys that are not in `catalog` do not contribute.
pub fn total_for(customer: &Customer, catalog: &Catalog) -> u64 {
    catalog
        .iter()
        .map(|entry| entry.price.times(customer.quantity(&entry.product_id)))
        .fold(0u64, u64::saturating_add)
}

/// Σ of [`total_for`] over every customer.
pub fn grand_total(ledger: &Ledger, catalog: &Catalog) -> u64 {
    sum_where(ledger, catalog, |_| true)
}

/// Amount already collected (customers marked paid).
pub fn paid_total(ledger: &Ledger, catalog: &Catalog) -> u64 {
    sum_where(ledger, catalog, Customer::is_paid)
}

/// Amount still owed (customers not marked paid).
pub fn pending_total(ledger: &Ledger, catalog: &Catalog) -> u64 {
    sum_where(ledger, catalog, |c| !c.is_paid())
}

fn sum_where(ledger: &Ledger, catalog: &Catalog, keep: impl Fn(&Customer) -> bool) -> u64 {
    ledger
        .iter()
        .filter(|c| keep(c))
        .map(|c| total_for(c, catalog))
        .fold(0u64, u64::saturating_add)
}
