use tally_catalog::ProductId;
use tally_core::CustomerId;

use crate::change::LedgerChange;
use crate::customer::Customer;

/// Ordered collection of customer records.
///
/// Insertion order is the storage order; display order is derived separately
/// (see [`crate::view`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    customers: Vec<Customer>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == id)
    }

    /// Every record carrying `id`. Normally one, but a hand-edited or merged
    /// blob can repeat an id and all copies are treated alike.
    fn matching_mut(&mut self, id: CustomerId) -> impl Iterator<Item = &mut Customer> {
        self.customers.iter_mut().filter(move |c| c.id() == id)
    }

    /// Append a new customer. Blank names are rejected (`None`, no change).
    /// Duplicate names are allowed.
    pub fn add_customer(&mut self, raw_name: &str) -> Option<LedgerChange> {
        let customer = Customer::open(raw_name)?;
        let change = LedgerChange::CustomerAdded {
            customer_id: customer.id(),
            name: customer.name().to_string(),
        };
        self.customers.push(customer);
        Some(change)
    }

    /// Set the product's quantity to `max(0, current + delta)`.
    ///
    /// The reported `from`/`to` are those of the first matching record.
    pub fn adjust_quantity(
        &mut self,
        id: CustomerId,
        product_id: &ProductId,
        delta: i64,
    ) -> LedgerChange {
        let mut change = LedgerChange::Unchanged { customer_id: id };
        for customer in self.matching_mut(id) {
            let (from, to) = customer.adjust(product_id, delta);
            if change.is_unchanged() {
                change = LedgerChange::QuantityAdjusted {
                    customer_id: id,
                    product_id: product_id.clone(),
                    from,
                    to,
                };
            }
        }
        change
    }

    pub fn remove_customer(&mut self, id: CustomerId) -> LedgerChange {
        let before = self.customers.len();
        self.customers.retain(|c| c.id() != id);
        if self.customers.len() < before {
            LedgerChange::CustomerRemoved { customer_id: id }
        } else {
            LedgerChange::Unchanged { customer_id: id }
        }
    }

    pub fn toggle_paid(&mut self, id: CustomerId) -> LedgerChange {
        let mut change = LedgerChange::Unchanged { customer_id: id };
        for customer in self.matching_mut(id) {
            let paid = customer.toggle_paid();
            if change.is_unchanged() {
                change = LedgerChange::PaidToggled { customer_id: id, paid };
            }
        }
        change
    }

    /// Zero every quantity for every customer. Names, ids and paid flags are
    /// kept. Callers are expected to have obtained confirmation first.
    pub fn reset_all_quantities(&mut self) -> LedgerChange {
        for customer in &mut self.customers {
            customer.clear_quantities();
        }
        LedgerChange::QuantitiesReset {
            customers: self.customers.len(),
        }
    }
}
