use serde::Serialize;

use tally_catalog::ProductId;
use tally_core::CustomerId;

/// What an applied ledger operation did.
///
/// Every operation that runs yields exactly one change, including the ones that
/// found nothing to act on ([`LedgerChange::Unchanged`]). Rejected input (a
/// blank name) yields none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerChange {
    CustomerAdded {
        customer_id: CustomerId,
        name: String,
    },
    QuantityAdjusted {
        customer_id: CustomerId,
        product_id: ProductId,
        from: u32,
        to: u32,
    },
    CustomerRemoved {
        customer_id: CustomerId,
    },
    PaidToggled {
        customer_id: CustomerId,
        paid: bool,
    },
    QuantitiesReset {
        customers: usize,
    },
    /// The target customer does not exist.
    Unchanged {
        customer_id: CustomerId,
    },
}

impl LedgerChange {
    pub fn change_type(&self) -> &'static str {
        match self {
            LedgerChange::CustomerAdded { .. } => "ledger.customer_added",
            LedgerChange::QuantityAdjusted { .. } => "ledger.quantity_adjusted",
            LedgerChange::CustomerRemoved { .. } => "ledger.customer_removed",
            LedgerChange::PaidToggled { .. } => "ledger.paid_toggled",
            LedgerChange::QuantitiesReset { .. } => "ledger.quantities_reset",
            LedgerChange::Unchanged { .. } => "ledger.unchanged",
        }
    }

    /// The customer the change is about, if it targets one.
    pub fn customer_id(&self) -> Option<CustomerId> {
        match self {
            LedgerChange::CustomerAdded { customer_id, .. }
            | LedgerChange::QuantityAdjusted { customer_id, .. }
            | LedgerChange::CustomerRemoved { customer_id }
            | LedgerChange::PaidToggled { customer_id, .. }
            | LedgerChange::Unchanged { customer_id } => Some(*customer_id),
            LedgerChange::QuantitiesReset { .. } => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, LedgerChange::Unchanged { .. })
    }
}
