use tally_catalog::{Catalog, ProductId};
use tally_core::{CustomerId, DomainError, DomainResult};
use tally_ledger::{Customer, Ledger, LedgerChange, totals, view};
use tally_store::LedgerPersistence;

use crate::confirm::Confirm;

pub const RESET_PROMPT: &str = "Clear every customer's consumption?";

/// The stall's state container.
///
/// Owns the ledger, the catalog and the current search term. Its methods are
/// the only way to change the ledger; each applied operation is followed by a
/// save through the injected persistence.
pub struct Register<P> {
    ledger: Ledger,
    catalog: Catalog,
    persistence: P,
    search_term: String,
}

impl<P: LedgerPersistence> Register<P> {
    /// Load the ledger from `persistence` and sell from the standard catalog.
    pub fn open(persistence: P) -> Self {
        Self::with_catalog(persistence, Catalog::standard().clone())
    }

    pub fn with_catalog(persistence: P, catalog: Catalog) -> Self {
        let ledger = persistence.load();
        tracing::info!(customers = ledger.len(), "register opened");
        Self {
            ledger,
            catalog,
            persistence,
            search_term: String::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add a customer. Blank names are ignored and nothing is saved.
    pub fn add_customer(&mut self, name: &str) -> Option<CustomerId> {
        let Some(change) = self.ledger.add_customer(name) else {
            tracing::debug!("ignoring blank customer name");
            return None;
        };
        let id = change.customer_id();
        self.commit(change);
        id
    }

    /// Change one product's quantity by `delta`, flooring at zero.
    ///
    /// Products outside the catalog are rejected before the ledger is touched,
    /// and nothing is saved.
    pub fn adjust_quantity(
        &mut self,
        id: CustomerId,
        product_id: &ProductId,
        delta: i64,
    ) -> DomainResult<LedgerChange> {
        if !self.catalog.contains(product_id) {
            tracing::warn!(product = %product_id, "rejecting product outside the catalog");
            return Err(DomainError::unknown_product(product_id.as_str()));
        }
        let change = self.ledger.adjust_quantity(id, product_id, delta);
        self.commit(change.clone());
        Ok(change)
    }

    pub fn increment(
        &mut self,
        id: CustomerId,
        product_id: &ProductId,
    ) -> DomainResult<LedgerChange> {
        self.adjust_quantity(id, product_id, 1)
    }

    pub fn decrement(
        &mut self,
        id: CustomerId,
        product_id: &ProductId,
    ) -> DomainResult<LedgerChange> {
        self.adjust_quantity(id, product_id, -1)
    }

    pub fn remove_customer(&mut self, id: CustomerId) -> LedgerChange {
        let change = self.ledger.remove_customer(id);
        self.commit(change.clone());
        change
    }

    pub fn toggle_paid(&mut self, id: CustomerId) -> LedgerChange {
        let change = self.ledger.toggle_paid(id);
        self.commit(change.clone());
        change
    }

    /// Zero every quantity, but only if `confirm` approves. Returns whether the
    /// reset happened; a declined reset neither changes nor saves anything.
    pub fn reset_all_quantities(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            tracing::info!("reset declined");
            return false;
        }
        let change = self.ledger.reset_all_quantities();
        self.commit(change);
        true
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Customers matching the search term, sorted by name.
    pub fn visible_customers(&self) -> Vec<&Customer> {
        view::visible_customers(&self.ledger, &self.search_term)
    }

    /// First visible customer matching the search term (scroll-to hint).
    pub fn locate(&self) -> Option<&Customer> {
        let visible = self.visible_customers();
        view::locate(&visible, &self.search_term)
    }

    pub fn total_for(&self, customer: &Customer) -> u64 {
        totals::total_for(customer, &self.catalog)
    }

    pub fn grand_total(&self) -> u64 {
        totals::grand_total(&self.ledger, &self.catalog)
    }

    pub fn paid_total(&self) -> u64 {
        totals::paid_total(&self.ledger, &self.catalog)
    }

    pub fn pending_total(&self) -> u64 {
        totals::pending_total(&self.ledger, &self.catalog)
    }

    /// Post-mutation hook: log the change and persist the whole ledger.
    fn commit(&mut self, change: LedgerChange) {
        if change.is_unchanged() {
            tracing::debug!(change = change.change_type(), customer = ?change.customer_id(), "no matching customer");
        } else {
            tracing::info!(
                change = change.change_type(),
                detail = %serde_json::to_string(&change).unwrap_or_default(),
                "ledger updated"
            );
        }
        self.persistence.save(&self.ledger);
    }
}
