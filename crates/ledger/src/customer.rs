use std::collections::BTreeMap;

use serde_json::Value;
use tally_catalog::ProductId;
use tally_core::CustomerId;

/// One tracked customer: a name, a quantity per product, a paid flag.
///
/// Quantities are stored sparsely: a product with quantity 0 has no entry, so
/// "absent" and "zero" compare equal. Stored fields this build does not know
/// about are kept verbatim in `extra` and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    quantities: BTreeMap<ProductId, u32>,
    paid: bool,
    extra: BTreeMap<String, Value>,
}

impl Customer {
    /// Start a new tab for `raw_name`.
    ///
    /// Returns `None` when the name is empty after trimming. The stored name is
    /// trimmed and uppercased.
    pub fn open(raw_name: &str) -> Option<Self> {
        let name = normalize_name(raw_name)?;
        Some(Self {
            id: CustomerId::new(),
            name,
            quantities: BTreeMap::new(),
            paid: false,
            extra: BTreeMap::new(),
        })
    }

    /// Rebuild a customer exactly as it was persisted.
    ///
    /// The name is kept verbatim; zero quantities are dropped.
    pub fn restore(
        id: CustomerId,
        name: String,
        quantities: impl IntoIterator<Item = (ProductId, u32)>,
        paid: bool,
    ) -> Self {
        Self {
            id,
            name,
            quantities: quantities.into_iter().filter(|(_, q)| *q > 0).collect(),
            paid,
            extra: BTreeMap::new(),
        }
    }

    /// Attach stored fields that are neither identity, name, paid flag nor a
    /// catalog product. They are written back unchanged.
    pub fn with_extra_fields(mut self, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.extra.extend(fields);
        self
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// Quantity of `product_id`; 0 when the customer never took any.
    pub fn quantity(&self, product_id: &ProductId) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    /// Non-zero quantities, ordered by product key.
    pub fn quantities(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.quantities.iter().map(|(p, q)| (p, *q))
    }

    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_consumption(&self) -> bool {
        !self.quantities.is_empty()
    }

    /// Apply `delta` with a floor at zero. Returns `(before, after)`.
    pub(crate) fn adjust(&mut self, product_id: &ProductId, delta: i64) -> (u32, u32) {
        let before = self.quantity(product_id);
        let after = i64::from(before)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)) as u32;

        if after == 0 {
            self.quantities.remove(product_id);
        } else {
            self.quantities.insert(product_id.clone(), after);
        }
        (before, after)
    }

    pub(crate) fn toggle_paid(&mut self) -> bool {
        self.paid = !self.paid;
        self.paid
    }

    pub(crate) fn clear_quantities(&mut self) {
        self.quantities.clear();
    }
}

fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
