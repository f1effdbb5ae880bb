use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult};

/// Product identifier: the string key used both in the price table and as the
/// persisted field name on customer records (e.g. `cervezasGrandes`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label: a space before every uppercase letter, then
    /// uppercased (`vasoBebida` -> `VASO BEBIDA`).
    pub fn label(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 4);
        for ch in self.0.chars() {
            if ch.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(ch.to_ascii_uppercase());
        }
        out.trim_start().to_string()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Unit price in whole currency units (no minor units). Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub fn new(amount: u64) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> u64 {
        self.0
    }

    /// `quantity × price`, saturating instead of wrapping.
    pub fn times(self, quantity: u32) -> u64 {
        self.0.saturating_mul(u64::from(quantity))
    }
}

/// One row of the price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub product_id: ProductId,
    pub price: Price,
}

/// The vendor's price table, in display order.
const STANDARD_PRICES: [(&str, u64); 10] = [
    ("bebidas", 1500),
    ("vasoBebida", 1000),
    ("cervezas", 1000),
    ("cervezasGrandes", 2000),
    ("energeticas", 2000),
    ("alfajores", 1200),
    ("choripanes", 1500),
    ("papasFritas", 1000),
    ("pisco2x", 5000),
    ("completos", 2000),
];

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    entries: STANDARD_PRICES
        .iter()
        .map(|(key, price)| CatalogEntry {
            product_id: ProductId::new(*key),
            price: Price(*price),
        })
        .collect(),
});

/// Fixed, ordered product → price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The ten-product catalog the stall sells from.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// Build a custom catalog (tests, alternative stalls).
    ///
    /// Keys must be non-empty and unique; prices are already positive by
    /// construction of [`Price`].
    pub fn new(entries: Vec<CatalogEntry>) -> DomainResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.product_id.as_str().trim().is_empty() {
                return Err(DomainError::validation("product key cannot be empty"));
            }
            if entries[..i]
                .iter()
                .any(|other| other.product_id == entry.product_id)
            {
                return Err(DomainError::validation(format!(
                    "duplicate product key: {}",
                    entry.product_id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.price_of(product_id).is_some()
    }

    pub fn price_of(&self, product_id: &ProductId) -> Option<Price> {
        self.entries
            .iter()
            .find(|e| &e.product_id == product_id)
            .map(|e| e.price)
    }

    /// Resolve user input to a catalog product.
    ///
    /// Matches the key case-insensitively, or the label with spaces ignored
    /// (`"papas fritas"` and `"PAPASFRITAS"` both resolve to `papasFritas`).
    pub fn parse_product(&self, input: &str) -> DomainResult<ProductId> {
        let wanted: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if wanted.is_empty() {
            return Err(DomainError::unknown_product(input));
        }

        self.entries
            .iter()
            .find(|e| e.product_id.as_str().to_lowercase() == wanted)
            .map(|e| e.product_id.clone())
            .ok_or_else(|| DomainError::unknown_product(input.trim()))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
