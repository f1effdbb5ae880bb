//! Persisted record layout.
//!
//! ```text
//! [{ "id": "<uuid>", "nombre": "ANA", "bebidas": 2, ..., "pagado": false }, ...]
//! ```
//!
//! Catalog products are written in catalog order (zeros included), then any
//! other non-zero product keys the customer carries, then stored fields this
//! build does not know (verbatim), then `pagado`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use tally_catalog::{Catalog, ProductId};
use tally_core::CustomerId;
use tally_ledger::{Customer, Ledger};

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "nombre";
pub const FIELD_PAID: &str = "pagado";

/// Serializes a ledger in the persisted layout.
pub struct LedgerRecords<'a> {
    pub ledger: &'a Ledger,
    pub catalog: &'a Catalog,
}

struct CustomerRecord<'a> {
    customer: &'a Customer,
    catalog: &'a Catalog,
}

impl Serialize for LedgerRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ledger.len()))?;
        for customer in self.ledger.iter() {
            seq.serialize_element(&CustomerRecord {
                customer,
                catalog: self.catalog,
            })?;
        }
        seq.end()
    }
}

impl Serialize for CustomerRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let c = self.customer;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(FIELD_ID, &c.id())?;
        map.serialize_entry(FIELD_NAME, c.name())?;
        for entry in self.catalog {
            map.serialize_entry(entry.product_id.as_str(), &c.quantity(&entry.product_id))?;
        }
        for (product_id, quantity) in c.quantities() {
            if !self.catalog.contains(product_id) {
                map.serialize_entry(product_id.as_str(), &quantity)?;
            }
        }
        for (key, value) in c.extra_fields() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(FIELD_PAID, &c.is_paid())?;
        map.end()
    }
}

pub fn encode(ledger: &Ledger, catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string(&LedgerRecords { ledger, catalog })
}

/// Why a persisted blob could not be used at all.
#[derive(Debug)]
pub enum DecodeFailure {
    NotJson(serde_json::Error),
    NotASequence(&'static str),
}

impl core::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeFailure::NotJson(e) => write!(f, "not valid JSON: {e}"),
            DecodeFailure::NotASequence(kind) => write!(f, "expected an array, found {kind}"),
        }
    }
}

/// Parse a persisted blob.
///
/// Fails only when the blob as a whole is unusable. Inside a well-formed
/// array, unusable elements are skipped and odd product values are repaired,
/// each with a warning. Fields that are not in `catalog` are kept as they are.
pub fn decode(blob: &str, catalog: &Catalog) -> Result<Ledger, DecodeFailure> {
    let value: Value = serde_json::from_str(blob).map_err(DecodeFailure::NotJson)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(DecodeFailure::NotASequence(kind_of(&other))),
    };

    let customers = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(fields) => decode_customer(index, fields, catalog),
            other => {
                tracing::warn!(index, found = kind_of(&other), "skipping non-object ledger entry");
                None
            }
        })
        .collect();

    Ok(Ledger::from_customers(customers))
}

fn decode_customer(
    index: usize,
    mut fields: Map<String, Value>,
    catalog: &Catalog,
) -> Option<Customer> {
    let id = match fields.remove(FIELD_ID) {
        Some(Value::String(s)) => match s.parse::<CustomerId>() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping ledger entry with unparseable id");
                return None;
            }
        },
        _ => {
            tracing::warn!(index, "skipping ledger entry without id");
            return None;
        }
    };

    let name = match fields.remove(FIELD_NAME) {
        Some(Value::String(s)) => s,
        _ => {
            tracing::warn!(index, %id, "skipping ledger entry without name");
            return None;
        }
    };

    let paid = match fields.remove(FIELD_PAID) {
        Some(Value::Bool(b)) => b,
        None | Some(Value::Null) => false,
        Some(other) => {
            tracing::warn!(index, %id, found = kind_of(&other), "non-boolean paid flag; assuming unpaid");
            false
        }
    };

    let mut quantities = Vec::new();
    let mut extra = Vec::new();
    for (key, value) in fields {
        let product_id = ProductId::new(key);
        if catalog.contains(&product_id) {
            if let Some(quantity) = decode_quantity(index, product_id.as_str(), &value) {
                quantities.push((product_id, quantity));
            }
        } else {
            extra.push((product_id.as_str().to_string(), value));
        }
    }

    Some(Customer::restore(id, name, quantities, paid).with_extra_fields(extra))
}

fn decode_quantity(index: usize, key: &str, value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(q) = n.as_u64() {
                Some(u32::try_from(q).unwrap_or(u32::MAX))
            } else if n.as_i64().is_some() {
                tracing::warn!(index, product = key, "negative quantity; clamping to 0");
                Some(0)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => {
                        Some(f.clamp(0.0, f64::from(u32::MAX)) as u32)
                    }
                    _ => {
                        tracing::warn!(index, product = key, "non-integer quantity; ignoring");
                        None
                    }
                }
            }
        }
        Value::Null => None,
        other => {
            tracing::warn!(index, product = key, found = kind_of(other), "non-numeric quantity; ignoring");
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
