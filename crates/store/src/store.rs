use tally_catalog::Catalog;
use tally_ledger::Ledger;

use crate::error::StoreResult;
use crate::record;
use crate::slot::KeyValueSlot;

/// Key the ledger is written under.
pub const STORAGE_KEY: &str = "listaVentas_AcidTroll_v2";

/// Key used by earlier installs. Read as a fallback, never written.
pub const LEGACY_KEY: &str = "listaPersonas";

/// Persistence collaborator of the register.
///
/// Neither method reports failure to the caller: a ledger that cannot be
/// loaded starts empty, and a save that fails is logged.
pub trait LedgerPersistence {
    fn load(&self) -> Ledger;
    fn save(&self, ledger: &Ledger);
}

impl<P> LedgerPersistence for std::sync::Arc<P>
where
    P: LedgerPersistence + ?Sized,
{
    fn load(&self) -> Ledger {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) {
        (**self).save(ledger)
    }
}

/// [`LedgerPersistence`] over a [`KeyValueSlot`].
#[derive(Debug)]
pub struct LedgerStore<S> {
    slot: S,
    catalog: Catalog,
}

impl<S: KeyValueSlot> LedgerStore<S> {
    /// Store writing the standard catalog's fields.
    pub fn new(slot: S) -> Self {
        Self::with_catalog(slot, Catalog::standard().clone())
    }

    pub fn with_catalog(slot: S, catalog: Catalog) -> Self {
        Self { slot, catalog }
    }

    /// Serialize and write the whole ledger under [`STORAGE_KEY`].
    pub fn try_save(&self, ledger: &Ledger) -> StoreResult<()> {
        let blob = record::encode(ledger, &self.catalog)?;
        self.slot.set(STORAGE_KEY, &blob)
    }

    /// Read the canonical key, falling back to [`LEGACY_KEY`] only when the
    /// canonical key is absent. A present-but-corrupt canonical blob does not
    /// fall back.
    fn read_blob(&self) -> Option<(&'static str, String)> {
        for key in [STORAGE_KEY, LEGACY_KEY] {
            match self.slot.get(key) {
                Ok(Some(blob)) => return Some((key, blob)),
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(key, error = %e, "failed to read persisted ledger; starting empty");
                    return None;
                }
            }
        }
        None
    }
}

impl<S: KeyValueSlot> LedgerPersistence for LedgerStore<S> {
    fn load(&self) -> Ledger {
        let Some((key, blob)) = self.read_blob() else {
            tracing::debug!("no persisted ledger; starting empty");
            return Ledger::new();
        };

        match record::decode(&blob, &self.catalog) {
            Ok(ledger) => {
                if key == LEGACY_KEY {
                    tracing::info!(
                        from = LEGACY_KEY,
                        to = STORAGE_KEY,
                        customers = ledger.len(),
                        "loaded ledger from legacy key; next save migrates it"
                    );
                } else {
                    tracing::debug!(customers = ledger.len(), "loaded persisted ledger");
                }
                ledger
            }
            Err(failure) => {
                tracing::warn!(key, reason = %failure, "persisted ledger is unusable; starting empty");
                Ledger::new()
            }
        }
    }

    fn save(&self, ledger: &Ledger) {
        match self.try_save(ledger) {
            Ok(()) => tracing::debug!(customers = ledger.len(), "ledger saved"),
            Err(e) => tracing::error!(error = %e, "failed to save ledger"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::StoreError;
    use crate::slot::{FileSlot, InMemorySlot};
    use proptest::prelude::*;
    use tally_catalog::ProductId;
    use tally_core::CustomerId;

    fn populated() -> Ledger {
        let mut ledger = Ledger::new();
        let ana = ledger.add_customer("ana").unwrap().customer_id().unwrap();
        let beto = ledger.add_customer("beto").unwrap().customer_id().unwrap();
        ledger.adjust_quantity(ana, &ProductId::new("pisco2x"), 3);
        ledger.adjust_quantity(beto, &ProductId::new("choripanes"), 1);
        ledger.toggle_paid(beto);
        ledger
    }

    #[test]
    fn missing_blob_loads_empty() {
        let store = LedgerStore::new(InMemorySlot::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = LedgerStore::new(InMemorySlot::with_entry(STORAGE_KEY, "{{{"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn non_sequence_blob_loads_empty() {
        let store = LedgerStore::new(InMemorySlot::with_entry(STORAGE_KEY, r#"{"a":1}"#));
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = LedgerStore::new(InMemorySlot::new());
        let ledger = populated();
        store.save(&ledger);
        assert_eq!(store.load(), ledger);
    }

    #[test]
    fn legacy_key_is_read_when_canonical_is_absent() {
        let id = CustomerId::new();
        let legacy = format!(r#"[{{"id":"{id}","nombre":"VIEJO","bebidas":1,"pagado":true}}]"#);
        let slot = Arc::new(InMemorySlot::with_entry(LEGACY_KEY, legacy.clone()));
        let store = LedgerStore::new(slot.clone());

        let ledger = store.load();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(id).unwrap().name(), "VIEJO");

        store.save(&ledger);
        assert!(slot.get(STORAGE_KEY).unwrap().is_some());
        assert_eq!(slot.get(LEGACY_KEY).unwrap(), Some(legacy));
    }

    #[test]
    fn canonical_key_wins_over_legacy() {
        let slot = Arc::new(InMemorySlot::with_entry(
            LEGACY_KEY,
            format!(r#"[{{"id":"{}","nombre":"VIEJO"}}]"#, CustomerId::new()),
        ));
        let store = LedgerStore::new(slot.clone());
        store.save(&populated());

        let names: Vec<String> = store.load().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["ANA", "BETO"]);
    }

    #[test]
    fn corrupt_canonical_does_not_fall_back() {
        let slot = InMemorySlot::with_entry(
            LEGACY_KEY,
            format!(r#"[{{"id":"{}","nombre":"VIEJO"}}]"#, CustomerId::new()),
        );
        slot.set(STORAGE_KEY, "oops").unwrap();
        assert!(LedgerStore::new(slot).load().is_empty());
    }

    #[test]
    fn file_backed_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = populated();
        LedgerStore::new(FileSlot::new(dir.path())).save(&ledger);

        let reopened = LedgerStore::new(FileSlot::new(dir.path()));
        assert_eq!(reopened.load(), ledger);
    }

    #[test]
    fn try_save_surfaces_slot_errors() {
        struct Broken;
        impl KeyValueSlot for Broken {
            fn get(&self, _key: &str) -> StoreResult<Option<String>> {
                Err(StoreError::Poisoned)
            }
            fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
                Err(StoreError::Poisoned)
            }
        }

        let store = LedgerStore::new(Broken);
        assert!(matches!(store.try_save(&populated()), Err(StoreError::Poisoned)));
        // The trait methods swallow the failure.
        store.save(&populated());
        assert!(store.load().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: any well-formed ledger survives save + load unchanged.
        #[test]
        fn round_trip_preserves_everything(
            rows in prop::collection::vec(
                ("[A-ZÑ ]{1,8}", prop::collection::vec((0usize..10, 0u32..20), 0..5), any::<bool>()),
                0..10,
            )
        ) {
            let entries = Catalog::standard().entries();
            let mut ledger = Ledger::new();
            for (name, quantities, paid) in rows {
                let Some(change) = ledger.add_customer(&name) else { continue };
                let id = change.customer_id().unwrap();
                for (idx, q) in quantities {
                    ledger.adjust_quantity(id, &entries[idx].product_id, i64::from(q));
                }
                if paid {
                    ledger.toggle_paid(id);
                }
            }

            let store = LedgerStore::new(InMemorySlot::new());
            store.save(&ledger);
            prop_assert_eq!(store.load(), ledger);
        }
    }
}
