//! In-memory medicine collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use remedystock_core::entity::position_of;
use remedystock_core::{DomainError, DomainResult, IdGenerator, MedicineId};

use crate::draft::MedicineDraft;
use crate::event::{
    AdjustmentSource, FieldEdited, InventoryEvent, MedicineAdded, MedicineDeleted, StockAdjusted,
};
use crate::medicine::{Medicine, MedicineField};
use crate::seed::seed_medicines;

/// Notification text for a barcode that is already taken.
pub const DUPLICATE_BARCODE_MESSAGE: &str =
    "This barcode already exists! Please use a different barcode.";

/// When barcode uniqueness is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarcodePolicy {
    /// Checked when a record is added; inline edits may introduce duplicates.
    #[default]
    OnCreate,
    /// Checked on add and on barcode edits.
    OnCreateAndEdit,
}

/// Ordered, in-memory medicine collection.
///
/// The records live behind an `Arc`; every mutation goes through
/// `Arc::make_mut`, so a [`snapshot`](InventoryStore::snapshot) taken earlier is
/// never changed underneath its holder.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: Arc<Vec<Medicine>>,
    ids: IdGenerator,
    barcode_policy: BarcodePolicy,
}

impl InventoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `medicines` in the given order.
    pub fn with_medicines(medicines: Vec<Medicine>) -> Self {
        let mut ids = IdGenerator::new();
        for m in &medicines {
            ids.observe(m.id);
        }
        Self {
            items: Arc::new(medicines),
            ids,
            barcode_policy: BarcodePolicy::default(),
        }
    }

    /// A store holding the fixed seed list.
    pub fn seeded() -> Self {
        Self::with_medicines(seed_medicines())
    }

    pub fn with_barcode_policy(mut self, policy: BarcodePolicy) -> Self {
        self.barcode_policy = policy;
        self
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.items
    }

    /// Cheap, immutable view of the current collection.
    pub fn snapshot(&self) -> Arc<Vec<Medicine>> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: MedicineId) -> Option<&Medicine> {
        self.items.iter().find(|m| m.id == id)
    }

    /// Exact (case-sensitive) barcode lookup.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Medicine> {
        self.items.iter().find(|m| m.barcode.as_str() == barcode)
    }

    fn barcode_taken(&self, barcode: &str, except: Option<MedicineId>) -> bool {
        self.items
            .iter()
            .any(|m| m.barcode.as_str() == barcode && Some(m.id) != except)
    }

    /// Validate the add form and append a new record.
    pub fn add(&mut self, draft: &MedicineDraft) -> DomainResult<InventoryEvent> {
        self.add_at(draft, Utc::now())
    }

    /// [`add`](Self::add) with an explicit creation time (id source).
    pub fn add_at(
        &mut self,
        draft: &MedicineDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<InventoryEvent> {
        let new = draft.validate()?;

        if self.barcode_taken(new.barcode.as_str(), None) {
            tracing::warn!(barcode = %new.barcode, "rejected add: duplicate barcode");
            return Err(DomainError::conflict(DUPLICATE_BARCODE_MESSAGE));
        }

        let medicine = Medicine {
            id: self.ids.next_at(now),
            name: new.name,
            potency: new.potency,
            company: new.company,
            category: new.category,
            stock: new.stock,
            low_stock_threshold: new.low_stock_threshold,
            barcode: new.barcode,
        };

        tracing::info!(id = %medicine.id, name = %medicine.name, stock = medicine.stock, "medicine added");
        Arc::make_mut(&mut self.items).push(medicine.clone());

        Ok(InventoryEvent::MedicineAdded(MedicineAdded {
            medicine,
            occurred_at: now,
        }))
    }

    /// Set `stock = max(0, stock + delta)`. `None` when `id` is unknown.
    pub fn update_stock(&mut self, id: MedicineId, delta: i64) -> Option<InventoryEvent> {
        self.adjust(id, delta, AdjustmentSource::Manual)
    }

    pub(crate) fn adjust(
        &mut self,
        id: MedicineId,
        delta: i64,
        source: AdjustmentSource,
    ) -> Option<InventoryEvent> {
        let idx = position_of(self.items.as_slice(), id)?;
        let medicine = &mut Arc::make_mut(&mut self.items)[idx];
        let old_stock = medicine.stock;
        let new_stock = medicine.adjust_stock(delta);

        tracing::debug!(%id, delta, old_stock, new_stock, ?source, "stock adjusted");

        Some(InventoryEvent::StockAdjusted(StockAdjusted {
            medicine_id: id,
            delta,
            old_stock,
            new_stock,
            source,
            occurred_at: Utc::now(),
        }))
    }

    /// Overwrite one field of the record `id` in place.
    ///
    /// No validation is applied, except the barcode check when the store runs
    /// with [`BarcodePolicy::OnCreateAndEdit`]. `Ok(None)` when `id` is unknown.
    pub fn edit_field(
        &mut self,
        id: MedicineId,
        field: MedicineField,
    ) -> DomainResult<Option<InventoryEvent>> {
        let Some(idx) = position_of(self.items.as_slice(), id) else {
            return Ok(None);
        };

        if let MedicineField::Barcode(code) = &field {
            if self.barcode_policy == BarcodePolicy::OnCreateAndEdit
                && self.barcode_taken(code.as_str(), Some(id))
            {
                tracing::warn!(%id, barcode = %code, "rejected edit: duplicate barcode");
                return Err(DomainError::conflict(DUPLICATE_BARCODE_MESSAGE));
            }
        }

        tracing::debug!(%id, field = field.name(), "field edited");
        Arc::make_mut(&mut self.items)[idx].apply_field(field.clone());

        Ok(Some(InventoryEvent::FieldEdited(FieldEdited {
            medicine_id: id,
            field,
            occurred_at: Utc::now(),
        })))
    }

    /// Remove the record `id`. Callers are expected to have asked the user first.
    pub fn delete(&mut self, id: MedicineId) -> Option<InventoryEvent> {
        let idx = position_of(self.items.as_slice(), id)?;
        let removed = Arc::make_mut(&mut self.items).remove(idx);

        tracing::info!(%id, name = %removed.name, "medicine deleted");

        Some(InventoryEvent::MedicineDeleted(MedicineDeleted {
            medicine_id: id,
            name: removed.name,
            occurred_at: Utc::now(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medicine::Barcode;
    use chrono::TimeZone;

    fn draft(barcode: &str) -> MedicineDraft {
        MedicineDraft {
            name: "Rhus Tox".to_string(),
            potency: "200".to_string(),
            company: "SBL".to_string(),
            stock: "7".to_string(),
            barcode: barcode.to_string(),
            ..MedicineDraft::default()
        }
    }

    fn id(raw: i64) -> MedicineId {
        MedicineId::from_raw(raw)
    }

    #[test]
    fn add_appends_with_timestamp_id() {
        let mut store = InventoryStore::seeded();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let event = store.add_at(&draft("5550001"), now).unwrap();

        assert_eq!(store.len(), 7);
        let last = store.medicines().last().unwrap();
        assert_eq!(last.id, id(1_700_000_000_000));
        assert_eq!(last.stock, 7);
        assert_eq!(event.medicine_id(), last.id);
    }

    #[test]
    fn add_rejects_duplicate_barcode() {
        let mut store = InventoryStore::seeded();
        let before = store.snapshot();

        let err = store.add(&draft("8901231234567")).unwrap_err();

        assert_eq!(err, DomainError::conflict(DUPLICATE_BARCODE_MESSAGE));
        assert_eq!(store.medicines(), before.as_slice());
    }

    #[test]
    fn add_rejects_incomplete_form_without_mutation() {
        let mut store = InventoryStore::seeded();
        let err = store.add(&draft("")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn update_stock_clamps_and_ignores_unknown_ids() {
        let mut store = InventoryStore::seeded();

        store.update_stock(id(4), -10);
        assert_eq!(store.get(id(4)).unwrap().stock, 0);

        assert!(store.update_stock(id(999), 1).is_none());
    }

    #[test]
    fn snapshots_are_not_mutated_by_later_changes() {
        let mut store = InventoryStore::seeded();
        let snap = store.snapshot();

        store.update_stock(id(1), 10);

        assert_eq!(snap[0].stock, 25);
        assert_eq!(store.get(id(1)).unwrap().stock, 35);
    }

    #[test]
    fn edit_field_allows_duplicate_barcode_by_default() {
        let mut store = InventoryStore::seeded();
        let field = MedicineField::Barcode(Barcode::new("8901231234567"));

        let event = store.edit_field(id(2), field).unwrap();

        assert!(event.is_some());
        assert_eq!(store.get(id(2)).unwrap().barcode.as_str(), "8901231234567");
    }

    #[test]
    fn edit_field_rejects_duplicate_barcode_when_checked() {
        let mut store = InventoryStore::seeded().with_barcode_policy(BarcodePolicy::OnCreateAndEdit);
        let field = MedicineField::Barcode(Barcode::new("8901231234567"));

        let err = store.edit_field(id(2), field).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.get(id(2)).unwrap().barcode.as_str(), "8901231234568");
    }

    #[test]
    fn edit_field_keeping_own_barcode_is_not_a_duplicate() {
        let mut store = InventoryStore::seeded().with_barcode_policy(BarcodePolicy::OnCreateAndEdit);
        let field = MedicineField::Barcode(Barcode::new("8901231234568"));
        assert!(store.edit_field(id(2), field).unwrap().is_some());
    }

    #[test]
    fn edit_field_on_unknown_id_is_a_no_op() {
        let mut store = InventoryStore::seeded();
        let before = store.snapshot();
        let out = store.edit_field(id(42), MedicineField::Stock(1)).unwrap();
        assert!(out.is_none());
        assert_eq!(store.medicines(), before.as_slice());
    }

    #[test]
    fn delete_removes_the_record() {
        let mut store = InventoryStore::seeded();

        let event = store.delete(id(3)).unwrap();

        assert_eq!(store.len(), 5);
        assert!(store.get(id(3)).is_none());
        match event {
            InventoryEvent::MedicineDeleted(e) => assert_eq!(e.name, "Calendula"),
            other => panic!("Expected MedicineDeleted event, got {other:?}"),
        }
        assert!(store.delete(id(3)).is_none());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = InventoryStore::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        store.add_at(&draft("a"), now).unwrap();
        let first = store.medicines()[0].id;
        store.delete(first);

        store.add_at(&draft("b"), now).unwrap();

        assert!(store.medicines()[0].id > first);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: stock never goes negative, whatever the button sequence.
            #[test]
            fn update_stock_is_max_zero(
                start in 0u32..50,
                deltas in proptest::collection::vec(prop_oneof![Just(-1i64), Just(1i64), Just(10i64)], 0..40)
            ) {
                let mut store = InventoryStore::seeded();
                store.edit_field(id(1), MedicineField::Stock(start)).unwrap();

                let mut expected = i64::from(start);
                for delta in deltas {
                    store.update_stock(id(1), delta);
                    expected = (expected + delta).max(0);
                    prop_assert_eq!(i64::from(store.get(id(1)).unwrap().stock), expected);
                }
            }

            /// Property: a valid add with a fresh barcode grows the store by one.
            #[test]
            fn valid_add_grows_by_one(
                barcode in "[0-9]{6,13}",
                stock in "[-]?[0-9]{0,4}[a-z]{0,3}"
            ) {
                let mut store = InventoryStore::seeded();
                prop_assume!(store.find_by_barcode(&barcode).is_none());

                let mut d = draft(&barcode);
                d.stock = stock.clone();
                store.add(&d).unwrap();

                prop_assert_eq!(store.len(), 7);
                let expected = crate::draft::parse_form_int(&stock).unwrap_or(0).max(0);
                prop_assert_eq!(i64::from(store.medicines()[6].stock), expected);
            }
        }
    }
}
