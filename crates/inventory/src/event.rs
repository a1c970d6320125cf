use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use remedystock_core::MedicineId;
use remedystock_events::Event;

use crate::medicine::{Medicine, MedicineField};

/// What caused a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSource {
    /// -1 / +1 / +10 buttons.
    Manual,
    /// One unit received through the barcode intake.
    BarcodeScan,
}

/// Event: MedicineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineAdded {
    pub medicine: Medicine,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub medicine_id: MedicineId,
    pub delta: i64,
    pub old_stock: u32,
    pub new_stock: u32,
    pub source: AdjustmentSource,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FieldEdited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdited {
    pub medicine_id: MedicineId,
    pub field: MedicineField,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MedicineDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDeleted {
    pub medicine_id: MedicineId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    MedicineAdded(MedicineAdded),
    StockAdjusted(StockAdjusted),
    FieldEdited(FieldEdited),
    MedicineDeleted(MedicineDeleted),
}

impl InventoryEvent {
    pub fn medicine_id(&self) -> MedicineId {
        match self {
            InventoryEvent::MedicineAdded(e) => e.medicine.id,
            InventoryEvent::StockAdjusted(e) => e.medicine_id,
            InventoryEvent::FieldEdited(e) => e.medicine_id,
            InventoryEvent::MedicineDeleted(e) => e.medicine_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::MedicineAdded(_) => "inventory.medicine.added",
            InventoryEvent::StockAdjusted(_) => "inventory.medicine.stock_adjusted",
            InventoryEvent::FieldEdited(_) => "inventory.medicine.field_edited",
            InventoryEvent::MedicineDeleted(_) => "inventory.medicine.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::MedicineAdded(e) => e.occurred_at,
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
            InventoryEvent::FieldEdited(e) => e.occurred_at,
            InventoryEvent::MedicineDeleted(e) => e.occurred_at,
        }
    }
}
