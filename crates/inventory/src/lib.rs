//! Inventory domain module.
//!
//! This crate contains the business rules for the medicine inventory,
//! implemented as deterministic domain logic (no IO, no presentation).

pub mod barcode;
pub mod draft;
pub mod event;
pub mod filter;
pub mod medicine;
pub mod seed;
pub mod store;

pub use barcode::{ScanOutcome, ScanReceipt, process_scan};
pub use draft::{MedicineDraft, NewMedicine, parse_form_int};
pub use event::{
    AdjustmentSource, FieldEdited, InventoryEvent, MedicineAdded, MedicineDeleted, StockAdjusted,
};
pub use filter::{CategoryFilter, InventorySummary, ViewFilter, low_stock, summarize};
pub use medicine::{Barcode, Category, DEFAULT_LOW_STOCK_THRESHOLD, Medicine, MedicineField};
pub use seed::seed_medicines;
pub use store::{BarcodePolicy, InventoryStore};
