//! Barcode intake: every successful scan receives one unit into stock.

use serde::Serialize;

use remedystock_core::{DomainError, DomainResult, MedicineId};

use crate::event::{AdjustmentSource, InventoryEvent};
use crate::medicine::Category;
use crate::store::InventoryStore;

/// Notification text for a scan submitted with nothing in the input.
pub const EMPTY_SCAN_MESSAGE: &str = "Please enter or scan a barcode!";

/// Result panel contents after a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ScanPayload")]
pub enum ScanOutcome {
    Found {
        medicine_id: MedicineId,
        name: String,
        potency: String,
        company: String,
        category: Category,
        old_stock: u32,
        new_stock: u32,
    },
    NotFound { barcode: String },
}

/// Flat wire shape of a [`ScanOutcome`]: `{"found": true, ...}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanPayload {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    medicine_id: Option<MedicineId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    potency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    barcode: Option<String>,
}

impl From<ScanOutcome> for ScanPayload {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Found {
                medicine_id,
                name,
                potency,
                company,
                category,
                old_stock,
                new_stock,
            } => ScanPayload {
                found: true,
                medicine_id: Some(medicine_id),
                name: Some(name),
                potency: Some(potency),
                company: Some(company),
                category: Some(category),
                old_stock: Some(old_stock),
                new_stock: Some(new_stock),
                barcode: None,
            },
            ScanOutcome::NotFound { barcode } => ScanPayload {
                found: false,
                medicine_id: None,
                name: None,
                potency: None,
                company: None,
                category: None,
                old_stock: None,
                new_stock: None,
                barcode: Some(barcode),
            },
        }
    }
}

impl ScanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ScanOutcome::Found { .. })
    }

    /// One-line message for the result panel.
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Found {
                name,
                potency,
                company,
                ..
            } => format!("Stock updated: {name} ({potency}) - {company}"),
            ScanOutcome::NotFound { .. } => {
                "Medicine not found. Please add this medicine first.".to_string()
            }
        }
    }
}

/// A processed scan plus the stock change it caused, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReceipt {
    pub outcome: ScanOutcome,
    pub event: Option<InventoryEvent>,
}

/// Look up `raw` (trimmed) and receive one unit of the matching medicine.
///
/// Empty input fails validation without touching the store. Unknown barcodes
/// produce [`ScanOutcome::NotFound`] and leave the store unchanged.
pub fn process_scan(store: &mut InventoryStore, raw: &str) -> DomainResult<ScanReceipt> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(DomainError::validation(EMPTY_SCAN_MESSAGE));
    }

    let Some(hit) = store.find_by_barcode(code).cloned() else {
        tracing::info!(barcode = code, "scan: no matching medicine");
        return Ok(ScanReceipt {
            outcome: ScanOutcome::NotFound {
                barcode: code.to_string(),
            },
            event: None,
        });
    };

    let event = store.adjust(hit.id, 1, AdjustmentSource::BarcodeScan);
    let new_stock = store.get(hit.id).map_or(hit.stock, |m| m.stock);

    tracing::info!(barcode = code, id = %hit.id, old_stock = hit.stock, new_stock, "scan: stock received");

    Ok(ScanReceipt {
        outcome: ScanOutcome::Found {
            medicine_id: hit.id,
            name: hit.name,
            potency: hit.potency,
            company: hit.company,
            category: hit.category,
            old_stock: hit.stock,
            new_stock,
        },
        event,
    })
}
