//! One running screen: the inventory, its UI state, and the scan result panel.

use tokio::runtime::Handle;

use remedystock_events::Event;
use remedystock_inventory::{InventoryEvent, InventoryStore, ScanOutcome};

use crate::scan_display::ScanResultDisplay;
use crate::settings::Settings;
use crate::state::UiState;

#[derive(Debug)]
pub struct Session {
    pub store: InventoryStore,
    pub ui: UiState,
    scan_display: ScanResultDisplay,
}

impl Session {
    /// `runtime` drives the scan-result timer; it must outlive the session.
    pub fn new(settings: &Settings, runtime: Handle) -> Self {
        let store = if settings.seed {
            InventoryStore::seeded()
        } else {
            InventoryStore::new()
        };
        Self::with_store(
            store.with_barcode_policy(settings.barcode_policy),
            settings,
            runtime,
        )
    }

    pub fn with_store(store: InventoryStore, settings: &Settings, runtime: Handle) -> Self {
        Self {
            store,
            ui: UiState::default(),
            scan_display: ScanResultDisplay::new(runtime, settings.scan_result_window),
        }
    }

    /// Scan result currently on screen.
    pub fn scan_result(&self) -> Option<ScanOutcome> {
        self.scan_display.current()
    }

    pub(crate) fn scan_display_mut(&mut self) -> &mut ScanResultDisplay {
        &mut self.scan_display
    }

    /// Log an inventory change.
    pub(crate) fn record(&self, event: &InventoryEvent) {
        tracing::info!(
            event_type = event.event_type(),
            version = event.version(),
            medicine_id = %event.medicine_id(),
            occurred_at = %event.occurred_at(),
            "inventory changed"
        );
    }
}
