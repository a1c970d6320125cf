//! What the screen shows, derived fresh from the session on every render.

use serde::Serialize;

use remedystock_inventory::{
    CategoryFilter, InventorySummary, Medicine, ScanOutcome, low_stock, summarize,
};

use crate::session::Session;

/// Shown in place of the list when the filter matches nothing.
pub const EMPTY_LIST_MESSAGE: &str = "No medicines found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub medicine: Medicine,
    pub low_stock: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub search_term: String,
    pub category: CategoryFilter,
    pub rows: Vec<RowView>,
    pub low_stock: Vec<Medicine>,
    pub summary: InventorySummary,
    pub show_add_form: bool,
    pub show_low_stock: bool,
    pub show_scanner: bool,
    pub scan_result: Option<ScanOutcome>,
}

impl InventoryView {
    pub fn build(session: &Session) -> Self {
        let ui = &session.ui;
        let medicines = session.store.medicines();

        let rows = ui
            .view_filter()
            .apply(medicines)
            .into_iter()
            .map(|m| RowView {
                medicine: m.clone(),
                low_stock: m.is_low_stock(),
                editing: ui.edit.is_editing(m.id),
            })
            .collect();

        Self {
            search_term: ui.search_term.clone(),
            category: ui.category,
            rows,
            low_stock: low_stock(medicines).into_iter().cloned().collect(),
            summary: summarize(medicines),
            show_add_form: ui.show_add_form,
            show_low_stock: ui.show_low_stock,
            show_scanner: ui.show_scanner,
            scan_result: session.scan_result(),
        }
    }

    /// Badge number on the low-stock toggle.
    pub fn low_stock_badge(&self) -> Option<usize> {
        (!self.low_stock.is_empty()).then_some(self.low_stock.len())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_LIST_MESSAGE)
    }
}
