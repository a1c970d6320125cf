//! UI state owned by the presentation layer.

use serde::{Deserialize, Serialize};

use remedystock_core::MedicineId;
use remedystock_inventory::{CategoryFilter, MedicineDraft, ViewFilter};

/// Which record, if any, shows inline edit inputs.
///
/// At most one record is in edit mode. Starting an edit on another record
/// simply moves the marker; edits are applied as they happen, so nothing is
/// lost by switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing(MedicineId),
}

impl EditMode {
    pub fn begin(&mut self, id: MedicineId) {
        *self = EditMode::Editing(id);
    }

    pub fn finish(&mut self) {
        *self = EditMode::Viewing;
    }

    pub fn editing_id(&self) -> Option<MedicineId> {
        match self {
            EditMode::Viewing => None,
            EditMode::Editing(id) => Some(*id),
        }
    }

    pub fn is_editing(&self, id: MedicineId) -> bool {
        self.editing_id() == Some(id)
    }
}

/// Everything the screen remembers between interactions, apart from the
/// inventory itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub search_term: String,
    pub category: CategoryFilter,
    pub edit: EditMode,
    pub show_add_form: bool,
    pub show_low_stock: bool,
    pub show_scanner: bool,
    pub scanner_input: String,
    pub draft: MedicineDraft,
}

impl UiState {
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter::new(self.search_term.clone(), self.category)
    }
}
