//! User action handlers.
//!
//! Each handler takes the session by reference plus whichever collaborator it
//! needs, runs synchronously, and reports rejected input through the notifier.

use remedystock_core::MedicineId;
use remedystock_inventory::{CategoryFilter, MedicineDraft, MedicineField, ScanOutcome, process_scan};

use crate::prompt::{ConfirmPrompt, Notifier};
use crate::session::Session;
use crate::state::UiState;

/// Text of the delete confirmation question.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this medicine?";

/// Per-record stock buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockButton {
    Decrement,
    Increment,
    BulkIncrement,
}

impl StockButton {
    pub fn delta(self) -> i64 {
        match self {
            StockButton::Decrement => -1,
            StockButton::Increment => 1,
            StockButton::BulkIncrement => 10,
        }
    }
}

pub fn set_search(ui: &mut UiState, term: impl Into<String>) {
    ui.search_term = term.into();
}

pub fn select_category(ui: &mut UiState, category: CategoryFilter) {
    ui.category = category;
}

pub fn toggle_add_form(ui: &mut UiState) {
    ui.show_add_form = !ui.show_add_form;
}

pub fn toggle_low_stock(ui: &mut UiState) {
    ui.show_low_stock = !ui.show_low_stock;
}

pub fn toggle_scanner(ui: &mut UiState) {
    ui.show_scanner = !ui.show_scanner;
}

/// Submit the add form. On success the form is reset and closed.
pub fn submit_new_medicine(
    session: &mut Session,
    notifier: &mut dyn Notifier,
) -> Option<MedicineId> {
    match session.store.add(&session.ui.draft) {
        Ok(event) => {
            session.record(&event);
            session.ui.draft = MedicineDraft::default();
            session.ui.show_add_form = false;
            Some(event.medicine_id())
        }
        Err(err) => {
            tracing::warn!(error = %err, "add medicine rejected");
            notifier.notify(&err.user_message());
            None
        }
    }
}

/// Apply a stock button. Returns `false` when the record does not exist.
pub fn press_stock_button(session: &mut Session, id: MedicineId, button: StockButton) -> bool {
    adjust_stock(session, id, button.delta())
}

pub fn adjust_stock(session: &mut Session, id: MedicineId, delta: i64) -> bool {
    match session.store.update_stock(id, delta) {
        Some(event) => {
            session.record(&event);
            true
        }
        None => false,
    }
}

/// Put `id` into edit mode (switching away from any other record).
pub fn begin_edit(session: &mut Session, id: MedicineId) -> bool {
    if session.store.get(id).is_none() {
        return false;
    }
    session.ui.edit.begin(id);
    true
}

pub fn finish_edit(ui: &mut UiState) {
    ui.edit.finish();
}

/// Apply one inline edit immediately.
pub fn edit_field(
    session: &mut Session,
    id: MedicineId,
    field: MedicineField,
    notifier: &mut dyn Notifier,
) -> bool {
    match session.store.edit_field(id, field) {
        Ok(Some(event)) => {
            session.record(&event);
            true
        }
        Ok(None) => false,
        Err(err) => {
            notifier.notify(&err.user_message());
            false
        }
    }
}

/// Ask, then delete. Nothing happens (and nothing is reported) when the user
/// declines or the record is already gone.
pub fn delete_medicine(
    session: &mut Session,
    id: MedicineId,
    prompt: &mut dyn ConfirmPrompt,
) -> bool {
    if session.store.get(id).is_none() {
        return false;
    }
    if !prompt.confirm(DELETE_CONFIRMATION) {
        tracing::debug!(%id, "delete declined");
        return false;
    }
    let Some(event) = session.store.delete(id) else {
        return false;
    };
    session.record(&event);
    if session.ui.edit.is_editing(id) {
        session.ui.edit.finish();
    }
    true
}

/// Process whatever is in the scanner input. The input is cleared whatever
/// the outcome; a processed scan goes to the timed result panel.
pub fn submit_scan(session: &mut Session, notifier: &mut dyn Notifier) -> Option<ScanOutcome> {
    let raw = std::mem::take(&mut session.ui.scanner_input);

    match process_scan(&mut session.store, &raw) {
        Ok(receipt) => {
            if let Some(event) = &receipt.event {
                session.record(event);
            }
            session.scan_display_mut().show(receipt.outcome.clone());
            Some(receipt.outcome)
        }
        Err(err) => {
            notifier.notify(&err.user_message());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{FixedAnswer, NotificationLog};
    use crate::settings::Settings;
    use remedystock_inventory::Category;
    use tokio::runtime::Runtime;

    fn session() -> (Runtime, Session) {
        let rt = Runtime::new().unwrap();
        let session = Session::new(&Settings::default(), rt.handle().clone());
        (rt, session)
    }

    fn id(raw: i64) -> MedicineId {
        MedicineId::from_raw(raw)
    }

    #[test]
    fn successful_add_resets_and_closes_the_form() {
        let (_rt, mut s) = session();
        let mut notes = NotificationLog::default();
        s.ui.show_add_form = true;
        s.ui.draft = MedicineDraft {
            name: "Sulphur".to_string(),
            potency: "200".to_string(),
            company: "SBL".to_string(),
            category: Category::Tablets,
            stock: "4".to_string(),
            barcode: "8901231239999".to_string(),
            ..MedicineDraft::default()
        };

        let new_id = submit_new_medicine(&mut s, &mut notes).unwrap();

        assert_eq!(s.store.get(new_id).unwrap().stock, 4);
        assert_eq!(s.ui.draft, MedicineDraft::default());
        assert!(!s.ui.show_add_form);
        assert!(notes.messages.is_empty());
    }

    #[test]
    fn rejected_add_keeps_the_form_and_notifies() {
        let (_rt, mut s) = session();
        let mut notes = NotificationLog::default();
        s.ui.show_add_form = true;
        s.ui.draft.name = "Sulphur".to_string();

        assert!(submit_new_medicine(&mut s, &mut notes).is_none());

        assert_eq!(s.store.len(), 6);
        assert!(s.ui.show_add_form);
        assert_eq!(s.ui.draft.name, "Sulphur");
        assert_eq!(
            notes.messages,
            vec!["Please fill in all required fields including barcode!"]
        );
    }

    #[test]
    fn panel_toggles_flip_independently() {
        let mut ui = UiState::default();
        toggle_add_form(&mut ui);
        toggle_scanner(&mut ui);
        toggle_scanner(&mut ui);
        toggle_low_stock(&mut ui);

        assert!(ui.show_add_form);
        assert!(!ui.show_scanner);
        assert!(ui.show_low_stock);
    }

    #[test]
    fn stock_buttons_apply_their_delta() {
        let (_rt, mut s) = session();
        assert!(press_stock_button(&mut s, id(4), StockButton::BulkIncrement));
        assert!(press_stock_button(&mut s, id(4), StockButton::Decrement));
        assert_eq!(s.store.get(id(4)).unwrap().stock, 14);
        assert!(!press_stock_button(&mut s, id(77), StockButton::Increment));
    }

    #[test]
    fn declined_delete_changes_nothing_and_says_nothing() {
        let (_rt, mut s) = session();
        assert!(!delete_medicine(&mut s, id(3), &mut FixedAnswer(false)));
        assert_eq!(s.store.len(), 6);
    }

    #[test]
    fn confirmed_delete_leaves_edit_mode_for_that_record() {
        let (_rt, mut s) = session();
        assert!(begin_edit(&mut s, id(3)));

        assert!(delete_medicine(&mut s, id(3), &mut FixedAnswer(true)));

        assert!(s.store.get(id(3)).is_none());
        assert_eq!(s.store.len(), 5);
        assert_eq!(s.ui.edit.editing_id(), None);
    }

    #[test]
    fn begin_edit_on_unknown_record_is_refused() {
        let (_rt, mut s) = session();
        assert!(!begin_edit(&mut s, id(99)));
        assert_eq!(s.ui.edit.editing_id(), None);
    }

    #[test]
    fn inline_edit_applies_immediately() {
        let (_rt, mut s) = session();
        let mut notes = NotificationLog::default();
        begin_edit(&mut s, id(1));

        assert!(edit_field(&mut s, id(1), MedicineField::Name("Arnica".into()), &mut notes));

        assert_eq!(s.store.get(id(1)).unwrap().name, "Arnica");
    }

    #[test]
    fn scan_clears_input_and_shows_result() {
        let (_rt, mut s) = session();
        let mut notes = NotificationLog::default();
        s.ui.scanner_input = "8901231234567".to_string();

        let outcome = submit_scan(&mut s, &mut notes).unwrap();

        assert!(outcome.is_found());
        assert!(s.ui.scanner_input.is_empty());
        assert_eq!(s.scan_result(), Some(outcome));
        assert_eq!(s.store.get(id(1)).unwrap().stock, 26);
    }

    #[test]
    fn empty_scan_notifies_and_clears_input() {
        let (_rt, mut s) = session();
        let mut notes = NotificationLog::default();
        s.ui.scanner_input = "   ".to_string();

        assert!(submit_scan(&mut s, &mut notes).is_none());

        assert!(s.ui.scanner_input.is_empty());
        assert_eq!(s.scan_result(), None);
        assert_eq!(notes.messages, vec!["Please enter or scan a barcode!"]);
    }
}
