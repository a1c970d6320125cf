//! `remedystock-app`
//!
//! **Responsibility:** the interactive shell around the inventory domain.
//!
//! This crate provides:
//! - UI state owned by the presentation layer (`UiState`, `EditMode`)
//! - Handler functions binding user actions to the store
//! - Timed display of barcode scan results (cancellable)
//! - Environment-driven settings
//! - A line-oriented console front end

pub mod console;
pub mod handlers;
pub mod prompt;
pub mod scan_display;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;

pub use console::{Command, Console};
pub use prompt::{ConfirmPrompt, Notifier};
pub use scan_display::ScanResultDisplay;
pub use session::Session;
pub use settings::Settings;
pub use state::{EditMode, UiState};
pub use view::{InventoryView, RowView};
