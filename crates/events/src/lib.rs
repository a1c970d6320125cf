//! Domain events describing what changed in the inventory.

pub mod event;

pub use event::Event;
