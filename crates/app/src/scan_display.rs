//! Timed display of the latest barcode scan result.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use remedystock_inventory::ScanOutcome;

/// How long a scan result stays on screen unless configured otherwise.
pub const DEFAULT_SCAN_RESULT_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    outcome: Option<ScanOutcome>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the scan result panel and clears it after a fixed window.
///
/// - A new result replaces the old one and restarts the window (the previous
///   clear task is aborted).
/// - Dropping the display aborts any pending clear.
/// - The clear task only holds a `Weak` to the slot and checks a generation
///   counter, so a task that already woke up cannot wipe a newer result.
#[derive(Debug)]
pub struct ScanResultDisplay {
    slot: Arc<Mutex<Slot>>,
    pending: Option<JoinHandle<()>>,
    runtime: Handle,
    window: Duration,
}

impl ScanResultDisplay {
    pub fn new(runtime: Handle, window: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            pending: None,
            runtime,
            window,
        }
    }

    /// The result currently on screen, if the window has not elapsed.
    pub fn current(&self) -> Option<ScanOutcome> {
        lock(&self.slot).outcome.clone()
    }

    /// Whether a clear is scheduled and has not run yet.
    pub fn has_pending_clear(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Put `outcome` on screen and schedule its removal.
    pub fn show(&mut self, outcome: ScanOutcome) {
        self.cancel_pending();

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.outcome = Some(outcome);
            slot.generation
        };

        let slot = Arc::downgrade(&self.slot);
        let window = self.window;
        self.pending = Some(self.runtime.spawn(clear_after(slot, generation, window)));
    }

    /// Remove the result now and drop the scheduled clear.
    pub fn clear(&mut self) {
        self.cancel_pending();
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        slot.outcome = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for ScanResultDisplay {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn clear_after(slot: Weak<Mutex<Slot>>, generation: u64, window: Duration) {
    tokio::time::sleep(window).await;

    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut slot = lock(&slot);
    if slot.generation == generation {
        slot.outcome = None;
        tracing::debug!(generation, "scan result cleared");
    }
}
