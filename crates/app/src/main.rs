use anyhow::Context;

use remedystock_app::{Console, Session, Settings};

fn main() -> anyhow::Result<()> {
    remedystock_observability::init(Settings::log_format_from_env());

    let settings = Settings::from_env();
    tracing::debug!(?settings, "settings loaded");

    // Only the scan-result timers run on the runtime; the console stays on
    // this thread.
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let mut session = Session::new(&settings, runtime.handle().clone());
    tracing::info!(medicines = session.store.len(), "inventory loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    console.run(&mut session)?;

    drop(console);
    drop(session);
    Ok(())
}
