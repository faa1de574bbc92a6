//! Process-wide run state.
//!
//! Two flags:
//! - `WATCHING`: Has the watch loop taken over? (graceful shutdown possible)
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)

use std::sync::atomic::{AtomicBool, Ordering};

/// Watch loop is running and polls [`is_shutdown`]
static WATCHING: AtomicBool = AtomicBool::new(false);

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

// =============================================================================
// WATCHING state
// =============================================================================

pub fn is_watching() -> bool {
    WATCHING.load(Ordering::SeqCst)
}

/// Mark the watch loop as running (or stopped)
pub fn set_watching(watching: bool) {
    WATCHING.store(watching, Ordering::SeqCst);
}

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - While watching: sets SHUTDOWN, the loop exits at its next tick
/// - Otherwise: exits immediately, a batch pass has nothing to wind down
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if is_watching() {
            crate::log!("watch"; "shutting down...");
        } else {
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
