//! Watch mode.
//!
//! ```text
//! notify watcher → Debouncer (pure timing) → EventClassifier → WatchPlan → passes
//! ```
//!
//! The watcher starts before the initial pass so no change is lost while it
//! runs. Every failure is reported on the status line and the loop goes on;
//! only Ctrl+C ends it.

mod classifier;
mod debouncer;
mod types;


use std::error::Error;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};

use crate::config::Config;
use crate::core::{is_shutdown, set_watching};
use crate::logger::{status_error, status_success, status_warning};
use crate::project::{self, BuildReport, assets};
use crate::transpile::{AttributeRenameTable, TranspileContext};
use crate::utils::path::route::to_slash;
use crate::{debug, log};

use classifier::EventClassifier;
use debouncer::Debouncer;
use types::WatchPlan;

/// Upper bound on one wait, so shutdown requests are noticed.
const TICK: Duration = Duration::from_millis(100);

/// Run an initial pass, then re-run on every settled change.
pub fn watch(config: &Config) -> Result<()> {
    let source = config.source_dir();
    project::check_source(config)?;

    let (notify_tx, notify_rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })
    .context("Failed to create file watcher")?;
    watcher
        .watch(source, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch '{}'", source.display()))?;

    set_watching(true);
    let table = config.rename_table();
    rebuild(config);

    log!("watch"; "watching {} (debounce {}ms)", source.display(), config.watch.debounce_ms);
    let mut debouncer = Debouncer::new(config.watch.debounce());

    while !is_shutdown() {
        match notify_rx.recv_timeout(debouncer.sleep_duration().min(TICK)) {
            Ok(Ok(event)) => debouncer.add_event(&event),
            Ok(Err(e)) => log!("watch"; "notify error: {}", e),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let Some(changes) = debouncer.take_if_ready() else {
            continue;
        };
        if let Some(plan) = EventClassifier::classify(changes, config) {
            apply(&plan, config, &table);
        }
    }

    set_watching(false);
    Ok(())
}

/// Carry out one plan. Errors end up on the status line.
fn apply(plan: &WatchPlan, config: &Config, table: &AttributeRenameTable) {
    debug!("watch"; "{:?}", plan);
    let output = config.output_dir();

    for relative in &plan.remove {
        match assets::remove_asset(&output.join(relative)) {
            Ok(()) => status_success(&format!("removed: {}", to_slash(relative))),
            Err(e) => status_error(&format!("failed: {}", to_slash(relative)), &describe(&e)),
        }
    }

    for relative in &plan.stale {
        let module = TranspileContext::new(config.source_dir(), &output, relative.as_path(), false)
            .output_path();
        if let Err(e) = assets::remove_asset(&module) {
            status_warning(&describe(&e));
        }
    }

    if plan.rebuild {
        rebuild(config);
        return;
    }

    for relative in &plan.convert {
        match project::convert_document(config, table, relative) {
            Ok(_) => status_success(&format!("converted: {}", to_slash(relative))),
            Err(e) => status_error(&format!("failed: {}", to_slash(relative)), &describe(&e)),
        }
    }

    for relative in &plan.copy {
        let source = config.source_dir().join(relative);
        match assets::copy_asset(&source, &output.join(relative)) {
            Ok(_) => status_success(&format!("copied: {}", to_slash(relative))),
            Err(e) => status_error(&format!("failed: {}", to_slash(relative)), &describe(&e)),
        }
    }
}

/// Full pass, reported on the status line.
fn rebuild(config: &Config) {
    match project::run_batch(config) {
        Ok(report) => report_status(&report),
        Err(e) => status_error("build failed", &describe(&e)),
    }
}

fn report_status(report: &BuildReport) {
    match report.failures.first() {
        None => status_success(&format!("rebuilt: {}", report.summary())),
        Some(first) => status_error(
            &format!("rebuilt with errors: {}", report.summary()),
            &format!("{}: {}", to_slash(&first.path), describe(&first.error)),
        ),
    }
}

/// Error message followed by its source chain.
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    message
}
