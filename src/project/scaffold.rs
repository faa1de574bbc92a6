//! Destination project preparation.
//!
//! A missing destination is generated with the configured scaffold command
//! (destination appended as the last argument). An existing destination must
//! already hold the `src/` directory generated modules are written into.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::log;
use crate::transpile::TranspileError;

/// Make sure `<destination>/src` exists, scaffolding the project if needed.
pub fn ensure_destination(config: &Config) -> Result<(), TranspileError> {
    let destination = config.destination_dir();
    let output = config.output_dir();

    if destination.exists() {
        if !output.is_dir() {
            return Err(TranspileError::Scaffold {
                path: destination.to_path_buf(),
                reason: "missing `src` directory".into(),
            });
        }
        return Ok(());
    }

    if !config.scaffold.enable {
        return fs::create_dir_all(&output).map_err(|e| TranspileError::io(&output, e));
    }

    run_scaffold(&config.scaffold.command, destination)?;
    if !output.is_dir() {
        return Err(TranspileError::Scaffold {
            path: destination.to_path_buf(),
            reason: "scaffold command did not create a `src` directory".into(),
        });
    }
    Ok(())
}

/// Run the scaffold command with inherited stdio.
fn run_scaffold(command: &[String], destination: &Path) -> Result<(), TranspileError> {
    let scaffold_error = |reason: String| TranspileError::Scaffold {
        path: destination.to_path_buf(),
        reason,
    };

    let Some((program, args)) = command.split_first() else {
        return Err(scaffold_error("empty scaffold command".into()));
    };
    let program_path =
        which::which(program).map_err(|_| scaffold_error(format!("`{program}` not found in PATH")))?;

    let cwd = destination.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(cwd).map_err(|e| TranspileError::io(cwd, e))?;

    log!("scaffold"; "{} {} {}", program, args.join(" "), destination.display());
    let status = Command::new(program_path)
        .args(args)
        .arg(destination)
        .current_dir(cwd)
        .status()
        .map_err(|e| TranspileError::io(destination, e))?;

    if !status.success() {
        return Err(scaffold_error(format!("`{program}` exited with {status}")));
    }
    Ok(())
}
