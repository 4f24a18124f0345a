//! Best-effort viewer invocation.
//!
//! Opens an artifact in the platform default viewer. Failure is a warning,
//! never an error — generation already succeeded by the time this runs.

use std::path::Path;
use std::process::Command;

/// Try to open `path` in the platform default viewer.
pub fn open_artifact(path: &Path) {
    if let Err(err) = launch(path) {
        log::warn!("could not open {}: {err}", path.display());
    }
}

#[cfg(target_os = "macos")]
fn launch(path: &Path) -> std::io::Result<()> {
    Command::new("open").arg(path).spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn launch(path: &Path) -> std::io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map(|_| ())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launch(path: &Path) -> std::io::Result<()> {
    Command::new("xdg-open").arg(path).spawn().map(|_| ())
}
