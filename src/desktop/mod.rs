use crate::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub mod hyprland;
pub mod plasma;

/// Sets the desktop background through the host's desktop environment.
pub trait WallpaperManager {
    fn name(&self) -> &'static str;
    fn set_wallpaper(&self, path: &Path) -> Result<()>;
}

/// Picks a backend from `XDG_CURRENT_DESKTOP`, probing for a running
/// session when the variable is unset or unknown.
pub fn get_wallpaper_manager() -> Result<Box<dyn WallpaperManager>> {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    debug!("XDG_CURRENT_DESKTOP={:?}", desktop);

    // The variable may hold a colon separated list, e.g. "KDE:plasma".
    for name in desktop.split(':').map(str::to_lowercase) {
        match name.as_str() {
            "hyprland" => return Ok(Box::new(hyprland::HyprlandManager::new()?)),
            "kde" | "plasma" => return Ok(Box::new(plasma::PlasmaManager::new()?)),
            _ => {}
        }
    }

    if hyprland::HyprlandManager::is_available() {
        Ok(Box::new(hyprland::HyprlandManager::new()?))
    } else if plasma::PlasmaManager::is_available() {
        Ok(Box::new(plasma::PlasmaManager::new()?))
    } else {
        Err(Error::DesktopEnv(format!(
            "No supported desktop environment found (XDG_CURRENT_DESKTOP={:?}); \
             supported are KDE Plasma and Hyprland",
            desktop
        )))
    }
}

pub(crate) fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Turns a finished command into a `DesktopEnv` error carrying its stderr.
pub(crate) fn check_output(tool: &str, output: std::process::Output) -> Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        Err(Error::DesktopEnv(format!(
            "{} failed ({}): {}",
            tool,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
