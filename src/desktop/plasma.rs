use super::{WallpaperManager, check_output, command_exists};
use crate::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// KDE Plasma, driven through the plasmashell D-Bus scripting interface.
pub struct PlasmaManager {
    qdbus: &'static str,
}

impl PlasmaManager {
    pub fn new() -> Result<Self> {
        // Plasma 6 ships the tool as qdbus6.
        let qdbus = ["qdbus6", "qdbus"]
            .into_iter()
            .find(|tool| command_exists(tool))
            .ok_or_else(|| {
                Error::DesktopEnv("qdbus command not found. Please install qdbus.".to_string())
            })?;

        Ok(Self { qdbus })
    }

    pub fn is_available() -> bool {
        std::env::var("KDE_SESSION_VERSION").is_ok()
    }
}

fn wallpaper_script(path: &Path) -> String {
    let image = path.to_string_lossy().replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r#"
        var allDesktops = desktops();
        for (var i = 0; i < allDesktops.length; i++) {{
            var d = allDesktops[i];
            d.wallpaperPlugin = "org.kde.image";
            d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
            d.writeConfig("Image", "file://{}");
        }}
        "#,
        image
    )
}

impl WallpaperManager for PlasmaManager {
    fn name(&self) -> &'static str {
        "KDE Plasma"
    }

    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        info!("Setting Plasma wallpaper to {}", path.display());

        let output = Command::new(self.qdbus)
            .args([
                "org.kde.plasmashell",
                "/PlasmaShell",
                "org.kde.PlasmaShell.evaluateScript",
            ])
            .arg(wallpaper_script(path))
            .output()?;

        check_output(self.qdbus, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_every_desktop() {
        let script = wallpaper_script(Path::new("/cache/My_Pic.jpg"));
        assert!(script.contains("file:///cache/My_Pic.jpg"));
        assert!(script.contains("org.kde.image"));
        assert!(script.contains("desktops()"));
    }

    #[test]
    fn script_escapes_quotes() {
        let script = wallpaper_script(Path::new("/cache/a\"b.jpg"));
        assert!(script.contains(r#"file:///cache/a\"b.jpg"#));
    }
}
