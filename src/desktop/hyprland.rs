use super::{WallpaperManager, check_output, command_exists};
use crate::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Hyprpaper,
    Swww,
    Swaybg,
}

impl Tool {
    const ALL: [Tool; 3] = [Tool::Hyprpaper, Tool::Swww, Tool::Swaybg];

    fn binary(self) -> &'static str {
        match self {
            Tool::Hyprpaper => "hyprpaper",
            Tool::Swww => "swww",
            Tool::Swaybg => "swaybg",
        }
    }
}

/// Hyprland, using whichever of hyprpaper, swww or swaybg is installed.
/// Tools are tried in that order until one succeeds.
pub struct HyprlandManager {
    tools: Vec<Tool>,
}

impl HyprlandManager {
    pub fn new() -> Result<Self> {
        let tools: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|tool| command_exists(tool.binary()))
            .collect();

        if tools.is_empty() {
            return Err(Error::DesktopEnv(
                "No supported wallpaper tool found. Please install one of hyprpaper, swww, or swaybg."
                    .to_string(),
            ));
        }

        Ok(Self { tools })
    }

    pub fn is_available() -> bool {
        std::env::var("HYPRLAND_INSTANCE_SIGNATURE").is_ok()
            || Command::new("hyprctl").arg("version").output().is_ok()
    }

    fn apply(tool: Tool, path: &Path) -> Result<()> {
        match tool {
            Tool::Hyprpaper => {
                let output = Command::new("hyprctl")
                    .args(["hyprpaper", "preload"])
                    .arg(path)
                    .output()?;
                check_output("hyprctl hyprpaper preload", output)?;

                // An empty monitor name applies the image to every monitor.
                let target = format!(",{}", path.to_string_lossy());
                let output = Command::new("hyprctl")
                    .args(["hyprpaper", "wallpaper", target.as_str()])
                    .output()?;
                check_output("hyprctl hyprpaper wallpaper", output)
            }
            Tool::Swww => {
                let output = Command::new("swww")
                    .arg("img")
                    .arg(path)
                    .args(["-t", "grow"])
                    .output()?;
                check_output("swww img", output)
            }
            Tool::Swaybg => {
                // swaybg keeps running for as long as the wallpaper is shown.
                Command::new("swaybg")
                    .arg("-i")
                    .arg(path)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()?;
                Ok(())
            }
        }
    }
}

impl WallpaperManager for HyprlandManager {
    fn name(&self) -> &'static str {
        "Hyprland"
    }

    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        for tool in &self.tools {
            info!("Setting wallpaper to {} with {}", path.display(), tool.binary());
            match Self::apply(*tool, path) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("{} failed: {}", tool.binary(), e),
            }
        }

        Err(Error::DesktopEnv(
            "Failed to set wallpaper with any of the installed tools (hyprpaper, swww, swaybg)"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_are_tried_in_preference_order() {
        assert_eq!(
            Tool::ALL.map(Tool::binary),
            ["hyprpaper", "swww", "swaybg"]
        );
    }
}
