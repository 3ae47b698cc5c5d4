use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use super::{file_uri, Background};

/// swww transition settings
#[derive(Debug, Clone)]
pub struct SwwwBackground {
    pub transition_type: String,
    pub duration: f32,
    pub fps: u32,
}

impl Default for SwwwBackground {
    fn default() -> Self {
        Self {
            transition_type: "fade".to_string(),
            duration: 1.0,
            fps: 60,
        }
    }
}

/// Start the swww daemon if it is not running
fn ensure_daemon() -> Result<()> {
    let status = Command::new("swww").arg("query").output();

    match status {
        Ok(output) if output.status.success() => Ok(()),
        _ => {
            Command::new("swww-daemon")
                .spawn()
                .context("Failed to start swww-daemon")?;

            // Give it a moment to initialize
            std::thread::sleep(std::time::Duration::from_millis(100));
            Ok(())
        }
    }
}

impl Background for SwwwBackground {
    fn current_uri(&self) -> Result<String> {
        let output = Command::new("swww")
            .arg("query")
            .output()
            .context("Failed to run swww query")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("swww query failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = parse_query_image(&stdout)
            .ok_or_else(|| anyhow!("swww is not displaying an image"))?;
        file_uri(&path)
    }

    fn set_current(&self, path: &Path) -> Result<()> {
        ensure_daemon()?;
        debug!(path = %path.display(), "setting swww background");

        let output = Command::new("swww")
            .arg("img")
            .arg(path)
            .arg("--transition-type")
            .arg(&self.transition_type)
            .arg("--transition-duration")
            .arg(self.duration.to_string())
            .arg("--transition-fps")
            .arg(self.fps.to_string())
            .output()
            .context("Failed to run swww")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("swww failed: {}", stderr);
        }

        Ok(())
    }
}

/// Image shown on the first output listed by `swww query`.
///
/// Lines look like `eDP-1: 1920x1080, scale: 1, currently displaying: image: /path`.
fn parse_query_image(stdout: &str) -> Option<PathBuf> {
    stdout.lines().find_map(|line| {
        let (_, path) = line.split_once("image: ")?;
        let path = path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    })
}
