use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use super::{file_uri, Background};

const SCHEMA: &str = "org.gnome.desktop.background";

/// GNOME desktop, driven through `gsettings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GnomeBackground;

impl Background for GnomeBackground {
    fn current_uri(&self) -> Result<String> {
        let output = Command::new("gsettings")
            .arg("get")
            .arg(SCHEMA)
            .arg("picture-uri")
            .output()
            .context("run gsettings (get picture-uri)")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("gsettings failed (get picture-uri): {}", stderr.trim()));
        }
        Ok(parse_gsettings_string(&String::from_utf8_lossy(&output.stdout)))
    }

    fn set_current(&self, path: &Path) -> Result<()> {
        let uri = file_uri(path)?;
        debug!(%uri, "setting GNOME background");

        let status = Command::new("gsettings")
            .arg("set")
            .arg(SCHEMA)
            .arg("picture-uri")
            .arg(&uri)
            .status()
            .context("run gsettings (picture-uri)")?;
        if !status.success() {
            return Err(anyhow!("gsettings failed (picture-uri)"));
        }

        // GNOME 42+ keeps a separate dark-mode picture; older versions lack the key.
        let dark = Command::new("gsettings")
            .arg("set")
            .arg(SCHEMA)
            .arg("picture-uri-dark")
            .arg(&uri)
            .status();
        if let Some(reason) = failure_reason(&dark) {
            debug!(%reason, "picture-uri-dark not updated");
        }

        Ok(())
    }
}

/// Why a `gsettings` run did not succeed, if it didn't.
fn failure_reason(result: &io::Result<ExitStatus>) -> Option<String> {
    match result {
        Ok(status) if status.success() => None,
        Ok(status) => Some(format!("gsettings exited with {status}")),
        Err(e) => Some(e.to_string()),
    }
}

/// `gsettings get` prints GVariant text: strings come single-quoted.
fn parse_gsettings_string(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_gvariant_quotes() {
        assert_eq!(
            parse_gsettings_string("'file:///pics/fresh/anime/wallhaven-a-sfw.jpg'\n"),
            "file:///pics/fresh/anime/wallhaven-a-sfw.jpg"
        );
        assert_eq!(parse_gsettings_string("file:///x.jpg"), "file:///x.jpg");
    }

    #[cfg(unix)]
    #[test]
    fn dark_key_failures_are_described() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(failure_reason(&Ok(ExitStatus::from_raw(0))), None);
        let exited = failure_reason(&Ok(ExitStatus::from_raw(1 << 8))).unwrap();
        assert!(exited.contains("gsettings exited"));
        let missing = io::Error::new(io::ErrorKind::NotFound, "gsettings not found");
        assert_eq!(
            failure_reason(&Err(missing)).as_deref(),
            Some("gsettings not found")
        );
    }
}
