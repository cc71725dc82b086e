//! Best-effort "open this link in the default browser".

use std::process::{Command, Stdio};

use url::Url;

use crate::error::{Result, ViewerError};

/// Only web links are handed to the OS.
pub fn validate(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| ViewerError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ViewerError::InvalidUrl(url.to_string())),
    }
}

/// Spawn the platform opener without waiting for it. Failures are logged and
/// reported as `false`, never raised.
pub fn open_url(url: &str) -> bool {
    let url = match validate(url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Not opening link: {e}");
            return false;
        }
    };

    if spawn(platform_command(url.as_str())) {
        return true;
    }

    // Generic fallback
    if let Ok(browser) = std::env::var("BROWSER") {
        let mut cmd = Command::new(browser);
        cmd.arg(url.as_str());
        if spawn(cmd) {
            return true;
        }
    }

    tracing::warn!("Failed to open {url} in a browser");
    false
}

fn platform_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("/usr/bin/open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

fn spawn(mut cmd: Command) -> bool {
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            // Reaped off-thread so a long session doesn't collect zombies.
            std::thread::spawn(move || {
                if let Err(e) = child.wait() {
                    tracing::debug!("Browser command did not exit cleanly: {e}");
                }
            });
            true
        }
        Err(e) => {
            tracing::debug!("Browser command failed to start: {e}");
            false
        }
    }
}
