use std::process::Command;

use super::UiLinkOpener;

/// Hands URLs to the operating system's default browser.
pub struct DesktopLinkOpener;

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            tracing::warn!(url, "refusing to open non-http link");
            return;
        }
        let spawned = open_command(url).map(|mut cmd| cmd.spawn());
        match spawned {
            Some(Ok(_)) => tracing::info!(url, "opened external link"),
            Some(Err(err)) => tracing::warn!(url, error = %err, "could not open external link"),
            None => tracing::warn!(url, "no browser launcher for this platform"),
        }
    }
}

fn open_command(url: &str) -> Option<Command> {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        Some(cmd)
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        Some(cmd)
    } else if cfg!(target_os = "linux") {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        Some(cmd)
    } else {
        None
    }
}
