use std::process::Command;

use tracing::{debug, warn};

use super::UiLinkOpener;

/// Hands links to the operating system's default browser.
pub struct DesktopLinkOpener;

fn opener_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command.arg(url);
    command
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            debug!(url, "refusing to open non-web link");
            return;
        }
        if let Err(err) = opener_command(url).spawn() {
            warn!(error = %err, url, "failed to open link");
        }
    }
}
