//! Host side effects for the desktop viewer

use std::io;

use cubespin_core::HostEnvironment;

/// Starts whatever handles `url` on this system
pub type Launcher = fn(&str) -> io::Result<()>;

fn open_browser(url: &str) -> io::Result<()> {
    opener::open_browser(url).map_err(io::Error::other)
}

/// Host that opens face links in the system browser
///
/// A link that fails to open is logged and otherwise ignored.
#[derive(Debug)]
pub struct BrowserHost {
    launcher: Launcher,
    opened: usize,
    failed: usize,
}

impl Default for BrowserHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserHost {
    pub fn new() -> Self {
        Self::with_launcher(open_browser)
    }

    /// Use `launcher` instead of the system browser
    pub fn with_launcher(launcher: Launcher) -> Self {
        Self {
            launcher,
            opened: 0,
            failed: 0,
        }
    }

    /// Links handed to the browser successfully
    pub fn opened_count(&self) -> usize {
        self.opened
    }

    /// Links the browser could not be started for
    pub fn failed_count(&self) -> usize {
        self.failed
    }
}

impl HostEnvironment for BrowserHost {
    fn open_in_new_context(&mut self, url: &str) {
        match (self.launcher)(url) {
            Ok(()) => {
                log::info!("Opened {} in the browser", url);
                self.opened += 1;
            }
            Err(e) => {
                log::warn!("Failed to open {}: {}", url, e);
                self.failed += 1;
            }
        }
    }
}
