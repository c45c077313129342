//! Install prompt
//!
//! Native counterpart of a browser install prompt: when the desktop can take
//! a launcher entry and none exists yet, a banner appears after a short delay
//! offering to write an XDG `.desktop` file.

use super::debounce::Debounced;
use super::DesktopIntegration;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File name of the desktop entry under `$XDG_DATA_HOME/applications`
pub const DESKTOP_ENTRY_NAME: &str = "app-launcher.desktop";

/// What the platform reports about installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallCapability {
    pub is_installable: bool,
    pub is_installed: bool,
}

impl InstallCapability {
    pub fn should_prompt(&self) -> bool {
        self.is_installable && !self.is_installed
    }
}

/// Delayed, dismissable install banner
#[derive(Debug, Clone)]
pub struct InstallBanner {
    capability: InstallCapability,
    banner: Debounced<()>,
    dismissed: bool,
}

impl InstallBanner {
    pub fn new(delay: Duration) -> Self {
        InstallBanner {
            capability: InstallCapability::default(),
            banner: Debounced::new(delay),
            dismissed: false,
        }
    }

    /// Feed the platform capability; re-evaluated only when it changes
    pub fn update_capability(&mut self, capability: InstallCapability, now: Instant) {
        if capability == self.capability {
            return;
        }
        self.capability = capability;

        if capability.should_prompt() && !self.dismissed {
            self.banner.set_after((), now);
        } else {
            self.banner.reset();
        }
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.banner.reset();
    }

    /// Installation finished; the banner goes away for good
    pub fn mark_installed(&mut self) {
        self.capability.is_installed = true;
        self.banner.reset();
    }

    pub fn is_visible(&self) -> bool {
        self.banner.is_set()
    }

    pub fn capability(&self) -> InstallCapability {
        self.capability
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.banner.poll(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.banner.deadline()
    }
}

/// Writes a freedesktop.org desktop entry pointing at the running binary
#[derive(Debug, Clone)]
pub struct XdgDesktopEntry {
    entry_path: Option<PathBuf>,
    exec: Option<PathBuf>,
}

impl XdgDesktopEntry {
    /// Entry under the user's data dir, exec'ing the current executable
    pub fn for_current_user() -> Self {
        let entry_path = if cfg!(target_os = "linux") {
            dirs::data_dir().map(|dir| dir.join("applications").join(DESKTOP_ENTRY_NAME))
        } else {
            None
        };
        XdgDesktopEntry {
            entry_path,
            exec: std::env::current_exe().ok(),
        }
    }

    pub fn with_paths(entry_path: PathBuf, exec: PathBuf) -> Self {
        XdgDesktopEntry {
            entry_path: Some(entry_path),
            exec: Some(exec),
        }
    }

    pub fn entry_path(&self) -> Option<&Path> {
        self.entry_path.as_deref()
    }

    fn contents(exec: &Path) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=App Launcher\n\
             Comment=Browse and open your applications\n\
             Exec=\"{}\"\n\
             Terminal=false\n\
             Categories=Utility;\n",
            exec.display()
        )
    }
}

impl DesktopIntegration for XdgDesktopEntry {
    fn capability(&self) -> InstallCapability {
        match (&self.entry_path, &self.exec) {
            (Some(entry), Some(_)) => InstallCapability {
                is_installable: true,
                is_installed: entry.exists(),
            },
            _ => InstallCapability::default(),
        }
    }

    fn install(&self) -> Result<PathBuf, AppError> {
        let entry = self
            .entry_path
            .as_ref()
            .ok_or_else(|| AppError::Install("no applications directory on this platform".to_string()))?;
        let exec = self
            .exec
            .as_ref()
            .ok_or_else(|| AppError::Install("cannot resolve the launcher executable".to_string()))?;

        if let Some(parent) = entry.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Install(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(entry, Self::contents(exec))
            .map_err(|e| AppError::Install(format!("{}: {}", entry.display(), e)))?;

        log::info!("[Install] Desktop entry written to {}", entry.display());
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    fn prompting() -> InstallCapability {
        InstallCapability {
            is_installable: true,
            is_installed: false,
        }
    }

    #[test]
    fn test_banner_appears_after_delay() {
        let t0 = Instant::now();
        let mut banner = InstallBanner::new(DELAY);
        banner.update_capability(prompting(), t0);

        banner.poll(t0 + Duration::from_millis(2999));
        assert!(!banner.is_visible());

        banner.poll(t0 + DELAY);
        assert!(banner.is_visible());
    }

    #[test]
    fn test_installed_never_prompts() {
        let t0 = Instant::now();
        let mut banner = InstallBanner::new(DELAY);
        banner.update_capability(
            InstallCapability {
                is_installable: true,
                is_installed: true,
            },
            t0,
        );
        banner.poll(t0 + Duration::from_secs(10));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_dismiss_hides_and_cancels() {
        let t0 = Instant::now();
        let mut banner = InstallBanner::new(DELAY);
        banner.update_capability(prompting(), t0);
        banner.dismiss();
        banner.poll(t0 + Duration::from_secs(10));
        assert!(!banner.is_visible());

        // Same capability again does not resurrect it
        banner.update_capability(prompting(), t0);
        banner.poll(t0 + Duration::from_secs(20));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_xdg_entry_install() {
        let temp = tempfile::tempdir().unwrap();
        let entry = temp.path().join("applications").join(DESKTOP_ENTRY_NAME);
        let installer = XdgDesktopEntry::with_paths(entry.clone(), PathBuf::from("/usr/bin/app_launcher"));

        assert_eq!(installer.capability(), prompting());

        let written = installer.install().unwrap();
        assert_eq!(written, entry);
        let contents = std::fs::read_to_string(&entry).unwrap();
        assert!(contents.starts_with("[Desktop Entry]"));
        assert!(contents.contains("Exec=\"/usr/bin/app_launcher\""));

        assert!(installer.capability().is_installed);
    }

    #[test]
    fn test_without_entry_path_not_installable() {
        let installer = XdgDesktopEntry {
            entry_path: None,
            exec: Some(PathBuf::from("/bin/true")),
        };
        assert!(!installer.capability().is_installable);
        assert!(matches!(installer.install(), Err(AppError::Install(_))));
    }
}
