//! Copy-to-clipboard with a legacy fallback.
//!
//! [`copy_text`] drives a [`ClipboardHost`]: the modern clipboard write is
//! tried first; if it is unavailable or rejected, a hidden scratch region is
//! mounted, selected and copied with the legacy command, then unmounted.
//! [`COPY_SCRIPT`] is the same procedure for the generated site.

use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The host has no modern clipboard capability
    Unavailable,
    /// The write was attempted and rejected (permissions, focus, ...)
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable => write!(f, "clipboard API unavailable"),
            ClipboardError::Rejected(reason) => write!(f, "clipboard write rejected: {}", reason),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Handle to a mounted scratch region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchId(pub u64);

/// The platform surface the copy helper needs.
pub trait ClipboardHost {
    /// Modern clipboard write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Mount an off-screen, zero-opacity, read-only text region holding `text`.
    fn mount_scratch(&mut self, text: &str) -> ScratchId;

    /// Select the region's contents and run the legacy copy command.
    /// Returns whether the command reported success.
    fn select_and_copy(&mut self, id: ScratchId) -> bool;

    fn unmount_scratch(&mut self, id: ScratchId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyPath),
    /// Both mechanisms failed
    Failed,
}

impl CopyOutcome {
    pub fn is_copied(self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Unmounts the scratch region when dropped.
struct ScratchGuard<'a, H: ClipboardHost + ?Sized> {
    host: &'a mut H,
    id: ScratchId,
}

impl<H: ClipboardHost + ?Sized> Drop for ScratchGuard<'_, H> {
    fn drop(&mut self) {
        self.host.unmount_scratch(self.id);
    }
}

pub fn copy_text<H: ClipboardHost + ?Sized>(host: &mut H, text: &str) -> CopyOutcome {
    match host.write_text(text) {
        Ok(()) => return CopyOutcome::Copied(CopyPath::Primary),
        Err(err) => debug!(%err, "falling back to legacy copy"),
    }

    let id = host.mount_scratch(text);
    let mut guard = ScratchGuard { host, id };
    let copied = guard.host.select_and_copy(guard.id);
    drop(guard);

    if copied {
        CopyOutcome::Copied(CopyPath::Fallback)
    } else {
        debug!("legacy copy failed");
        CopyOutcome::Failed
    }
}

/// How long the "copied" confirmation stays visible, in milliseconds.
pub const CONFIRMATION_MS: u32 = 2000;

/// Browser-side copy handler for every `[data-copy]` button.
pub const COPY_SCRIPT: &str = r#"(() => {
  const CONFIRMATION_MS = 2000;

  const legacyCopy = (text) => {
    const area = document.createElement('textarea');
    area.value = text;
    area.setAttribute('readonly', '');
    area.setAttribute('aria-hidden', 'true');
    area.tabIndex = -1;
    area.style.position = 'fixed';
    area.style.top = '-9999px';
    area.style.left = '-9999px';
    area.style.opacity = '0';
    document.body.appendChild(area);
    try {
      area.select();
      return document.execCommand('copy');
    } catch (_) {
      return false;
    } finally {
      document.body.removeChild(area);
    }
  };

  const copyText = async (text) => {
    try {
      if (!navigator.clipboard || !navigator.clipboard.writeText) {
        throw new Error('clipboard API unavailable');
      }
      await navigator.clipboard.writeText(text);
      return true;
    } catch (_) {
      return legacyCopy(text);
    }
  };

  document.querySelectorAll('[data-copy]').forEach((button) => {
    const label = button.querySelector('[data-copy-label]') || button;
    const idle = label.textContent;
    let timer;
    button.addEventListener('click', async () => {
      const ok = await copyText(button.dataset.copy);
      button.dataset.state = ok ? 'copied' : 'failed';
      label.textContent = ok ? 'Copied to clipboard' : 'Copy failed';
      clearTimeout(timer);
      timer = setTimeout(() => {
        delete button.dataset.state;
        label.textContent = idle;
      }, CONFIRMATION_MS);
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory host that records mounted regions and clipboard contents.
    #[derive(Default)]
    struct FakeHost {
        primary: Option<ClipboardError>,
        legacy_works: bool,
        clipboard: Option<String>,
        mounted: Vec<(ScratchId, String)>,
        next_id: u64,
        legacy_calls: usize,
    }

    impl ClipboardHost for FakeHost {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            match &self.primary {
                Some(err) => Err(err.clone()),
                None => {
                    self.clipboard = Some(text.to_string());
                    Ok(())
                }
            }
        }

        fn mount_scratch(&mut self, text: &str) -> ScratchId {
            self.next_id += 1;
            let id = ScratchId(self.next_id);
            self.mounted.push((id, text.to_string()));
            id
        }

        fn select_and_copy(&mut self, id: ScratchId) -> bool {
            self.legacy_calls += 1;
            if !self.legacy_works {
                return false;
            }
            let text = self
                .mounted
                .iter()
                .find(|(mounted, _)| *mounted == id)
                .map(|(_, text)| text.clone());
            self.clipboard = text;
            self.clipboard.is_some()
        }

        fn unmount_scratch(&mut self, id: ScratchId) {
            self.mounted.retain(|(mounted, _)| *mounted != id);
        }
    }

    #[test]
    fn test_primary_path() {
        let mut host = FakeHost::default();
        let outcome = copy_text(&mut host, "hello");

        assert_eq!(outcome, CopyOutcome::Copied(CopyPath::Primary));
        assert_eq!(host.clipboard.as_deref(), Some("hello"));
        assert_eq!(host.legacy_calls, 0);
        assert_eq!(host.next_id, 0, "no scratch region on the primary path");
    }

    #[test]
    fn test_fallback_when_unavailable_leaves_no_region() {
        let mut host = FakeHost {
            primary: Some(ClipboardError::Unavailable),
            legacy_works: true,
            ..Default::default()
        };
        let outcome = copy_text(&mut host, "💬 Feedback — Acme\n\nYour message:\n\n");

        assert_eq!(outcome, CopyOutcome::Copied(CopyPath::Fallback));
        assert_eq!(
            host.clipboard.as_deref(),
            Some("💬 Feedback — Acme\n\nYour message:\n\n")
        );
        assert!(host.mounted.is_empty());
    }

    #[test]
    fn test_fallback_when_rejected() {
        let mut host = FakeHost {
            primary: Some(ClipboardError::Rejected("not focused".into())),
            legacy_works: true,
            ..Default::default()
        };
        assert!(copy_text(&mut host, "x").is_copied());
        assert_eq!(host.legacy_calls, 1);
    }

    #[test]
    fn test_dual_failure_is_reported_and_cleaned_up() {
        let mut host = FakeHost {
            primary: Some(ClipboardError::Unavailable),
            legacy_works: false,
            ..Default::default()
        };
        let outcome = copy_text(&mut host, "x");

        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!outcome.is_copied());
        assert!(host.clipboard.is_none());
        assert!(host.mounted.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut host = FakeHost::default();
        copy_text(&mut host, "first");
        copy_text(&mut host, "second");
        assert_eq!(host.clipboard.as_deref(), Some("second"));
    }

    #[test]
    fn test_copy_script_removes_scratch_region() {
        assert!(COPY_SCRIPT.contains("document.body.removeChild(area)"));
        assert!(COPY_SCRIPT.contains("finally"));
        assert!(COPY_SCRIPT.contains(&format!("CONFIRMATION_MS = {}", CONFIRMATION_MS)));
    }

    #[test]
    fn test_copy_script_scratch_region_is_hidden() {
        let start = COPY_SCRIPT.find("const legacyCopy").unwrap();
        let end = COPY_SCRIPT.find("document.body.appendChild(area)").unwrap();
        let setup = &COPY_SCRIPT[start..end];

        // Off-screen, invisible, read-only and out of the tab order before it is mounted
        for attribute in [
            "area.setAttribute('readonly', '')",
            "area.tabIndex = -1",
            "area.style.position = 'fixed'",
            "area.style.top = '-9999px'",
            "area.style.left = '-9999px'",
            "area.style.opacity = '0'",
        ] {
            assert!(setup.contains(attribute), "missing {}", attribute);
        }
    }
}
