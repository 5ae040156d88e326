use crate::model::Theme;

/// Optional host-platform shell (e.g. a chat Mini-App). Every call is
/// fire-and-forget; the app must work fully when no host is present.
pub trait HostBridge {
    /// Display-name hint used when a participant leaves the name field empty.
    fn user_name_hint(&self) -> Option<String> {
        None
    }

    /// Color scheme preferred by the host, overriding the stored theme.
    fn color_scheme(&self) -> Option<Theme> {
        None
    }

    /// Short haptic tap after a theme switch.
    fn haptic_pulse(&self) {}

    /// Repaint host chrome (header/background) for the given theme.
    fn apply_chrome(&self, _theme: Theme) {}
}

/// Bridge for plain standalone runs: every hook is a no-op.
pub struct NoBridge;

impl HostBridge for NoBridge {}
