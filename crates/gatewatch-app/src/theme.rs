//! Shared display-theme preference.

use std::sync::Arc;

use tokio::sync::watch;

/// Process-wide "prefer dark theme" flag.
///
/// Injected into the runtime rather than kept in a global. Clones share the
/// same flag; the rendering layer observes changes through
/// [`ThemeState::subscribe`]. Defaults to preferring the light theme.
#[derive(Debug, Clone)]
pub struct ThemeState {
    prefer_dark: Arc<watch::Sender<bool>>,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ThemeState {
    /// Create a theme state with an initial preference.
    pub fn new(prefer_dark: bool) -> Self {
        let (tx, _rx) = watch::channel(prefer_dark);
        Self { prefer_dark: Arc::new(tx) }
    }

    /// Whether the dark theme is preferred.
    pub fn prefer_dark(&self) -> bool {
        *self.prefer_dark.borrow()
    }

    /// Set the preference. Observers are only woken on an actual change.
    pub fn set_prefer_dark(&self, prefer_dark: bool) {
        self.prefer_dark.send_if_modified(|current| {
            if *current == prefer_dark {
                false
            } else {
                *current = prefer_dark;
                true
            }
        });
    }

    /// Observe preference changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.prefer_dark.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light() {
        assert!(!ThemeState::default().prefer_dark());
    }

    #[test]
    fn clones_share_preference() {
        let theme = ThemeState::default();
        let renderer_view = theme.clone();

        theme.set_prefer_dark(true);
        assert!(renderer_view.prefer_dark());
    }

    #[test]
    fn observers_only_see_real_changes() {
        let theme = ThemeState::new(true);
        let mut rx = theme.subscribe();

        theme.set_prefer_dark(true);
        assert!(!rx.has_changed().unwrap());

        theme.set_prefer_dark(false);
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }
}
