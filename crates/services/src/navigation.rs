use boost_core::NavTarget;
use tokio::sync::watch;

/// Receives navigation requests raised outside of UI components.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavTarget);
}

/// Publishes navigation requests on a watch channel for the UI root to follow.
#[derive(Clone)]
pub struct NavigationQueue {
    tx: watch::Sender<Option<NavTarget>>,
}

impl NavigationQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Every `navigate` call marks the value as changed, even when the
    /// target repeats.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<NavTarget>> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn latest(&self) -> Option<NavTarget> {
        *self.tx.borrow()
    }
}

impl Default for NavigationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for NavigationQueue {
    fn navigate(&self, target: NavTarget) {
        tracing::debug!(?target, "navigation requested");
        self.tx.send_replace(Some(target));
    }
}
