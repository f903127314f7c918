//! Mount tracking for the host lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared mount flag for one bound subscription.
///
/// True between `after_execute` and detach. Every forward to the sink is
/// gated on it, so a delivery that races past the explicit unsubscribe is
/// still suppressed.
#[derive(Clone, Debug, Default)]
pub struct LifecycleToken {
    mounted: Arc<AtomicBool>,
}

impl LifecycleToken {
    /// Create a token in the unmounted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the host is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub(crate) fn mount(&self) {
        self.mounted.store(true, Ordering::Release);
    }

    pub(crate) fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_unmounted() {
        let token = LifecycleToken::new();
        assert!(!token.is_mounted());
    }

    #[test]
    fn test_clones_share_state() {
        let token = LifecycleToken::new();
        let clone = token.clone();
        token.mount();
        assert!(clone.is_mounted());
        clone.unmount();
        assert!(!token.is_mounted());
    }
}
