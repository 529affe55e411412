//! Preview handle lifecycle.
//!
//! A listing view re-renders its certificate preview whenever the
//! underlying record changes. Only the most recent preview may stay live:
//! the superseded handle is released before the new one is adopted, and
//! the final handle is released when the slot goes away. In-flight renders
//! are never cancelled; a superseded result is simply discarded.

#[derive(Debug)]
pub struct PreviewSlot<T> {
    current: Option<T>,
}

impl<T> PreviewSlot<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Adopt a freshly rendered preview, releasing any superseded handle
    /// first.
    pub fn replace(&mut self, handle: T) -> &T {
        self.current = None;
        self.current.insert(handle)
    }

    /// Release the held preview, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<T> Default for PreviewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct TrackedHandle {
        live: Arc<AtomicUsize>,
    }

    impl TrackedHandle {
        fn new(live: &Arc<AtomicUsize>) -> Self {
            live.fetch_add(1, Ordering::SeqCst);
            Self { live: Arc::clone(live) }
        }
    }

    impl Drop for TrackedHandle {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn exactly_one_handle_live_across_replacements() {
        let live = Arc::new(AtomicUsize::new(0));
        let mut slot = PreviewSlot::new();

        for _ in 0..5 {
            slot.replace(TrackedHandle::new(&live));
            assert_eq!(live.load(Ordering::SeqCst), 1);
        }

        drop(slot);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clear_releases_the_handle() {
        let live = Arc::new(AtomicUsize::new(0));
        let mut slot = PreviewSlot::new();

        slot.replace(TrackedHandle::new(&live));
        slot.clear();
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert!(slot.is_empty());
        assert!(slot.get().is_none());
    }
}
