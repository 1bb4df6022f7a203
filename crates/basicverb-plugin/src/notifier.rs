//! The dirty flag shared between the control side and the audio thread.
//!
//! Any parameter mutation marks the flag; the audio thread test-and-clears
//! it once per block. Which parameters changed, or how many, is not
//! recorded: however many edits land between two blocks, they cost one
//! reconfiguration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A single "configuration is out of date" bit.
///
/// Owned by the session and shared by `Arc` between the store's change
/// callback and the [`UpdateApplier`](crate::UpdateApplier). Never global:
/// two sessions never see each other's flag.
#[derive(Debug, Default)]
pub struct DirtyFlag {
    dirty: AtomicBool,
}

impl DirtyFlag {
    /// A clear flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a reconfiguration is owed. Idempotent.
    #[inline]
    pub fn mark(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Consume the flag if it is set.
    ///
    /// `compare_exchange(true, false)`: exactly one caller observes each
    /// false→true transition.
    #[inline]
    pub fn take(&self) -> bool {
        self.dirty
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Peek without consuming.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Build the change callback a [`ParameterStore`](crate::ParameterStore)
    /// invokes on every mutation.
    ///
    /// `host_notify` runs after the flag is marked, so a host woken by it
    /// always finds the flag set.
    pub fn notifier(
        self: &Arc<Self>,
        host_notify: Option<Box<dyn Fn() + Send + Sync>>,
    ) -> Box<dyn Fn(usize) + Send + Sync> {
        let flag = Arc::clone(self);
        Box::new(move |_index| {
            flag.mark();
            if let Some(notify) = &host_notify {
                notify();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn starts_clear() {
        let flag = DirtyFlag::new();
        assert!(!flag.is_set());
        assert!(!flag.take());
    }

    #[test]
    fn mark_is_idempotent_and_take_consumes_once() {
        let flag = DirtyFlag::new();
        flag.mark();
        flag.mark();
        assert!(flag.is_set());
        assert!(flag.take());
        assert!(!flag.take());
        assert!(!flag.is_set());
    }

    #[test]
    fn notifier_marks_and_calls_host() {
        let flag = Arc::new(DirtyFlag::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let probe = Arc::clone(&flag);

        let callback = flag.notifier(Some(Box::new(move || {
            assert!(probe.is_set(), "host woken before flag was marked");
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        callback(3);
        callback(0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(flag.take());
    }

    #[test]
    fn notifier_without_host() {
        let flag = Arc::new(DirtyFlag::new());
        let callback = flag.notifier(None);
        callback(1);
        assert!(flag.is_set());
    }
}
