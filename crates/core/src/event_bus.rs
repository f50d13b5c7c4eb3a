//! Signal bus. The tracker publishes through a `&dyn SignalSink`: in a
//! browser that dispatches bubbling DOM events, in tests it records them.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::ConversionSignal;

/// Publishes conversion signals. Each call is delivered on its own, in the
/// order the calls are made.
pub trait SignalSink: Send + Sync {
    fn publish(&self, signal: &ConversionSignal);
}

impl<S: SignalSink + ?Sized> SignalSink for Arc<S> {
    fn publish(&self, signal: &ConversionSignal) {
        (**self).publish(signal)
    }
}

/// Records every published signal, oldest first.
#[derive(Default)]
pub struct CaptureSink {
    published: Mutex<Vec<ConversionSignal>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn published(&self) -> MutexGuard<'_, Vec<ConversionSignal>> {
        // A panic while holding the lock leaves the list intact.
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Published signal names, as listeners would see them.
    pub fn names(&self) -> Vec<String> {
        self.published().iter().map(ConversionSignal::name).collect()
    }

    /// How many published signals carry `name`.
    pub fn count_name(&self, name: &str) -> usize {
        self.published().iter().filter(|s| s.name() == name).count()
    }

    pub fn count(&self) -> usize {
        self.published().len()
    }

    pub fn signals(&self) -> Vec<ConversionSignal> {
        self.published().clone()
    }

    pub fn clear(&self) {
        self.published().clear();
    }
}

impl SignalSink for CaptureSink {
    fn publish(&self, signal: &ConversionSignal) {
        self.published().push(signal.clone());
    }
}

/// Shared capture sink, for handing one listener to several page loads.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}
