//! Conversion signals as bubbling DOM events on `window`.

use conversion_core::{ConversionSignal, SignalSink};
use tracing::warn;
use web_sys::{Event, EventInit};

use crate::host;

/// Prefix existing page listeners subscribe with.
pub const DEFAULT_EVENT_NAMESPACE: &str = "synthetic-en:";

/// Dispatches one bubbling `Event` on `window` per signal.
#[derive(Debug, Clone)]
pub struct DomSignalSink {
    namespace: String,
}

impl Default for DomSignalSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_NAMESPACE)
    }
}

impl DomSignalSink {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// DOM event type for `signal`.
    pub fn event_name(&self, signal: &ConversionSignal) -> String {
        format!("{}{}", self.namespace, signal.name())
    }
}

impl SignalSink for DomSignalSink {
    fn publish(&self, signal: &ConversionSignal) {
        let event_name = self.event_name(signal);
        let window = match host::window() {
            Ok(window) => window,
            Err(e) => {
                warn!(error = %e, event = %event_name, "cannot dispatch conversion event");
                return;
            }
        };

        let init = EventInit::new();
        init.set_bubbles(true);
        let dispatched = Event::new_with_event_init_dict(&event_name, &init)
            .and_then(|event| window.dispatch_event(&event));
        if let Err(e) = dispatched {
            warn!(error = ?e, event = %event_name, "conversion event dispatch failed");
        }
    }
}
