use conversion_core::{ConversionSignal, PageMetadata, SignalSink, TrackerConfig};
use conversion_session::{keys, SessionStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::decision::{decide, Decision};
use crate::history::{self, PageHistory};
use crate::page::PageDescriptor;

/// Lifecycle of one tracker instance. Transitions only move forward;
/// `Converted` and `NotConverted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    Initialized,
    HistoryLoaded,
    DecisionPending,
    Converted,
    NotConverted,
}

impl TrackerState {
    pub fn can_advance_to(&self, to: TrackerState) -> bool {
        matches!(
            (self, to),
            (TrackerState::Initialized, TrackerState::HistoryLoaded)
                | (TrackerState::HistoryLoaded, TrackerState::DecisionPending)
                | (TrackerState::DecisionPending, TrackerState::Converted)
                | (TrackerState::DecisionPending, TrackerState::NotConverted)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TrackerState::Converted | TrackerState::NotConverted)
    }
}

/// Outcome of evaluating one page load. Built by [`ConversionTracker::evaluate`],
/// which runs the whole protocol before returning.
#[derive(Debug, Clone)]
pub struct ConversionTracker {
    current: PageDescriptor,
    previous: Option<PageDescriptor>,
    history: PageHistory,
    decision: Decision,
    state: TrackerState,
    signals: Vec<ConversionSignal>,
}

impl ConversionTracker {
    /// Evaluate the current page load: update the session's page history,
    /// decide whether this load is a conversion, and on conversion set the
    /// campaign's flag and publish the conversion signals.
    ///
    /// Store failures are logged, never returned. A history log that could
    /// not be read is not overwritten.
    pub fn evaluate<S, K>(page: PageMetadata, config: &TrackerConfig, store: &S, sink: &K) -> Self
    where
        S: SessionStore + ?Sized,
        K: SignalSink + ?Sized,
    {
        let mut tracker = Self {
            current: PageDescriptor::new(page),
            previous: None,
            history: PageHistory::new(),
            decision: Decision::NoMatch,
            state: TrackerState::Initialized,
            signals: Vec::new(),
        };

        // A log that could not be read is left as stored rather than
        // replaced by this page alone.
        let (prior, readable) = match PageHistory::try_load(store) {
            Ok(prior) => (prior, true),
            Err(e) => {
                warn!(error = %e, "failed to read page history, keeping stored log");
                (PageHistory::new(), false)
            }
        };
        tracker.previous = prior.previous().cloned();

        let update = history::record(prior, &tracker.current);
        if readable {
            if let Err(e) = update.log.persist(store) {
                warn!(error = %e, "failed to persist page history");
            }
        }
        debug!(
            campaign_id = %tracker.current.campaign_id(),
            appended = update.appended,
            persisted = readable,
            history_len = update.log.len(),
            "page history updated"
        );
        tracker.history = update.log;
        tracker.advance(TrackerState::HistoryLoaded);

        tracker.advance(TrackerState::DecisionPending);
        let already_converted = Self::already_converted(store, tracker.current.campaign_id());
        tracker.decision = decide(&tracker.current, already_converted, config);

        if tracker.decision.converts() {
            tracker.convert(store, sink);
            tracker.advance(TrackerState::Converted);
        } else {
            debug!(
                campaign_id = %tracker.current.campaign_id(),
                decision = %tracker.decision,
                "no conversion on this page load"
            );
            tracker.advance(TrackerState::NotConverted);
        }

        tracker
    }

    /// Whether `campaign_id` already converted this session. Any stored
    /// value under the campaign's key counts.
    pub fn already_converted<S: SessionStore + ?Sized>(store: &S, campaign_id: &str) -> bool {
        match store.get(&keys::converted(campaign_id)) {
            Ok(flag) => flag.is_some(),
            Err(e) => {
                warn!(error = %e, campaign_id, "failed to read converted flag");
                false
            }
        }
    }

    fn convert<S, K>(&mut self, store: &S, sink: &K)
    where
        S: SessionStore + ?Sized,
        K: SignalSink + ?Sized,
    {
        let campaign_id = self.current.campaign_id().to_string();
        if let Err(e) = store.set(&keys::converted(&campaign_id), keys::CONVERTED_VALUE) {
            warn!(error = %e, campaign_id = %campaign_id, "failed to persist converted flag");
        }

        for signal in ConversionSignal::burst(self.current.page_type()) {
            sink.publish(&signal);
            self.signals.push(signal);
        }

        info!(
            campaign_id = %campaign_id,
            page_type = %self.current.page_type(),
            decision = %self.decision,
            "campaign converted"
        );
    }

    fn advance(&mut self, to: TrackerState) {
        debug_assert!(
            self.state.can_advance_to(to),
            "invalid tracker transition from {:?} to {:?}",
            self.state,
            to
        );
        self.state = to;
    }

    pub fn current(&self) -> &PageDescriptor {
        &self.current
    }

    /// Most recent page recorded before this load, if any.
    pub fn previous(&self) -> Option<&PageDescriptor> {
        self.previous.as_ref()
    }

    /// The history log as persisted by this evaluation.
    pub fn history(&self) -> &PageHistory {
        &self.history
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn converted(&self) -> bool {
        self.state == TrackerState::Converted
    }

    /// Signals published by this instance, in publication order.
    pub fn signals(&self) -> &[ConversionSignal] {
        &self.signals
    }
}
