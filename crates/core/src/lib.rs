//! Shared building blocks for session-scoped conversion tracking: page
//! metadata as published by the host page, the signals fired on
//! conversion, tracker configuration, and the error type used at the I/O
//! seams.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod types;

pub use config::TrackerConfig;
pub use error::{ConversionError, ConversionResult};
pub use event_bus::{CaptureSink, SignalSink};
pub use types::{ConversionSignal, PageMetadata, SignalGroup};
