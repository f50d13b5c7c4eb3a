#![warn(clippy::unwrap_used)]

//! Conversion detection for multi-step web forms.
//!
//! Each page load builds one [`ConversionTracker`]: it records the page in
//! the session's history log, decides whether the visitor just completed a
//! campaign, and on conversion sets the campaign's flag and publishes the
//! conversion signals exactly once per campaign per session.
//!
//! # Modules
//!
//! - [`page`] — structural predicates over one page's metadata
//! - [`history`] — the session-wide log of distinct page loads
//! - [`decision`] — override handling and the conversion rules
//! - [`tracker`] — the per-page-load protocol tying them together

pub mod decision;
pub mod history;
pub mod page;
pub mod tracker;

pub use decision::{decide, Decision};
pub use history::{HistoryUpdate, PageHistory};
pub use page::PageDescriptor;
pub use tracker::{ConversionTracker, TrackerState};
