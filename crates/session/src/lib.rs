#![warn(clippy::unwrap_used)]

//! Session-scoped key/value storage used to remember which pages were seen
//! and which campaigns already converted during the current browser session.

pub mod keys;
pub mod local;
pub mod store;

pub use local::LocalSessionStore;
pub use store::SessionStore;
