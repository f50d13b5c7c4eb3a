use std::sync::Arc;

use conversion_core::ConversionResult;

/// String-keyed, string-valued storage scoped to one browser session.
///
/// Writes are last-writer-wins overwrites. A missing key reads as `None`.
pub trait SessionStore {
    fn get(&self, key: &str) -> ConversionResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ConversionResult<()>;

    fn remove(&self, key: &str) -> ConversionResult<()>;

    /// Drop every key. Hosts call this when the session ends.
    fn clear(&self) -> ConversionResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> ConversionResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ConversionResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ConversionResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> ConversionResult<()> {
        (**self).clear()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> ConversionResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ConversionResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ConversionResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> ConversionResult<()> {
        (**self).clear()
    }
}
