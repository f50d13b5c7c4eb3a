//! Session-wide log of distinct page loads, oldest first.
//!
//! The log is flat across campaigns. Consecutive loads of the same page
//! (reloads, validation errors re-rendering a page) collapse into one entry;
//! revisiting a page later appends it again.

use conversion_core::ConversionResult;
use conversion_session::{keys, SessionStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::page::PageDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageHistory {
    pages: Vec<PageDescriptor>,
}

/// Result of recording one page load against the prior log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryUpdate {
    pub log: PageHistory,
    /// False when the page repeated the most recent entry.
    pub appended: bool,
}

impl PageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<PageDescriptor>) -> Self {
        Self { pages }
    }

    /// Read the log from the session store. A missing, unreadable or
    /// malformed entry yields an empty log.
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Self {
        Self::try_load(store).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read page history, starting empty");
            Self::new()
        })
    }

    /// Like [`PageHistory::load`], but a failed store read is an error so
    /// the caller can avoid overwriting a log it never saw.
    pub fn try_load<S: SessionStore + ?Sized>(store: &S) -> ConversionResult<Self> {
        let Some(raw) = store.get(keys::PAGES_LOG)? else {
            return Ok(Self::new());
        };

        Ok(Self::decode(&raw).unwrap_or_else(|| {
            warn!(bytes = raw.len(), "discarding malformed page history");
            Self::new()
        }))
    }

    /// Decode a stored log. `null` reads as an empty log.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str::<Option<PageHistory>>(raw)
            .ok()
            .map(Option::unwrap_or_default)
    }

    pub fn encode(&self) -> ConversionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the full log back under its session key.
    pub fn persist<S: SessionStore + ?Sized>(&self, store: &S) -> ConversionResult<()> {
        store.set(keys::PAGES_LOG, &self.encode()?)
    }

    /// The most recent entry, if any.
    pub fn previous(&self) -> Option<&PageDescriptor> {
        self.pages.last()
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Record `current` on top of `prior`. Pure: the caller persists the result.
pub fn record(prior: PageHistory, current: &PageDescriptor) -> HistoryUpdate {
    let mut log = prior;
    if current.is_same_page_as(log.previous()) {
        debug!(
            campaign_id = %current.campaign_id(),
            page_number = current.metadata().page_number,
            "same page as previous load, history unchanged"
        );
        return HistoryUpdate {
            log,
            appended: false,
        };
    }

    log.pages.push(current.clone());
    HistoryUpdate { log, appended: true }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use conversion_core::PageMetadata;
    use conversion_session::LocalSessionStore;

    fn page(page_id: &str, number: u32, count: u32) -> PageDescriptor {
        PageDescriptor::new(PageMetadata::new("C1", page_id, number, count))
    }

    #[test]
    fn test_record_into_empty_log() {
        let update = record(PageHistory::new(), &page("X", 1, 2));
        assert!(update.appended);
        assert_eq!(update.log.len(), 1);
        assert_eq!(update.log.previous(), Some(&page("X", 1, 2)));
    }

    #[test]
    fn test_record_skips_consecutive_repeat() {
        let first = record(PageHistory::new(), &page("X", 1, 2));
        let reload = record(first.log, &page("X", 1, 2));
        assert!(!reload.appended);
        assert_eq!(reload.log.len(), 1);
    }

    #[test]
    fn test_record_keeps_non_consecutive_revisit() {
        let mut log = PageHistory::new();
        for p in [page("X", 1, 2), page("X", 2, 2), page("X", 1, 2)] {
            log = record(log, &p).log;
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.pages()[0], log.pages()[2]);
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = LocalSessionStore::new();
        assert!(PageHistory::load(&store).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let store = LocalSessionStore::new();
        store.set(keys::PAGES_LOG, "{not json").unwrap();
        assert!(PageHistory::load(&store).is_empty());

        store.set(keys::PAGES_LOG, r#"[{"campaignId":"C1"}]"#).unwrap();
        assert!(PageHistory::load(&store).is_empty());

        store.set(keys::PAGES_LOG, "null").unwrap();
        assert!(PageHistory::load(&store).is_empty());
    }

    #[test]
    fn test_load_tolerates_null_fields_in_stored_entries() {
        let store = LocalSessionStore::new();
        store
            .set(
                keys::PAGES_LOG,
                r#"[{"campaignId":"C1","campaignPageId":"X","pageNumber":1,"pageCount":2,
                     "redirectPresent":null,"pageType":null}]"#,
            )
            .unwrap();

        let log = PageHistory::load(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log.previous(), Some(&page("X", 1, 2)));
    }

    #[test]
    fn test_persist_then_load() {
        let store = LocalSessionStore::new();
        let log = PageHistory::from_pages(vec![page("X", 1, 2), page("X", 2, 2)]);
        log.persist(&store).unwrap();

        let raw = store.get(keys::PAGES_LOG).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored[1]["pageNumber"], 2);
        assert_eq!(stored[1]["campaignPageId"], "X");

        assert_eq!(PageHistory::load(&store), log);
    }
}
