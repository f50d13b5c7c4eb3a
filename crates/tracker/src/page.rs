use conversion_core::PageMetadata;
use serde::{Deserialize, Serialize};

/// Read-only view over one page load's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDescriptor {
    metadata: PageMetadata,
}

impl PageDescriptor {
    pub fn new(metadata: PageMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn campaign_id(&self) -> &str {
        &self.metadata.campaign_id
    }

    pub fn page_type(&self) -> &str {
        &self.metadata.page_type
    }

    pub fn is_last_page(&self) -> bool {
        self.metadata.page_number == self.metadata.page_count
    }

    pub fn has_more_than_one_page(&self) -> bool {
        self.metadata.page_count > 1
    }

    pub fn is_single_page(&self) -> bool {
        self.metadata.page_count == 1
    }

    pub fn has_redirect(&self) -> bool {
        self.metadata.redirect_present
    }

    pub fn has_pages_left(&self) -> bool {
        self.metadata.page_number < self.metadata.page_count
    }

    /// Same campaign page at the same position. `None` (no earlier page)
    /// is never the same page.
    pub fn is_same_page_as(&self, other: Option<&PageDescriptor>) -> bool {
        other.is_some_and(|other| {
            self.metadata.campaign_page_id == other.metadata.campaign_page_id
                && self.metadata.page_number == other.metadata.page_number
        })
    }
}

impl From<PageMetadata> for PageDescriptor {
    fn from(metadata: PageMetadata) -> Self {
        Self::new(metadata)
    }
}
