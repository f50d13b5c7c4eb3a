//! Storage key naming shared by every host. Existing pages read these keys
//! directly, so the names are fixed.

/// Ordered JSON array of page metadata seen this session.
pub const PAGES_LOG: &str = "ENConversion_PagesLog";

/// Prefix of the per-campaign converted flag.
pub const CONVERTED_PREFIX: &str = "ENConversion_Converted_";

/// Value written under a campaign's converted key.
pub const CONVERTED_VALUE: &str = "true";

pub fn converted(campaign_id: &str) -> String {
    format!("{CONVERTED_PREFIX}{campaign_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_key() {
        assert_eq!(converted("C1"), "ENConversion_Converted_C1");
        assert_eq!(converted("12345"), "ENConversion_Converted_12345");
    }
}
