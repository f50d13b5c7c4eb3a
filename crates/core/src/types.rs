use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Metadata the host page publishes for one page load of a form campaign.
///
/// Field names follow the host's camelCase JSON. Fields this crate does not
/// interpret are carried in `extra` so a stored history entry is the same
/// object the page published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(deserialize_with = "string_or_number")]
    pub campaign_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub campaign_page_id: String,
    /// 1-based position of this page in its sequence.
    pub page_number: u32,
    pub page_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redirect_present: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_type: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PageMetadata {
    pub fn new(
        campaign_id: impl Into<String>,
        campaign_page_id: impl Into<String>,
        page_number: u32,
        page_count: u32,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            campaign_page_id: campaign_page_id.into(),
            page_number,
            page_count,
            redirect_present: false,
            page_type: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_redirect(mut self, redirect_present: bool) -> Self {
        self.redirect_present = redirect_present;
        self
    }

    pub fn with_page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = page_type.into();
        self
    }
}

/// Host pages publish campaign ids as numbers; normalise them to strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Identifier {
        Text(String),
        Number(i64),
    }

    Ok(match Identifier::deserialize(deserializer)? {
        Identifier::Text(text) => text,
        Identifier::Number(number) => number.to_string(),
    })
}

/// Some pages publish `null` for fields they leave unset.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Coarse classification of a conversion, derived from the page type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalGroup {
    Donation,
    Submission,
}

impl SignalGroup {
    pub fn from_page_type(page_type: &str) -> Self {
        match page_type {
            "donation" | "premiumgift" | "e-commerce" => SignalGroup::Donation,
            _ => SignalGroup::Submission,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalGroup::Donation => "donation",
            SignalGroup::Submission => "submission",
        }
    }
}

impl fmt::Display for SignalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named notification published when a campaign converts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConversionSignal {
    General,
    PageType(String),
    Group(SignalGroup),
}

impl ConversionSignal {
    /// The three signals of one conversion, in publication order.
    pub fn burst(page_type: &str) -> [ConversionSignal; 3] {
        [
            ConversionSignal::General,
            ConversionSignal::PageType(page_type.to_string()),
            ConversionSignal::Group(SignalGroup::from_page_type(page_type)),
        ]
    }

    pub fn name(&self) -> String {
        match self {
            ConversionSignal::General => "conversion".to_string(),
            ConversionSignal::PageType(page_type) => format!("conversion:{page_type}"),
            ConversionSignal::Group(group) => format!("conversion:group:{group}"),
        }
    }
}

impl fmt::Display for ConversionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_from_host_json() {
        let json = r#"{
            "campaignId": 54321,
            "campaignPageId": "9001",
            "pageNumber": 2,
            "pageCount": 2,
            "redirectPresent": false,
            "pageType": "donation",
            "pageName": "Spring appeal",
            "locale": "en-US"
        }"#;
        let page: PageMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(page.campaign_id, "54321");
        assert_eq!(page.campaign_page_id, "9001");
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_type, "donation");
        assert_eq!(page.extra["pageName"], "Spring appeal");

        let stored: serde_json::Value = serde_json::to_value(&page).unwrap();
        assert_eq!(stored["campaignId"], "54321");
        assert_eq!(stored["locale"], "en-US");
        assert!(stored.get("extra").is_none());
    }

    #[test]
    fn test_redirect_defaults_to_false() {
        let json = r#"{"campaignId":"c","campaignPageId":"p","pageNumber":1,"pageCount":1}"#;
        let page: PageMetadata = serde_json::from_str(json).unwrap();
        assert!(!page.redirect_present);
        assert!(page.page_type.is_empty());
    }

    #[test]
    fn test_null_optional_fields_read_as_defaults() {
        let json = r#"{"campaignId":"c","campaignPageId":"p","pageNumber":1,"pageCount":1,
                       "redirectPresent":null,"pageType":null}"#;
        let page: PageMetadata = serde_json::from_str(json).unwrap();
        assert!(!page.redirect_present);
        assert_eq!(page.page_type, "");
        assert!(page.extra.is_empty());
    }

    #[test]
    fn test_signal_group_mapping() {
        assert_eq!(SignalGroup::from_page_type("donation"), SignalGroup::Donation);
        assert_eq!(SignalGroup::from_page_type("premiumgift"), SignalGroup::Donation);
        assert_eq!(SignalGroup::from_page_type("e-commerce"), SignalGroup::Donation);
        assert_eq!(
            SignalGroup::from_page_type("advocacy-petition"),
            SignalGroup::Submission
        );
        // Page types are matched exactly.
        assert_eq!(SignalGroup::from_page_type("Donation"), SignalGroup::Submission);
        assert_eq!(SignalGroup::from_page_type(""), SignalGroup::Submission);
    }

    #[test]
    fn test_signal_burst_names_and_order() {
        let names: Vec<String> = ConversionSignal::burst("premiumgift")
            .iter()
            .map(ConversionSignal::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "conversion",
                "conversion:premiumgift",
                "conversion:group:donation"
            ]
        );
    }

    #[test]
    fn test_page_type_signal_is_not_normalised() {
        let signal = ConversionSignal::PageType("Event Registration".into());
        assert_eq!(signal.to_string(), "conversion:Event Registration");
    }
}
