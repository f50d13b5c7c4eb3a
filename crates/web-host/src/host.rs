//! Reading inputs from the host page.

use conversion_core::{ConversionError, ConversionResult, PageMetadata, TrackerConfig};
use web_sys::Window;

/// Global the host page publishes its metadata under.
pub const PAGE_JSON_GLOBAL: &str = "pageJson";
/// Legacy global forcing a conversion.
pub const FORCE_CONVERT_GLOBAL: &str = "ENConversion_Convert";
/// Legacy global suppressing conversion.
pub const FORCE_SKIP_GLOBAL: &str = "ENConversion_DontConvert";

pub fn window() -> ConversionResult<Window> {
    web_sys::window().ok_or_else(|| ConversionError::Host("no global window".to_string()))
}

/// Decode the page metadata object. `None` is what `JSON.stringify` yields
/// for `undefined`.
pub fn decode_page(json: Option<&str>) -> ConversionResult<PageMetadata> {
    match json {
        None | Some("null") => Err(ConversionError::Host("page metadata is missing".to_string())),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Decode a `{ forceConvert, forceSkip }` options object. Missing keys, and
/// a missing object, default to false.
pub fn decode_options(json: Option<&str>) -> ConversionResult<TrackerConfig> {
    match json {
        None | Some("null") => Ok(TrackerConfig::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

pub fn legacy_config(force_convert: bool, force_skip: bool) -> TrackerConfig {
    TrackerConfig {
        force_convert,
        force_skip,
    }
}
