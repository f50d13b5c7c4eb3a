#![warn(clippy::unwrap_used)]

//! Browser wiring for the conversion tracker.
//!
//! Pages call [`track`] (or [`track_window_page`]) once the DOM is ready.
//! History and converted flags live in `window.sessionStorage`; conversion
//! signals are dispatched on `window` as bubbling events named
//! `synthetic-en:conversion`, `synthetic-en:conversion:<pageType>` and
//! `synthetic-en:conversion:group:<group>`.

pub mod dispatch;
pub mod host;
pub mod storage;

use conversion_core::{ConversionError, PageMetadata, TrackerConfig};
use conversion_tracker::ConversionTracker;
use js_sys::{Array, Reflect};
use tracing::info;
use wasm_bindgen::prelude::*;

pub use dispatch::DomSignalSink;
pub use storage::WebSessionStore;

/// Result of one page-load evaluation, handed back to the page.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct TrackOutcome {
    converted: bool,
    decision: String,
    signals: Vec<String>,
}

impl TrackOutcome {
    fn from_tracker(tracker: &ConversionTracker, sink: &DomSignalSink) -> Self {
        Self {
            converted: tracker.converted(),
            decision: tracker.decision().to_string(),
            signals: tracker
                .signals()
                .iter()
                .map(|signal| sink.event_name(signal))
                .collect(),
        }
    }
}

#[wasm_bindgen]
impl TrackOutcome {
    #[wasm_bindgen(getter)]
    pub fn converted(&self) -> bool {
        self.converted
    }

    #[wasm_bindgen(getter)]
    pub fn decision(&self) -> String {
        self.decision.clone()
    }

    /// Event names dispatched during this evaluation, in order.
    #[wasm_bindgen(getter)]
    pub fn signals(&self) -> Array {
        let arr = Array::new_with_length(self.signals.len() as u32);
        for (idx, name) in self.signals.iter().enumerate() {
            arr.set(idx as u32, JsValue::from_str(name));
        }
        arr
    }
}

/// Evaluate the current page load.
///
/// `page_json` is the page metadata object the host publishes. `options`
/// may be `undefined` or `{ forceConvert, forceSkip }`.
#[wasm_bindgen]
pub fn track(page_json: JsValue, options: JsValue) -> Result<TrackOutcome, JsValue> {
    let page = host::decode_page(stringify(&page_json)?.as_deref()).map_err(to_js)?;
    let config = host::decode_options(stringify(&options)?.as_deref()).map_err(to_js)?;
    run(page, &config)
}

/// Evaluate `window.pageJson`, honouring the `window.ENConversion_Convert`
/// and `window.ENConversion_DontConvert` globals older pages set.
#[wasm_bindgen(js_name = trackWindowPage)]
pub fn track_window_page() -> Result<TrackOutcome, JsValue> {
    let window = host::window().map_err(to_js)?;
    let global: &JsValue = window.as_ref();

    let page_json = Reflect::get(global, &JsValue::from_str(host::PAGE_JSON_GLOBAL))?;
    if page_json.is_undefined() || page_json.is_null() {
        return Err(to_js(ConversionError::Host(format!(
            "window.{} is not set",
            host::PAGE_JSON_GLOBAL
        ))));
    }
    let page = host::decode_page(stringify(&page_json)?.as_deref()).map_err(to_js)?;

    let force_convert = Reflect::get(global, &JsValue::from_str(host::FORCE_CONVERT_GLOBAL))?;
    let force_skip = Reflect::get(global, &JsValue::from_str(host::FORCE_SKIP_GLOBAL))?;
    let config = host::legacy_config(force_convert.is_truthy(), force_skip.is_truthy());

    run(page, &config)
}

fn run(page: PageMetadata, config: &TrackerConfig) -> Result<TrackOutcome, JsValue> {
    let store = WebSessionStore::from_window().map_err(to_js)?;
    let sink = DomSignalSink::default();

    let tracker = ConversionTracker::evaluate(page, config, &store, &sink);
    info!(
        campaign_id = %tracker.current().campaign_id(),
        converted = tracker.converted(),
        decision = %tracker.decision(),
        "page load evaluated"
    );
    Ok(TrackOutcome::from_tracker(&tracker, &sink))
}

/// `None` when the value has no JSON form, as with `undefined`.
fn stringify(value: &JsValue) -> Result<Option<String>, JsValue> {
    Ok(js_sys::JSON::stringify(value)?.as_string())
}

fn to_js(err: ConversionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
