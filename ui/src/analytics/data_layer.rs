//! `window.dataLayer` sink for tag managers.

use wasm_bindgen::{JsCast as _, JsValue};

use super::sink::{AnalyticsEvent, EventSink, Properties};

#[derive(Debug, Clone, Copy, Default)]
pub struct DataLayerSink;

impl DataLayerSink {
    /// Returns `window.dataLayer`, installing an empty array when absent.
    fn data_layer() -> Option<js_sys::Array> {
        let window = web_sys::window()?;
        let key = JsValue::from_str("dataLayer");
        let existing = js_sys::Reflect::get(&window, &key).ok()?;
        if js_sys::Array::is_array(&existing) {
            return Some(existing.unchecked_into());
        }
        let fresh = js_sys::Array::new();
        js_sys::Reflect::set(&window, &key, &fresh).ok()?;
        Some(fresh)
    }
}

impl EventSink for DataLayerSink {
    fn emit(&self, event: &str, properties: Properties) {
        let payload = match serde_json::to_string(&AnalyticsEvent::new(event, properties)) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(event, %err, "unable to serialise analytics event");
                return;
            }
        };
        let Ok(object) = js_sys::JSON::parse(&payload) else {
            tracing::warn!(event, "unable to build analytics object");
            return;
        };
        match Self::data_layer() {
            Some(layer) => {
                layer.push(&object);
                tracing::debug!(event, "pushed to dataLayer");
            }
            None => tracing::warn!(event, "dataLayer unavailable"),
        }
    }
}
