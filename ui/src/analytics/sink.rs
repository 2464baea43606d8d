//! Event sinks: where analytics events end up.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

pub type Properties = Map<String, Value>;

/// Builds a property map from literal pairs.
pub fn props<const N: usize>(pairs: [(&str, Value); N]) -> Properties {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// One analytics event in its wire shape: `{"event": name, ...properties}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "event")]
    pub name: String,
    #[serde(flatten)]
    pub properties: Properties,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, properties: Properties) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// String property lookup.
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// Fire-and-forget destination for analytics events.
pub trait EventSink {
    fn emit(&self, event: &str, properties: Properties);
}

impl<T: EventSink + ?Sized> EventSink for Rc<T> {
    fn emit(&self, event: &str, properties: Properties) {
        (**self).emit(event, properties)
    }
}

/// Keeps every event in memory; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    pub fn named(&self, name: &str) -> Vec<AnalyticsEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name == name)
            .cloned()
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &str, properties: Properties) {
        self.events
            .borrow_mut()
            .push(AnalyticsEvent::new(event, properties));
    }
}

/// Logs events through `tracing`; used where no `dataLayer` exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &str, properties: Properties) {
        let payload = serde_json::to_string(&AnalyticsEvent::new(event, properties))
            .unwrap_or_default();
        tracing::info!(target: "analytics", event, %payload);
    }
}
