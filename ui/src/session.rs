//! Per-visit state shared by every page: analytics and active A/B tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::analytics::{download_details, Analytics, EventSink};
use crate::core::platform;
use crate::core::storage::KeyValueStore;
use crate::experiments::{VariantAssigner, LAYOUT_TEST, LAYOUT_VARIANTS, LAYOUT_WEIGHTS};

#[cfg(target_arch = "wasm32")]
pub type PageSink = crate::analytics::DataLayerSink;
#[cfg(not(target_arch = "wasm32"))]
pub type PageSink = crate::analytics::TracingSink;

#[cfg(target_arch = "wasm32")]
pub type PageStore = crate::core::storage::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PageStore = crate::core::storage::MemoryStore;

/// Conversion recorded against the layout test when a CTA is clicked.
pub const CTA_CONVERSION: &str = "cta_click";

/// Cheap to clone; clones share the same assigner.
pub struct Session<K = PageStore, S = PageSink> {
    analytics: Analytics<S>,
    assigner: Rc<RefCell<VariantAssigner<K, S>>>,
}

impl<K, S: Clone> Clone for Session<K, S> {
    fn clone(&self) -> Self {
        Self {
            analytics: self.analytics.clone(),
            assigner: Rc::clone(&self.assigner),
        }
    }
}

impl Session {
    /// Session wired to the page's own storage and event sink.
    pub fn start() -> Self {
        Self::new(PageStore::default(), PageSink::default())
    }
}

impl<K: KeyValueStore, S: EventSink + Clone> Session<K, S> {
    pub fn new(store: K, sink: S) -> Self {
        Self::from_assigner(VariantAssigner::new(store, sink.clone()), sink)
    }

    pub fn from_assigner(assigner: VariantAssigner<K, S>, sink: S) -> Self {
        Self {
            analytics: Analytics::new(sink),
            assigner: Rc::new(RefCell::new(assigner)),
        }
    }

    pub fn analytics(&self) -> &Analytics<S> {
        &self.analytics
    }

    pub fn assign(&self, test_name: &str, variants: &[&str], weights: Option<&[f64]>) -> Option<String> {
        self.assigner.borrow_mut().assign(test_name, variants, weights)
    }

    pub fn variant(&self, test_name: &str) -> Option<String> {
        self.assigner.borrow().variant(test_name).map(str::to_string)
    }

    pub fn record_conversion(&self, test_name: &str, conversion_kind: &str) {
        self.assigner.borrow().record_conversion(test_name, conversion_kind);
    }

    /// Assigns the case-study layout test and tags `<body>` with
    /// `layout-<variant>`.
    pub fn assign_layout(&self) -> Option<String> {
        let variant = self.assign(LAYOUT_TEST, &LAYOUT_VARIANTS, Some(LAYOUT_WEIGHTS.as_slice()))?;
        platform::add_body_class(&layout_class(&variant));
        Some(variant)
    }

    pub fn cta_clicked(&self, text: &str, location: &str) {
        self.analytics.track_cta_click(text, location);
        self.record_conversion(LAYOUT_TEST, CTA_CONVERSION);
    }

    pub fn download_clicked(&self, href: &str, download_attr: Option<&str>) {
        let (file_name, file_type) = download_details(href, download_attr);
        self.analytics.track_download(&file_name, &file_type);
    }
}

pub fn layout_class(variant: &str) -> String {
    format!("layout-{variant}")
}
