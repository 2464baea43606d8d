//! Analytics events for the case-study pages.
//!
//! Every helper here is a straight pass-through: it shapes one event and hands
//! it to the injected [`EventSink`]. Delivery is fire-and-forget.

mod sink;
pub use sink::{props, AnalyticsEvent, EventSink, Properties, RecordingSink, TracingSink};

#[cfg(target_arch = "wasm32")]
mod data_layer;
#[cfg(target_arch = "wasm32")]
pub use data_layer::DataLayerSink;

use serde_json::json;

use crate::core::platform;

pub const DEFAULT_PAGE_CATEGORY: &str = "case_study";

/// Video lifecycle actions; the event name is `video_<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoAction {
    Load,
    Play,
    Pause,
    Progress,
    Complete,
}

impl VideoAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Progress => "progress",
            Self::Complete => "complete",
        }
    }

    pub fn event_name(self) -> String {
        format!("video_{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analytics<S> {
    sink: S,
}

impl<S: EventSink> Analytics<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// `page_name` defaults to the document title, `page_category` to
    /// [`DEFAULT_PAGE_CATEGORY`].
    pub fn track_page_view(&self, page_name: Option<&str>, page_category: Option<&str>) {
        let page_name = page_name
            .map(str::to_string)
            .unwrap_or_else(platform::document_title);
        let page_category = page_category.unwrap_or(DEFAULT_PAGE_CATEGORY);
        self.sink.emit(
            "page_view",
            props([
                ("page_name", json!(page_name)),
                ("page_category", json!(page_category)),
                ("page_path", json!(platform::page_path())),
            ]),
        );
    }

    pub fn track_case_study_view(&self, name: &str, industry: &str) {
        self.sink.emit(
            "case_study_view",
            props([
                ("case_study_name", json!(name)),
                ("case_study_industry", json!(industry)),
            ]),
        );
    }

    pub fn track_cta_click(&self, text: &str, location: &str) {
        self.sink.emit(
            "cta_click",
            props([("cta_text", json!(text)), ("cta_location", json!(location))]),
        );
    }

    pub fn track_video_interaction(&self, video: &str, action: VideoAction, progress: u8) {
        self.sink.emit(
            &action.event_name(),
            props([
                ("video_name", json!(video)),
                ("video_progress", json!(progress)),
            ]),
        );
    }

    pub fn track_download(&self, file_name: &str, file_type: &str) {
        self.sink.emit(
            "file_download",
            props([("file_name", json!(file_name)), ("file_type", json!(file_type))]),
        );
    }
}

/// File name and type for a download link: the `download` attribute when it
/// is set, otherwise the last path segment of `href`. The type is whatever
/// follows the last `.` (the whole name when there is none).
pub fn download_details(href: &str, download_attr: Option<&str>) -> (String, String) {
    let file_name = match download_attr.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => href.rsplit('/').next().unwrap_or(href).to_string(),
    };
    let file_type = file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name.as_str())
        .to_string();
    (file_name, file_type)
}
