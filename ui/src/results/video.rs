use std::collections::BTreeSet;

use crate::analytics::{Analytics, EventSink, VideoAction};
use crate::core::dom::Dom;
use crate::core::timing::Scheduler;

use super::{ChartDatum, ChartSettings, ResultChartRenderer};

/// Playback percentages reported once each as `video_progress`.
pub const PROGRESS_MILESTONES: [u8; 3] = [25, 50, 75];

pub fn results_container_id(video_id: &str) -> String {
    format!("{video_id}-results")
}

/// Rounded playback percentage; 0 while the duration is unknown.
pub fn progress_percent(current_secs: f64, duration_secs: f64) -> u8 {
    if !current_secs.is_finite() || !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0;
    }
    (current_secs / duration_secs * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Ties one video to its analytics and to the results chart revealed when it ends.
pub struct VideoResults<E, D, S> {
    video_id: String,
    data: Vec<ChartDatum>,
    settings: ChartSettings,
    analytics: Analytics<E>,
    renderer: ResultChartRenderer<D, S>,
    reported: BTreeSet<u8>,
}

impl<E: EventSink, D: Dom, S: Scheduler> VideoResults<E, D, S> {
    pub fn new(
        video_id: impl Into<String>,
        data: Vec<ChartDatum>,
        settings: ChartSettings,
        analytics: Analytics<E>,
        renderer: ResultChartRenderer<D, S>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            data,
            settings,
            analytics,
            renderer,
            reported: BTreeSet::new(),
        }
    }

    pub fn container_id(&self) -> String {
        results_container_id(&self.video_id)
    }

    /// Reports `video_load` and prepares a hidden results container right
    /// after the video, reusing one that already exists. Returns `false`
    /// without side effects when the video element is missing.
    pub fn attach(&mut self) -> bool {
        let dom = self.renderer.dom();
        let Some(video) = dom.element_by_id(&self.video_id) else {
            tracing::debug!(video_id = %self.video_id, "video element missing");
            return false;
        };

        self.reported.clear();
        self.analytics
            .track_video_interaction(&self.video_id, VideoAction::Load, 0);

        let container_id = self.container_id();
        let container = match dom.element_by_id(&container_id) {
            Some(existing) => existing,
            None => {
                let Some(created) = dom.element_with_class("div", "video-results-container") else {
                    return false;
                };
                dom.set_attribute(&created, "id", &container_id);
                dom.insert_after(&video, &created);
                created
            }
        };

        dom.set_style(&container, "opacity", "0");
        dom.set_style(&container, "height", "0");
        dom.set_style(&container, "overflow", "hidden");
        dom.set_style(&container, "transition", &self.settings.transition("all"));
        true
    }

    pub fn on_play(&self, progress: u8) {
        self.analytics
            .track_video_interaction(&self.video_id, VideoAction::Play, progress);
    }

    pub fn on_pause(&self, progress: u8) {
        self.analytics
            .track_video_interaction(&self.video_id, VideoAction::Pause, progress);
    }

    /// Reports the 25/50/75% milestones, each once per attach.
    pub fn on_time_update(&mut self, progress: u8) {
        if PROGRESS_MILESTONES.contains(&progress) && self.reported.insert(progress) {
            self.analytics
                .track_video_interaction(&self.video_id, VideoAction::Progress, progress);
        }
    }

    /// Reports completion and reveals the animated results.
    pub fn on_ended(&mut self) -> bool {
        self.analytics
            .track_video_interaction(&self.video_id, VideoAction::Complete, 100);
        self.renderer
            .render(&self.container_id(), &self.data, &self.settings)
    }
}
