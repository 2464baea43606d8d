//! Animated result charts shown once a case-study video ends.
//!
//! [`ResultChartRenderer`] clears a container, adds the title and hands the
//! data to the builder picked by [`ChartKind`]. Builders only create nodes and
//! schedule their own animations through the injected [`Scheduler`]; nothing
//! is retained between renders besides the nodes left in the container.

mod bar;
mod circle;
mod line;
mod settings;
mod video;

pub use bar::BarChart;
pub use circle::{count_up_progress, count_up_value, ring_circumference, ring_offset, CircleChart, CountUp, RING_RADIUS};
pub use line::{line_points, path_data, path_length, LineChart};
pub use settings::{
    ChartDatum, ChartKind, ChartOptions, ChartSettings, Easing, DEFAULT_DURATION_MS,
    DEFAULT_PALETTE, DEFAULT_TITLE,
};
pub use video::{progress_percent, results_container_id, VideoResults, PROGRESS_MILESTONES};

use crate::core::dom::Dom;
use crate::core::timing::Scheduler;

/// Delay before the first item animates.
pub const BASE_DELAY_MS: u32 = 100;
/// Extra delay per item index.
pub const STEP_DELAY_MS: u32 = 200;

/// Start delay for the item at `index`.
pub fn stagger_delay(index: usize) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    BASE_DELAY_MS.saturating_add(index.saturating_mul(STEP_DELAY_MS))
}

/// Borrowed collaborators and settings shared by every builder during one render.
pub struct ChartContext<'a, D, S> {
    pub dom: &'a D,
    pub scheduler: &'a S,
    pub settings: &'a ChartSettings,
}

impl<D: Dom, S: Scheduler> ChartContext<'_, D, S> {
    /// Runs `task` after `delay_ms`, but only if `guard` is still attached to
    /// the document by then.
    pub(crate) fn after_if_attached(
        &self,
        delay_ms: u32,
        guard: D::Node,
        task: impl FnOnce(&D) + 'static,
    ) {
        let dom = self.dom.clone();
        self.scheduler.after(
            delay_ms,
            Box::new(move || {
                if dom.is_connected(&guard) {
                    task(&dom);
                }
            }),
        );
    }
}

/// One chart style. Builders append their subtree to `container` and return
/// `None` if the DOM refused to create a node.
pub trait ChartBuilder {
    fn build<D: Dom, S: Scheduler>(
        &self,
        ctx: &ChartContext<'_, D, S>,
        container: &D::Node,
        data: &[ChartDatum],
    ) -> Option<()>;
}

#[derive(Debug, Clone)]
pub struct ResultChartRenderer<D, S> {
    dom: D,
    scheduler: S,
}

impl<D: Dom, S: Scheduler> ResultChartRenderer<D, S> {
    pub fn new(dom: D, scheduler: S) -> Self {
        Self { dom, scheduler }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Renders into the element with `container_id`. Returns `false`, having
    /// touched nothing, when there is no such element.
    pub fn render(&self, container_id: &str, data: &[ChartDatum], settings: &ChartSettings) -> bool {
        match self.dom.element_by_id(container_id) {
            Some(container) => self.render_into(&container, data, settings),
            None => {
                tracing::debug!(container_id, "results container missing, skipping render");
                false
            }
        }
    }

    /// Replaces the content of `container` with a freshly animated chart.
    pub fn render_into(&self, container: &D::Node, data: &[ChartDatum], settings: &ChartSettings) -> bool {
        let dom = &self.dom;
        dom.clear_children(container);
        dom.set_style(container, "opacity", "1");
        dom.set_style(container, "height", "auto");

        let Some(title) = dom.element_with_class("h3", "results-title") else {
            return false;
        };
        dom.set_text(&title, &settings.title);
        dom.append_child(container, &title);

        let ctx = ChartContext {
            dom,
            scheduler: &self.scheduler,
            settings,
        };
        let built = match settings.chart_kind {
            ChartKind::Bar => BarChart.build(&ctx, container, data),
            ChartKind::Line => LineChart.build(&ctx, container, data),
            ChartKind::Circle => CircleChart.build(&ctx, container, data),
        };
        tracing::debug!(kind = ?settings.chart_kind, items = data.len(), "rendered results chart");
        built.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_grows_by_step_per_index() {
        assert_eq!(stagger_delay(0), 100);
        assert_eq!(stagger_delay(1), 300);
        assert_eq!(stagger_delay(4), 900);
        assert_eq!(stagger_delay(usize::MAX), u32::MAX);
    }
}
