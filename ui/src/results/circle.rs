use std::f64::consts::PI;

use crate::core::dom::Dom;
use crate::core::timing::Scheduler;

use super::{stagger_delay, ChartBuilder, ChartContext, ChartDatum};

pub const RING_RADIUS: f64 = 54.0;
/// Dash length written up front; the animated offset uses the exact circumference.
const RING_DASH: &str = "339.292";

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Dash offset that leaves `value` percent of the ring visible.
pub fn ring_offset(value: f64) -> f64 {
    let circumference = ring_circumference();
    circumference - (value / 100.0 * circumference)
}

/// Fraction of a count-up completed after `elapsed_ms`, within `[0, 1]`.
pub fn count_up_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Ring gauges, one per datum, with a centred number counting up in step
/// with the ring fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleChart;

impl ChartBuilder for CircleChart {
    fn build<D: Dom, S: Scheduler>(
        &self,
        ctx: &ChartContext<'_, D, S>,
        container: &D::Node,
        data: &[ChartDatum],
    ) -> Option<()> {
        let dom = ctx.dom;
        let settings = ctx.settings;
        let chart = dom.element_with_class("div", "circle-chart-container")?;

        for (index, item) in data.iter().enumerate() {
            let gauge = dom.element_with_class("div", "circle-container")?;
            let svg = dom.svg_element(
                "svg",
                &[("width", "120"), ("height", "120"), ("viewBox", "0 0 120 120")],
            )?;
            let track = dom.svg_element(
                "circle",
                &[
                    ("cx", "60"),
                    ("cy", "60"),
                    ("r", "54"),
                    ("fill", "none"),
                    ("stroke", "#eee"),
                    ("stroke-width", "12"),
                ],
            )?;
            let ring = dom.svg_element(
                "circle",
                &[
                    ("cx", "60"),
                    ("cy", "60"),
                    ("r", "54"),
                    ("fill", "none"),
                    ("stroke", settings.color(index)),
                    ("stroke-width", "12"),
                    ("stroke-dasharray", RING_DASH),
                    ("stroke-dashoffset", RING_DASH),
                    ("transform", "rotate(-90 60 60)"),
                ],
            )?;
            let readout = dom.svg_element(
                "text",
                &[
                    ("x", "60"),
                    ("y", "60"),
                    ("text-anchor", "middle"),
                    ("dominant-baseline", "central"),
                    ("font-size", "28"),
                    ("font-weight", "bold"),
                ],
            )?;
            dom.set_text(&readout, &settings.format_value(0.0));

            let label = dom.element_with_class("div", "circle-label")?;
            dom.set_text(&label, &item.label);

            dom.append_child(&svg, &track);
            dom.append_child(&svg, &ring);
            dom.append_child(&svg, &readout);
            dom.append_child(&gauge, &svg);
            dom.append_child(&gauge, &label);
            dom.append_child(&chart, &gauge);

            let transition = settings.transition("stroke-dashoffset");
            let offset = ring_offset(item.value).to_string();
            let scheduler = ctx.scheduler.clone();
            let target = item.value;
            let duration_ms = f64::from(settings.animation_duration_ms);
            let show_percentage = settings.show_percentage;
            let guard = ring.clone();
            ctx.after_if_attached(stagger_delay(index), guard, move |dom| {
                dom.set_style(&ring, "transition", &transition);
                dom.set_attribute(&ring, "stroke-dashoffset", &offset);
                CountUp {
                    started_at: scheduler.now(),
                    dom: dom.clone(),
                    scheduler,
                    node: readout,
                    target,
                    duration_ms,
                    show_percentage,
                }
                .start();
            });
        }

        dom.append_child(container, &chart);
        Some(())
    }
}

/// Whole number shown at `progress`. Adding zero folds `-0` into `0`.
pub fn count_up_value(progress: f64, target: f64) -> f64 {
    (progress * target).round() + 0.0
}

/// Per-frame number animation from 0 to `target`.
///
/// Each frame shows `round(progress * target)` and re-arms itself until
/// progress reaches 1. A node detached from the document ends the task early.
pub struct CountUp<D: Dom, S> {
    pub dom: D,
    pub scheduler: S,
    pub node: D::Node,
    pub target: f64,
    pub duration_ms: f64,
    pub started_at: f64,
    pub show_percentage: bool,
}

impl<D: Dom, S: Scheduler> CountUp<D, S> {
    pub fn start(self) {
        let scheduler = self.scheduler.clone();
        scheduler.next_frame(Box::new(move |timestamp| self.tick(timestamp)));
    }

    fn tick(self, timestamp: f64) {
        if !self.dom.is_connected(&self.node) {
            return;
        }
        let progress = count_up_progress(timestamp - self.started_at, self.duration_ms);
        let shown = count_up_value(progress, self.target);
        self.dom.set_text(
            &self.node,
            &crate::core::format::format_value(shown, self.show_percentage),
        );
        if progress < 1.0 {
            self.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_offset_spans_full_to_empty() {
        assert_eq!(ring_offset(0.0), ring_circumference());
        assert_eq!(ring_offset(100.0), 0.0);
        assert!((ring_offset(25.0) - ring_circumference() * 0.75).abs() < 1e-9);
        assert!((ring_circumference() - 339.292).abs() < 1e-3);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(count_up_progress(-5.0, 1000.0), 0.0);
        assert_eq!(count_up_progress(500.0, 1000.0), 0.5);
        assert_eq!(count_up_progress(1500.0, 1000.0), 1.0);
        assert_eq!(count_up_progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn negative_targets_never_show_negative_zero() {
        for progress in [0.0, 0.5, 1.0] {
            let shown = count_up_value(progress, -0.4);
            assert!(shown.is_sign_positive(), "{shown} at {progress}");
            assert_eq!(crate::core::format::format_value(shown, true), "0%");
        }
        assert_eq!(count_up_value(1.0, -3.0), -3.0);
    }
}
