use crate::core::dom::Dom;
use crate::core::format::format_percent_length;
use crate::core::timing::Scheduler;

use super::{stagger_delay, ChartBuilder, ChartContext, ChartDatum};

/// Horizontal bars growing from 0% to their value. The value label jumps to
/// its final number when the bar starts to grow.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

impl ChartBuilder for BarChart {
    fn build<D: Dom, S: Scheduler>(
        &self,
        ctx: &ChartContext<'_, D, S>,
        container: &D::Node,
        data: &[ChartDatum],
    ) -> Option<()> {
        let dom = ctx.dom;
        let settings = ctx.settings;
        let chart = dom.element_with_class("div", "bar-chart-container")?;

        for (index, item) in data.iter().enumerate() {
            let row = dom.element_with_class("div", "bar-container")?;

            let label = dom.element_with_class("div", "bar-label")?;
            dom.set_text(&label, &item.label);

            let bar = dom.element_with_class("div", "bar")?;
            dom.set_style(&bar, "background-color", settings.color(index));
            dom.set_style(&bar, "width", "0%");
            dom.set_style(&bar, "transition", &settings.transition("width"));

            let value = dom.element_with_class("div", "bar-value")?;
            dom.set_text(&value, &settings.format_value(0.0));

            dom.append_child(&row, &label);
            dom.append_child(&row, &bar);
            dom.append_child(&row, &value);
            dom.append_child(&chart, &row);

            let width = format_percent_length(item.value);
            let text = settings.format_value(item.value);
            let target = bar.clone();
            ctx.after_if_attached(stagger_delay(index), bar, move |dom| {
                dom.set_style(&target, "width", &width);
                dom.set_text(&value, &text);
            });
        }

        dom.append_child(container, &chart);
        Some(())
    }
}
