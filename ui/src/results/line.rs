use std::fmt::Write as _;

use crate::core::dom::Dom;
use crate::core::format::{format_percent_length, format_seconds};
use crate::core::timing::Scheduler;

use super::{stagger_delay, ChartBuilder, ChartContext, ChartDatum, BASE_DELAY_MS};

/// Polyline in a 100×100 box that draws itself via stroke-dash animation,
/// with point markers and labels fading in one after another.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChart;

/// Plot coordinates: x spread evenly over `[0, 100]`, y inverted so larger
/// values sit higher. A single point lands at x = 0.
pub fn line_points(data: &[ChartDatum]) -> Vec<(f64, f64)> {
    let step = if data.len() > 1 {
        100.0 / (data.len() - 1) as f64
    } else {
        0.0
    };
    data.iter()
        .enumerate()
        .map(|(index, item)| (index as f64 * step, 100.0 - item.value))
        .collect()
}

/// `M x,y L x,y ...`; empty for no points.
pub fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (index, (x, y)) in points.iter().enumerate() {
        if index == 0 {
            let _ = write!(d, "M {x},{y}");
        } else {
            let _ = write!(d, " L {x},{y}");
        }
    }
    d
}

/// Total length of the straight segments joining `points`.
pub fn path_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].0 - pair[0].0).hypot(pair[1].1 - pair[0].1))
        .sum()
}

impl ChartBuilder for LineChart {
    fn build<D: Dom, S: Scheduler>(
        &self,
        ctx: &ChartContext<'_, D, S>,
        container: &D::Node,
        data: &[ChartDatum],
    ) -> Option<()> {
        let dom = ctx.dom;
        let settings = ctx.settings;
        let stroke = settings.color(0).to_string();

        let chart = dom.element_with_class("div", "line-chart-container")?;
        let svg_container = dom.element_with_class("div", "svg-container")?;
        let svg = dom.svg_element(
            "svg",
            &[
                ("width", "100%"),
                ("height", "200"),
                ("viewBox", "0 0 100 100"),
                ("preserveAspectRatio", "none"),
            ],
        )?;
        let path = dom.svg_element(
            "path",
            &[("fill", "none"), ("stroke", stroke.as_str()), ("stroke-width", "2")],
        )?;

        let points = line_points(data);
        let fade = format!("opacity {}", format_seconds(settings.animation_duration_ms));

        for (index, (item, (x, y))) in data.iter().zip(&points).enumerate() {
            let (cx, cy) = (x.to_string(), y.to_string());
            let point = dom.svg_element(
                "circle",
                &[
                    ("cx", cx.as_str()),
                    ("cy", cy.as_str()),
                    ("r", "2"),
                    ("fill", stroke.as_str()),
                    ("opacity", "0"),
                ],
            )?;
            dom.append_child(&svg, &point);
            let marker = point.clone();
            ctx.after_if_attached(stagger_delay(index), point, move |dom| {
                dom.set_attribute(&marker, "opacity", "1");
            });

            let label = dom.element_with_class("div", "line-label")?;
            dom.set_text(&label, &item.label);
            dom.set_style(&label, "left", &format_percent_length(*x));
            dom.set_style(&label, "opacity", "0");
            dom.set_style(&label, "transition", &fade);
            dom.append_child(&svg_container, &label);
            let caption = label.clone();
            ctx.after_if_attached(stagger_delay(index), label, move |dom| {
                dom.set_style(&caption, "opacity", "1");
            });
        }

        let length = path_length(&points).to_string();
        dom.set_attribute(&path, "d", &path_data(&points));
        dom.set_attribute(&path, "stroke-dasharray", &length);
        dom.set_attribute(&path, "stroke-dashoffset", &length);

        let transition = settings.transition("stroke-dashoffset");
        let line = path.clone();
        ctx.after_if_attached(BASE_DELAY_MS, path.clone(), move |dom| {
            dom.set_style(&line, "transition", &transition);
            dom.set_style(&line, "stroke-dashoffset", "0");
        });

        dom.append_child(&svg, &path);
        dom.append_child(&svg_container, &svg);
        dom.append_child(&chart, &svg_container);
        dom.append_child(container, &chart);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(values: &[f64]) -> Vec<ChartDatum> {
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| ChartDatum::new(format!("p{idx}"), *value))
            .collect()
    }

    #[test]
    fn points_spread_evenly_and_invert_y() {
        let points = line_points(&data(&[10.0, 50.0, 90.0]));
        assert_eq!(points, vec![(0.0, 90.0), (50.0, 50.0), (100.0, 10.0)]);
        assert_eq!(path_data(&points), "M 0,90 L 50,50 L 100,10");
    }

    #[test]
    fn single_point_sits_at_origin_without_segments() {
        let points = line_points(&data(&[30.0]));
        assert_eq!(points, vec![(0.0, 70.0)]);
        assert_eq!(path_data(&points), "M 0,70");
        assert_eq!(path_length(&points), 0.0);
    }

    #[test]
    fn length_sums_segments() {
        let points = [(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)];
        assert_eq!(path_length(&points), 11.0);
        assert_eq!(path_data(&[]), "");
    }
}
