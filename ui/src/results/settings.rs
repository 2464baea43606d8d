//! Chart configuration: page-supplied options merged over defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MS: u32 = 1500;
pub const DEFAULT_TITLE: &str = "Key Results";
pub const DEFAULT_PALETTE: [&str; 5] = ["#0D47A1", "#1976D2", "#2196F3", "#64B5F6", "#BBDEFB"];

/// One labelled magnitude, nominally in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Circle,
}

impl ChartKind {
    /// Unknown names fall back to [`ChartKind::Bar`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "line" => Self::Line,
            "circle" => Self::Circle,
            _ => Self::Bar,
        }
    }
}

/// CSS timing functions accepted for the chart transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Unknown names fall back to `ease-out`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-in-out" => Self::EaseInOut,
            _ => Self::EaseOut,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Options as written in page markup or JSON; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub animation_duration: Option<u32>,
    pub animation_easing: Option<String>,
    pub show_percentage: Option<bool>,
    pub chart_type: Option<String>,
    pub chart_colors: Option<Vec<String>>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub animation_duration_ms: u32,
    pub easing: Easing,
    pub show_percentage: bool,
    pub chart_kind: ChartKind,
    pub color_palette: Vec<String>,
    pub title: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
            show_percentage: true,
            chart_kind: ChartKind::default(),
            color_palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ChartSettings {
    /// Overlays `options` on the defaults. A zero duration or an empty palette
    /// is treated as absent.
    pub fn from_options(options: &ChartOptions) -> Self {
        let defaults = Self::default();
        Self {
            animation_duration_ms: options
                .animation_duration
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.animation_duration_ms),
            easing: options
                .animation_easing
                .as_deref()
                .map(Easing::parse)
                .unwrap_or(defaults.easing),
            show_percentage: options.show_percentage.unwrap_or(defaults.show_percentage),
            chart_kind: options
                .chart_type
                .as_deref()
                .map(ChartKind::parse)
                .unwrap_or(defaults.chart_kind),
            color_palette: options
                .chart_colors
                .clone()
                .filter(|colors| !colors.is_empty())
                .unwrap_or(defaults.color_palette),
            title: options.title.clone().unwrap_or(defaults.title),
        }
    }

    /// Colour for the item at `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> &str {
        if self.color_palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.color_palette[index % self.color_palette.len()]
    }

    pub fn format_value(&self, value: f64) -> String {
        crate::core::format::format_value(value, self.show_percentage)
    }

    pub fn duration_css(&self) -> String {
        crate::core::format::format_seconds(self.animation_duration_ms)
    }

    /// `"<property> <secs>s <easing>"`.
    pub fn transition(&self, property: &str) -> String {
        format!("{property} {} {}", self.duration_css(), self.easing.as_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_merge_over_defaults() {
        let options: ChartOptions = serde_json::from_str(
            r##"{"chartType": "circle", "animationDuration": 1000, "chartColors": ["#111"]}"##,
        )
        .unwrap();
        let settings = ChartSettings::from_options(&options);

        assert_eq!(settings.chart_kind, ChartKind::Circle);
        assert_eq!(settings.animation_duration_ms, 1000);
        assert_eq!(settings.easing, Easing::EaseOut);
        assert!(settings.show_percentage);
        assert_eq!(settings.color(3), "#111");
        assert_eq!(settings.title, DEFAULT_TITLE);
    }

    #[test]
    fn unknown_names_use_sane_defaults() {
        assert_eq!(ChartKind::parse("pie"), ChartKind::Bar);
        assert_eq!(ChartKind::parse(" Line "), ChartKind::Line);
        assert_eq!(Easing::parse("bouncy"), Easing::EaseOut);

        let settings = ChartSettings::from_options(&ChartOptions {
            animation_duration: Some(0),
            chart_colors: Some(Vec::new()),
            ..ChartOptions::default()
        });
        assert_eq!(settings.animation_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(settings.color(6), DEFAULT_PALETTE[1]);
    }

    #[test]
    fn transition_strings_use_seconds() {
        let settings = ChartSettings::default();
        assert_eq!(settings.transition("width"), "width 1.5s ease-out");
    }
}
