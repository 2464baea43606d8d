#![cfg(test)]
/*!
Theme selector lint for the web build.

The chart builders in `ui::results` emit fixed class names at runtime; if the
shared theme (`ui/assets/theme/main.css`, inlined by `web/src/main.rs`) drops
or renames one of them the charts render unstyled without any error. This test
keeps the two in step with a plain substring check.

If you intentionally rename a selector, update the builder markup and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".site-header",
    ".site-main",
    ".site-footer",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Layout test variants
    ".layout-standard",
    ".layout-extended",
    // Video results
    ".video-results-container",
    ".results-title",
    // Bar chart
    ".bar-chart-container",
    ".bar-container",
    ".bar-label",
    ".bar {",
    ".bar-value",
    // Line chart
    ".line-chart-container",
    ".svg-container",
    ".line-label",
    // Circle chart
    ".circle-chart-container",
    ".circle-container",
    ".circle-label",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 2_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or path change?"
    );
}

#[test]
fn every_layout_variant_is_styled() {
    for variant in ui::experiments::LAYOUT_VARIANTS {
        let class = format!(".{}", ui::session::layout_class(variant));
        assert!(
            THEME_CSS.contains(&class),
            "Layout variant `{variant}` has no `{class}` rules"
        );
    }
}
