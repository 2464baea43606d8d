//! Client-side A/B testing.

mod assigner;
pub use assigner::{storage_key, VariantAssigner, STORAGE_PREFIX};

/// Layout experiment run on every case-study page.
pub const LAYOUT_TEST: &str = "case_study_layout";
pub const LAYOUT_VARIANTS: [&str; 2] = ["standard", "extended"];
pub const LAYOUT_WEIGHTS: [f64; 2] = [0.5, 0.5];
