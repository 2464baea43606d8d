use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::json;

use crate::analytics::{props, EventSink};
use crate::core::storage::KeyValueStore;

/// Storage key prefix for persisted assignments.
pub const STORAGE_PREFIX: &str = "abtest_";

pub fn storage_key(test_name: &str) -> String {
    format!("{STORAGE_PREFIX}{test_name}")
}

/// Weighted, sticky A/B assignment for one browsing session.
///
/// Assignments are persisted in the [`KeyValueStore`] so they survive page
/// loads; the in-memory map only covers tests evaluated during this session
/// and is what conversions are attributed against.
#[derive(Debug)]
pub struct VariantAssigner<K, S, R = StdRng> {
    store: K,
    sink: S,
    rng: R,
    active: HashMap<String, String>,
}

impl<K: KeyValueStore, S: EventSink> VariantAssigner<K, S> {
    pub fn new(store: K, sink: S) -> Self {
        Self::with_rng(store, sink, StdRng::from_entropy())
    }
}

impl<K: KeyValueStore, S: EventSink, R: RngCore> VariantAssigner<K, S, R> {
    pub fn with_rng(store: K, sink: S, rng: R) -> Self {
        Self {
            store,
            sink,
            rng,
            active: HashMap::new(),
        }
    }

    /// Returns the visitor's variant for `test_name`.
    ///
    /// A persisted variant that is still offered wins. Otherwise one is drawn
    /// by weight (uniform when `weights` is missing or malformed), persisted,
    /// and announced with a single `ab_test_assignment` event. `None` only
    /// when `variants` is empty.
    pub fn assign(
        &mut self,
        test_name: &str,
        variants: &[&str],
        weights: Option<&[f64]>,
    ) -> Option<String> {
        if variants.is_empty() {
            tracing::warn!(test_name, "A/B test has no variants");
            return None;
        }

        let key = storage_key(test_name);
        let stored = self
            .store
            .get(&key)
            .filter(|stored| variants.contains(&stored.as_str()));

        let assigned = match stored {
            Some(stored) => {
                tracing::debug!(test_name, variant = %stored, "reusing stored variant");
                stored
            }
            None => {
                let weights = normalized_weights(variants.len(), weights);
                let draw = self.rng.gen::<f64>();
                let picked = pick_weighted(variants, &weights, draw).to_string();
                self.store.set(&key, &picked);
                tracing::debug!(test_name, variant = %picked, draw, "assigned new variant");
                self.sink.emit(
                    "ab_test_assignment",
                    props([
                        ("test_name", json!(test_name)),
                        ("test_variant", json!(picked)),
                    ]),
                );
                picked
            }
        };

        self.active.insert(test_name.to_string(), assigned.clone());
        Some(assigned)
    }

    /// The variant assigned to `test_name` during this session, if any.
    pub fn variant(&self, test_name: &str) -> Option<&str> {
        self.active.get(test_name).map(String::as_str)
    }

    /// Emits `ab_test_conversion` for a test assigned this session; no-op otherwise.
    pub fn record_conversion(&self, test_name: &str, conversion_kind: &str) {
        let Some(variant) = self.active.get(test_name) else {
            tracing::debug!(test_name, "conversion ignored, test not active");
            return;
        };
        self.sink.emit(
            "ab_test_conversion",
            props([
                ("test_name", json!(test_name)),
                ("test_variant", json!(variant)),
                ("conversion_type", json!(conversion_kind)),
            ]),
        );
    }
}

/// Caller weights when they line up with the variants and are usable,
/// otherwise `1/len` each.
fn normalized_weights(len: usize, weights: Option<&[f64]>) -> Vec<f64> {
    match weights {
        Some(weights)
            if weights.len() == len && weights.iter().all(|w| w.is_finite() && *w >= 0.0) =>
        {
            weights.to_vec()
        }
        _ => vec![1.0 / len as f64; len],
    }
}

/// Roulette selection: first variant whose cumulative weight reaches `draw`,
/// the last variant when rounding leaves the sum short of it.
fn pick_weighted<'a>(variants: &[&'a str], weights: &[f64], draw: f64) -> &'a str {
    let mut cumulative = 0.0;
    for (variant, weight) in variants.iter().zip(weights) {
        cumulative += weight;
        if draw <= cumulative {
            return *variant;
        }
    }
    variants[variants.len() - 1]
}
