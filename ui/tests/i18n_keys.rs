//! Guards for the Fluent bundles under `ui/i18n/`.
//!
//! The parser is deliberately simple: any non-comment line shaped like
//! `id = ...` defines message `id`. Terms (`-id`), attributes (`.attr`) and
//! continuation lines are skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const EN_US: &str = include_str!("../i18n/en-US/edgecase-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/edgecase-ui.ftl");

fn message_ids(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.starts_with('-') && !line.starts_with('.'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| is_message_id(id))
        .map(str::to_string)
        .collect()
}

fn is_message_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
}

fn id_set(src: &str) -> BTreeSet<String> {
    message_ids(src).into_iter().collect()
}

/// Literal keys passed to `t!` anywhere under `src_root`.
fn referenced_keys(src_root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (at, needle) in content.match_indices("t!(\"") {
            // `format!(` and friends also end in `t!(`.
            let prefixed = content[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
            if prefixed {
                continue;
            }
            let rest = &content[at + needle.len()..];
            if let Some((key, _)) = rest.split_once('"') {
                if is_message_id(key) {
                    found.insert(key.to_string());
                }
            }
        }
    }
    found
}

#[test]
fn no_locale_defines_a_key_twice() {
    for (locale, src) in [("en-US", EN_US), ("es-ES", ES_ES)] {
        let ids = message_ids(src);
        let unique = id_set(src);
        assert_eq!(ids.len(), unique.len(), "{locale} repeats a message id");
    }
}

#[test]
fn every_locale_matches_the_fallback() {
    let fallback = id_set(EN_US);
    assert!(!fallback.is_empty(), "fallback bundle has no messages");

    let spanish = id_set(ES_ES);
    let missing: Vec<_> = fallback.difference(&spanish).collect();
    let extra: Vec<_> = spanish.difference(&fallback).collect();
    assert!(missing.is_empty(), "es-ES is missing {missing:?}");
    assert!(extra.is_empty(), "es-ES defines keys unknown to en-US: {extra:?}");
}

#[test]
fn every_locale_folder_ships_the_bundle() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n");
    let locales: Vec<_> = fs::read_dir(&root)
        .expect("i18n directory exists")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .collect();
    assert!(locales.len() >= 2);
    for locale in locales {
        let bundle = locale.path().join("edgecase-ui.ftl");
        assert!(bundle.exists(), "{bundle:?} is missing");
    }
}

#[test]
fn source_keys_exist_and_fallback_has_no_strays() {
    let fallback = id_set(EN_US);
    let used = referenced_keys(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"));
    assert!(!used.is_empty(), "no t! calls found; did the scan path change?");

    let undefined: Vec<_> = used.difference(&fallback).collect();
    assert!(undefined.is_empty(), "t! keys missing from en-US: {undefined:?}");

    let unused: Vec<_> = fallback.difference(&used).collect();
    assert!(unused.is_empty(), "en-US keys never referenced: {unused:?}");
}
