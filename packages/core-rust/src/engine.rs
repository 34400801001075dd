//! Extraction engine: applies every registered pattern to a piece of text.
//!
//! Each pattern is run independently against the full input, so one label's
//! matches never consume text another label needs. The same substring may
//! therefore show up under several labels.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::PatternRegistry;

/// Matches grouped by label, borrowed from the registry and the input text.
///
/// Labels without matches are absent rather than mapped to an empty list.
/// Serializes as a plain object (`{"label": ["match", ...]}`) with keys in
/// sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Extraction<'a> {
    labels: BTreeMap<&'a str, Vec<&'a str>>,
}

impl<'a> Extraction<'a> {
    /// Number of labels with at least one match.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Matches for `label` in input order, or `None` if it matched nothing.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[&'a str]> {
        self.labels.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a str])> {
        self.labels.iter().map(|(label, hits)| (*label, hits.as_slice()))
    }

    /// Total number of matches across all labels.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.labels.values().map(Vec::len).sum()
    }

    /// Copies the result out of the borrowed registry and text.
    #[must_use]
    pub fn into_owned(self) -> BTreeMap<String, Vec<String>> {
        self.labels
            .into_iter()
            .map(|(label, hits)| {
                (
                    label.to_owned(),
                    hits.into_iter().map(str::to_owned).collect(),
                )
            })
            .collect()
    }
}

/// Runs every pattern in `registry` over `text`.
///
/// Pure function of the registry contents and the text; it performs no
/// syntax checks and cannot fail. Empty text yields an empty result.
#[must_use]
pub fn extract_all<'a>(registry: &'a PatternRegistry, text: &'a str) -> Extraction<'a> {
    let mut labels = BTreeMap::new();
    if text.is_empty() {
        return Extraction { labels };
    }

    for pattern in registry.iter() {
        let hits = pattern.find_all(text);
        if !hits.is_empty() {
            labels.insert(pattern.name(), hits);
        }
    }

    Extraction { labels }
}

/// Owns a frozen [`PatternRegistry`] and serves extractions from it.
///
/// The registry cannot be reached mutably once wrapped, so an `Extractor`
/// behind an `Arc` can be shared by any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    registry: PatternRegistry,
}

impl Extractor {
    #[must_use]
    pub fn new(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    /// Number of labels this extractor reports on.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.registry.len()
    }

    /// Finds all matches of every registered pattern in `text`.
    #[must_use]
    pub fn extract<'a>(&'a self, text: &'a str) -> Extraction<'a> {
        extract_all(&self.registry, text)
    }
}
