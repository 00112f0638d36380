//! Joining the logo catalog against the channel-list catalog.
//!
//! [`partition`] is plain set algebra over the normalized key spaces.
//! For logos with no channel-list entry, [`suggest_matches`] ranks channel
//! entries by field-wise similarity and [`decimal_variant`] tries the
//! decimal-to-hex re-encoding some logo files were named with.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::XrefError;
use crate::key::{NAMESPACE, ORIGINAL_NETWORK_ID, ServiceKey, TRANSPORT_STREAM_ID};
use crate::report::{Report, build_report};

pub const NAMESPACE_WEIGHT: u32 = 3;
pub const ORIGINAL_NETWORK_ID_WEIGHT: u32 = 2;
pub const TRANSPORT_STREAM_PREFIX_WEIGHT: u32 = 1;
pub const SERVICE_ID_WEIGHT: u32 = 1;

/// Characters of the transport stream id compared by [`similarity`].
pub const TRANSPORT_STREAM_PREFIX_LEN: usize = 4;

/// Tunables for suggestion ranking and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Candidates scoring below this are discarded.
    pub min_score: u32,
    /// Maximum number of suggestions returned per key.
    pub max_suggestions: usize,
    /// Minimum score for the top suggestion to be named in the report.
    pub report_threshold: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: 2,
            max_suggestions: 5,
            report_threshold: 3,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn report_threshold(mut self, report_threshold: u32) -> Self {
        self.report_threshold = report_threshold;
        self
    }
}

/// A ranked channel-list candidate for a logo key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub png_key: ServiceKey,
    pub candidate_key: ServiceKey,
    pub score: u32,
}

/// The three disjoint key sets of a join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub both: BTreeSet<ServiceKey>,
    pub png_only: BTreeSet<ServiceKey>,
    pub xml_only: BTreeSet<ServiceKey>,
}

impl Partition {
    /// Number of distinct keys across both catalogs.
    pub fn total(&self) -> usize {
        self.both.len() + self.png_only.len() + self.xml_only.len()
    }
}

/// Split the union of both key spaces into intersection and the two
/// one-sided differences.
pub fn partition(png: &Catalog, xml: &Catalog) -> Partition {
    let mut result = Partition::default();
    for key in png.keys() {
        if xml.contains(key) {
            result.both.insert(key.clone());
        } else {
            result.png_only.insert(key.clone());
        }
    }
    result.xml_only = xml.keys().filter(|k| !png.contains(k)).cloned().collect();
    result
}

fn prefix(field: &str, len: usize) -> &str {
    match field.char_indices().nth(len) {
        Some((end, _)) => &field[..end],
        None => field,
    }
}

/// Field-wise similarity of two keys.
///
/// Namespace +3, original network id +2, transport stream id prefix +1,
/// service id +1.
pub fn similarity(a: &ServiceKey, b: &ServiceKey) -> u32 {
    let mut score = 0;
    if a.namespace() == b.namespace() {
        score += NAMESPACE_WEIGHT;
    }
    if a.original_network_id() == b.original_network_id() {
        score += ORIGINAL_NETWORK_ID_WEIGHT;
    }
    if prefix(a.transport_stream_id(), TRANSPORT_STREAM_PREFIX_LEN)
        == prefix(b.transport_stream_id(), TRANSPORT_STREAM_PREFIX_LEN)
    {
        score += TRANSPORT_STREAM_PREFIX_WEIGHT;
    }
    if a.service_id() == b.service_id() {
        score += SERVICE_ID_WEIGHT;
    }
    score
}

/// Rank every channel-list key against `png_key`.
///
/// Keeps scores of at least `options.min_score`, sorted by descending score
/// then ascending SRC string, truncated to `options.max_suggestions`.
pub fn suggest_matches(
    png_key: &ServiceKey,
    xml: &Catalog,
    options: &MatchOptions,
) -> Vec<MatchResult> {
    let mut scored: Vec<(u32, String, &ServiceKey)> = xml
        .keys()
        .filter_map(|candidate| {
            let score = similarity(png_key, candidate);
            (score >= options.min_score).then(|| (score, candidate.to_src(), candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.truncate(options.max_suggestions);

    scored
        .into_iter()
        .map(|(score, _, candidate)| MatchResult {
            png_key: png_key.clone(),
            candidate_key: candidate.clone(),
            score,
        })
        .collect()
}

/// Re-encode the transport stream, original network and namespace fields
/// from decimal to uppercase hex.
///
/// Returns `None` unless all three fields are decimal numbers and the
/// re-encoded key differs from the original.
pub fn decimal_variant(key: &ServiceKey) -> Option<ServiceKey> {
    let mut variant = key.clone();
    for index in [TRANSPORT_STREAM_ID, ORIGINAL_NETWORK_ID, NAMESPACE] {
        let field = key.field(index);
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u64 = field.parse().ok()?;
        variant = variant.with_field(index, &format!("{value:X}"));
    }
    (variant != *key).then_some(variant)
}

/// Look up the decimal variant of a logo key in the channel list.
pub fn resolve_variant(png_key: &ServiceKey, xml: &Catalog) -> Option<ServiceKey> {
    decimal_variant(png_key).filter(|variant| xml.contains(variant))
}

/// Everything one reconciliation run produces.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub partition: Partition,
    pub report: Report,
    /// Non-fatal conditions worth surfacing (empty sources).
    pub notices: Vec<XrefError>,
}

/// Partition both catalogs and render the reports.
pub fn reconcile(png: &Catalog, xml: &Catalog, options: &MatchOptions) -> Reconciliation {
    let notices: Vec<XrefError> = [png.check_nonempty(), xml.check_nonempty()]
        .into_iter()
        .filter_map(Result::err)
        .collect();

    let partition = partition(png, xml);
    let report = build_report(&partition, png, xml, options, &notices);

    Reconciliation {
        partition,
        report,
        notices,
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
