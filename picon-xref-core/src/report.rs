//! Report lines produced from a [`Partition`].
//!
//! Line shape shared by all listings (downstream tooling parses the mapping
//! report, so it must not change):
//! ```text
//! 1_0_1_27_791A_217C_EEEE0000_0_0_0 - Donna TV - 13.0E
//! ```

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::catalog::{Catalog, ChannelRecord};
use crate::error::XrefError;
use crate::key::ServiceKey;
use crate::reconcile::{MatchOptions, MatchResult, Partition, resolve_variant, suggest_matches};
use crate::satellite::UNKNOWN_SATELLITES;

pub const MAPPING_REPORT: &str = "mapping";
pub const PNG_ONLY_REPORT: &str = "png_only";
pub const XML_ONLY_REPORT: &str = "xml_only";
pub const SUMMARY_REPORT: &str = "summary";

/// Name marker for logos nothing in the channel list could be tied to.
pub const UNKNOWN_NAME: &str = "UNKN";

/// Destination for named reports (files, stdout, memory).
pub trait ReportSink {
    type Error;

    fn write_report(&mut self, name: &str, lines: &[String]) -> Result<(), Self::Error>;
}

/// In-memory sink keyed by report name.
impl ReportSink for BTreeMap<String, Vec<String>> {
    type Error = Infallible;

    fn write_report(&mut self, name: &str, lines: &[String]) -> Result<(), Self::Error> {
        self.insert(name.to_string(), lines.to_vec());
        Ok(())
    }
}

/// How a logo-only key was explained, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PngOnlyResolution {
    /// The decimal-to-hex variant of the key is in the channel list
    Variant(ServiceKey),
    /// Best similarity candidate, at or above the report threshold
    Suggested(MatchResult),
    Unknown,
}

/// Counts for the summary report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub png_keys: usize,
    pub xml_keys: usize,
    pub png_skipped: usize,
    pub xml_skipped: usize,
    pub both: usize,
    pub png_only: usize,
    pub xml_only: usize,
    pub variant_matches: usize,
    pub suggested: usize,
}

impl ReconcileStats {
    /// Share of channel-list keys that have a logo, in percent.
    pub fn coverage_percent(&self) -> f64 {
        if self.xml_keys == 0 {
            0.0
        } else {
            self.both as f64 / self.xml_keys as f64 * 100.0
        }
    }
}

/// Rendered report lines, one listing per report name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLines {
    pub mapping: Vec<String>,
    pub png_only: Vec<String>,
    pub xml_only: Vec<String>,
    pub summary: Vec<String>,
}

impl ReportLines {
    /// All listings paired with their report names, in write order.
    pub fn named(&self) -> [(&'static str, &[String]); 4] {
        [
            (MAPPING_REPORT, self.mapping.as_slice()),
            (PNG_ONLY_REPORT, self.png_only.as_slice()),
            (XML_ONLY_REPORT, self.xml_only.as_slice()),
            (SUMMARY_REPORT, self.summary.as_slice()),
        ]
    }

    /// Hand every listing to the sink, stopping at the first failure.
    pub fn write_to<S: ReportSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        for (name, lines) in self.named() {
            sink.write_report(name, lines)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub lines: ReportLines,
    pub stats: ReconcileStats,
    pub resolutions: BTreeMap<ServiceKey, PngOnlyResolution>,
}

fn line(key: &ServiceKey, name: &str, satellites: &str) -> String {
    format!("{key} - {name} - {satellites}")
}

/// Resolve one logo-only key: decimal variant first, then the top
/// similarity candidate if it clears `report_threshold`.
pub fn resolve_png_only(
    png_key: &ServiceKey,
    xml: &Catalog,
    options: &MatchOptions,
) -> PngOnlyResolution {
    if let Some(variant) = resolve_variant(png_key, xml) {
        return PngOnlyResolution::Variant(variant);
    }
    match suggest_matches(png_key, xml, options).into_iter().next() {
        Some(top) if top.score >= options.report_threshold => PngOnlyResolution::Suggested(top),
        _ => PngOnlyResolution::Unknown,
    }
}

/// Render every listing for a partition.
///
/// * mapping: keys in both catalogs, satellites unioned, channel-list name
/// * png_only: logo satellites, with the variant or suggestion when one
///   exists, else [`UNKNOWN_NAME`]
/// * xml_only: channel-list entries still lacking artwork
pub fn build_report(
    partition: &Partition,
    png: &Catalog,
    xml: &Catalog,
    options: &MatchOptions,
    notices: &[XrefError],
) -> Report {
    let mut report = Report::default();

    for key in &partition.both {
        if let Some(merged) = merged_record(key, png, xml) {
            report.lines.mapping.push(line(
                key,
                &merged.display_name,
                &merged.satellites_label(),
            ));
        }
    }

    for key in &partition.png_only {
        let satellites = png
            .get(key)
            .map(|r| r.satellites_label())
            .unwrap_or_else(|| UNKNOWN_SATELLITES.to_string());
        let resolution = resolve_png_only(key, xml, options);
        let name = match &resolution {
            PngOnlyResolution::Variant(variant) => {
                report.stats.variant_matches += 1;
                let xml_name = xml.get(variant).map_or(UNKNOWN_NAME, |r| r.display_name.as_str());
                format!("{xml_name} [= {variant}]")
            }
            PngOnlyResolution::Suggested(top) => {
                report.stats.suggested += 1;
                let xml_name = xml
                    .get(&top.candidate_key)
                    .map_or(UNKNOWN_NAME, |r| r.display_name.as_str());
                format!("{xml_name}? [~ {}, score {}]", top.candidate_key, top.score)
            }
            PngOnlyResolution::Unknown => UNKNOWN_NAME.to_string(),
        };
        report.lines.png_only.push(line(key, &name, &satellites));
        report.resolutions.insert(key.clone(), resolution);
    }

    for key in &partition.xml_only {
        if let Some(record) = xml.get(key) {
            report.lines.xml_only.push(line(
                key,
                &record.display_name,
                &record.satellites_label(),
            ));
        }
    }

    report.stats.png_keys = png.len();
    report.stats.xml_keys = xml.len();
    report.stats.png_skipped = png.skipped();
    report.stats.xml_skipped = xml.skipped();
    report.stats.both = partition.both.len();
    report.stats.png_only = partition.png_only.len();
    report.stats.xml_only = partition.xml_only.len();
    report.lines.summary = summary_lines(&report.stats, notices);

    report
}

/// The record for a key present in both catalogs.
///
/// The name is always the channel-list one (trailing comment, leading
/// comment, then channel id); a logo only contributes its satellites.
pub fn merged_record(key: &ServiceKey, png: &Catalog, xml: &Catalog) -> Option<ChannelRecord> {
    match (xml.get(key), png.get(key)) {
        (Some(x), Some(p)) => {
            let mut merged = x.clone();
            merged.satellites.extend(p.satellites.iter().cloned());
            Some(merged)
        }
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}

fn summary_lines(stats: &ReconcileStats, notices: &[XrefError]) -> Vec<String> {
    let mut lines = vec![
        format!("PNG keys: {}", stats.png_keys),
        format!("XML keys: {}", stats.xml_keys),
        format!("PNG records skipped: {}", stats.png_skipped),
        format!("XML records skipped: {}", stats.xml_skipped),
        format!("In both: {}", stats.both),
        format!("PNG only: {}", stats.png_only),
        format!("XML only: {}", stats.xml_only),
        format!("PNG only, decimal variant found: {}", stats.variant_matches),
        format!("PNG only, suggestion found: {}", stats.suggested),
        format!("XML coverage: {:.1}%", stats.coverage_percent()),
    ];
    lines.extend(notices.iter().map(|n| format!("Notice: {n}")));
    lines
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
