//! Service-reference reconciliation between picon logo files and the rytec
//! channel list.
//!
//! The crate is I/O free: callers hand in logo paths and pre-split channel
//! entries, and get catalogs, a [`Partition`] of the two key spaces, and
//! report lines back. Fetching and writing live in `picon-xref-sources`.

pub mod catalog;
pub mod error;
pub mod key;
pub mod reconcile;
pub mod report;
pub mod satellite;

pub use catalog::{Catalog, ChannelRecord, RawXmlEntry, SourceTag, prefers_name};
pub use error::XrefError;
pub use key::{Delimiter, FIELD_COUNT, ServiceKey, encode, keys_equal, to_canonical_fields};
pub use reconcile::{
    MatchOptions, MatchResult, Partition, Reconciliation, decimal_variant, partition, reconcile,
    resolve_variant, similarity, suggest_matches,
};
pub use report::{
    PngOnlyResolution, ReconcileStats, Report, ReportLines, ReportSink, UNKNOWN_NAME, build_report,
};
pub use satellite::{SatellitePosition, format_satellites, is_section_label};
