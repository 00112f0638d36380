//! Catalogs of channel records keyed by normalized [`ServiceKey`].
//!
//! One catalog is built per source: logo paths on one side, channel-list
//! entries on the other. Records that share a key are merged as they
//! arrive: satellite sets are unioned and the display name follows a single
//! precedence rule ([`prefers_name`]). A record whose reference does not
//! normalize is dropped and counted in [`Catalog::skipped`].

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::XrefError;
use crate::key::{Delimiter, ServiceKey};
use crate::satellite::{SatellitePosition, format_satellites, is_section_label};

/// Which source a record or catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTag {
    Xml,
    Png,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTag::Xml => f.write_str("XML"),
            SourceTag::Png => f.write_str("PNG"),
        }
    }
}

/// A channel-list entry, already split out of the surrounding markup.
///
/// ```text
/// <!-- 13.0E --><channel id="DonnaTV.it">1:0:1:27:791A:217C:EEEE0000:0:0:0:</channel><!-- Donna TV -->
///   before          channel_id            service_ref                                   after
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawXmlEntry {
    /// Comment preceding the entry (satellite position, transport label or name)
    pub before: Option<String>,
    /// The `id` attribute of the channel element
    pub channel_id: String,
    /// Colon-joined service reference
    pub service_ref: String,
    /// Comment following the entry on the same line (usually the channel name)
    pub after: Option<String>,
    /// Heading comment of the group the entry sits in (satellite position or
    /// transport label), independent of any name comment in between
    pub section: Option<String>,
}

impl RawXmlEntry {
    pub fn new(channel_id: impl Into<String>, service_ref: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            service_ref: service_ref.into(),
            ..Default::default()
        }
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// One channel, as known to a single catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub key: ServiceKey,
    pub display_name: String,
    /// The name is only the raw channel id (or the SRC, for logos)
    pub generic_name: bool,
    pub satellites: BTreeSet<SatellitePosition>,
    pub source: SourceTag,
}

impl ChannelRecord {
    /// Build a record from a logo path such as
    /// `logos/E2LIST/13.0E/1_0_1_27_791A_217C_EEEE0000_0_0_0.png`.
    ///
    /// Interior segments that are satellite positions become the satellite
    /// set; the file name minus `.png` is the SRC. Logos carry no name, so the
    /// SRC doubles as a generic display name.
    pub fn from_png_path(path: &str) -> Result<Self, XrefError> {
        let path = path.trim();
        let (dirs, file_name) = match path.rsplit_once('/') {
            Some((dirs, file)) => (dirs, file),
            None => ("", path),
        };
        let stem = match file_name.rsplit_once('.') {
            Some((stem, ext)) if ext.eq_ignore_ascii_case("png") => stem,
            _ => file_name,
        };

        let key = ServiceKey::parse(stem, Delimiter::Underscore)?;
        let satellites = dirs.split('/').filter_map(SatellitePosition::parse).collect();

        Ok(Self {
            display_name: key.to_src(),
            key,
            generic_name: true,
            satellites,
            source: SourceTag::Png,
        })
    }

    /// Build a record from a channel-list entry.
    ///
    /// Name preference: trailing comment, then the leading comment unless it
    /// is a satellite/transport heading, then the raw channel id. The
    /// satellite set comes from the leading comment when it is a position,
    /// otherwise from the enclosing section heading.
    pub fn from_xml_entry(entry: &RawXmlEntry) -> Result<Self, XrefError> {
        let key = ServiceKey::parse(&entry.service_ref, Delimiter::Colon)?;
        let before = non_empty(entry.before.as_deref());
        let after = non_empty(entry.after.as_deref());
        let section = non_empty(entry.section.as_deref());
        let channel_id = entry.channel_id.trim();

        let name = after
            .or_else(|| before.filter(|b| !is_section_label(b)))
            .unwrap_or(channel_id);
        let satellites = before
            .and_then(SatellitePosition::parse)
            .or_else(|| section.and_then(SatellitePosition::parse))
            .into_iter()
            .collect();

        Ok(Self {
            key,
            display_name: name.to_string(),
            generic_name: name == channel_id,
            satellites,
            source: SourceTag::Xml,
        })
    }

    /// Satellites rendered for a report line.
    pub fn satellites_label(&self) -> String {
        format_satellites(&self.satellites)
    }

    /// Merge another record for the same key into this one.
    ///
    /// Satellites are unioned; the name is taken over when [`prefers_name`]
    /// says so. Returns whether the name changed.
    pub fn absorb(&mut self, other: &ChannelRecord) -> bool {
        debug_assert_eq!(self.key, other.key);
        self.satellites.extend(other.satellites.iter().cloned());

        let take = prefers_name(
            &other.display_name,
            other.generic_name,
            &self.display_name,
            self.generic_name,
        );
        if take {
            log::debug!(
                "{}: name '{}' replaces '{}'",
                self.key,
                other.display_name,
                self.display_name
            );
            self.display_name = other.display_name.clone();
            self.generic_name = other.generic_name;
        } else if other.display_name != self.display_name {
            log::debug!(
                "{}: keeping name '{}' over '{}'",
                self.key,
                self.display_name,
                other.display_name
            );
        }
        take
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Name precedence: a non-generic name beats a generic one, then the longer
/// name (in characters) wins. Equal ranks fall back to the lexicographically
/// smaller name, so the outcome never depends on input order.
pub fn prefers_name(
    candidate: &str,
    candidate_generic: bool,
    current: &str,
    current_generic: bool,
) -> bool {
    let rank = |name: &str, generic: bool| (!generic, name.chars().count());
    match rank(candidate, candidate_generic).cmp(&rank(current, current_generic)) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate < current,
    }
}

/// All records of one source, keyed by normalized service key.
///
/// Built once from a complete input sequence and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: SourceTag,
    records: BTreeMap<ServiceKey, ChannelRecord>,
    inputs: usize,
    skipped: usize,
}

impl Catalog {
    /// An empty catalog for the given source.
    pub fn new(source: SourceTag) -> Self {
        Self {
            source,
            records: BTreeMap::new(),
            inputs: 0,
            skipped: 0,
        }
    }

    /// Build the logo-side catalog from slash-delimited `.png` paths.
    pub fn from_png_paths<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths.into_iter().fold(Self::new(SourceTag::Png), |mut catalog, path| {
            let path = path.as_ref();
            catalog.ingest(path, ChannelRecord::from_png_path(path));
            catalog
        })
    }

    /// Build the channel-list catalog from pre-split entries.
    pub fn from_xml_entries<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<RawXmlEntry>,
    {
        entries.into_iter().fold(Self::new(SourceTag::Xml), |mut catalog, entry| {
            let entry = entry.borrow();
            catalog.ingest(&entry.service_ref, ChannelRecord::from_xml_entry(entry));
            catalog
        })
    }

    fn ingest(&mut self, raw: &str, parsed: Result<ChannelRecord, XrefError>) {
        self.inputs += 1;
        match parsed {
            Ok(record) => self.insert(record),
            Err(e) => {
                log::debug!("Skipping {} record '{}': {}", self.source, raw.trim(), e);
                self.skipped += 1;
            }
        }
    }

    fn insert(&mut self, record: ChannelRecord) {
        match self.records.get_mut(&record.key) {
            Some(existing) => {
                existing.absorb(&record);
            }
            None => {
                self.records.insert(record.key.clone(), record);
            }
        }
    }

    pub fn source(&self) -> SourceTag {
        self.source
    }

    pub fn get(&self, key: &ServiceKey) -> Option<&ChannelRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.records.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &ChannelRecord> {
        self.records.values()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw records consumed, including skipped ones.
    pub fn input_count(&self) -> usize {
        self.inputs
    }

    /// Raw records dropped because their reference did not normalize.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// [`XrefError::EmptySource`] when the input sequence had no records.
    pub fn check_nonempty(&self) -> Result<(), XrefError> {
        if self.inputs == 0 {
            Err(XrefError::EmptySource(self.source))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
