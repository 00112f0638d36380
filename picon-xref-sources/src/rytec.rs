//! Streaming reader for `rytec.channels.xml`.
//!
//! The file is a flat list of `<channel id="…">REF</channel>` elements
//! interleaved with comments. Comments on their own line label what follows
//! (a satellite position, a transport type, or a channel name); a comment on
//! the same line right after `</channel>` names that channel.

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use picon_xref_core::{RawXmlEntry, is_section_label};

use crate::error::SourceError;

/// An open `<channel>` element whose text is still being collected.
struct OpenChannel {
    id: String,
    text: String,
}

/// Parse a channel list into raw entries, in document order.
pub fn parse_rytec<R: BufRead>(reader: R) -> Result<Vec<RawXmlEntry>, SourceError> {
    let mut xml = Reader::from_reader(reader);
    // Whitespace text carries the newlines that separate trailing comments
    // from leading ones.
    xml.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut entries: Vec<RawXmlEntry> = Vec::new();

    let mut section: Option<String> = None;
    let mut pending: Option<String> = None;
    let mut open: Option<OpenChannel> = None;
    // Index of the channel just closed, while still on its line.
    let mut trailing: Option<usize> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                trailing = None;
                if e.name().as_ref() == b"channel" {
                    open = Some(OpenChannel {
                        id: channel_id(e)?,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(ref e) => {
                trailing = None;
                if e.name().as_ref() == b"channel" {
                    let before = pending.take().or_else(|| section.clone());
                    entries.push(RawXmlEntry {
                        before,
                        channel_id: channel_id(e)?,
                        service_ref: String::new(),
                        after: None,
                        section: section.clone(),
                    });
                    trailing = Some(entries.len() - 1);
                }
            }
            Event::Text(ref e) => {
                if let Some(ref mut channel) = open {
                    channel.text.push_str(&e.unescape()?);
                } else if trailing.is_some() && e.iter().any(|&b| b == b'\n') {
                    trailing = None;
                }
            }
            Event::Comment(ref e) => {
                let text = String::from_utf8_lossy(&e[..]).trim().to_string();
                if text.is_empty() {
                    trailing = None;
                } else if let Some(index) = trailing.take() {
                    entries[index].after = Some(text);
                } else {
                    if is_section_label(&text) {
                        section = Some(text.clone());
                    }
                    pending = Some(text);
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"channel" {
                    if let Some(channel) = open.take() {
                        let before = pending.take().or_else(|| section.clone());
                        entries.push(RawXmlEntry {
                            before,
                            channel_id: channel.id,
                            service_ref: channel.text.trim().to_string(),
                            after: None,
                            section: section.clone(),
                        });
                        trailing = Some(entries.len() - 1);
                    }
                } else {
                    trailing = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("Read {} channel entries", entries.len());
    Ok(entries)
}

/// Parse a channel list from a file path.
pub fn parse_rytec_file(path: &Path) -> Result<Vec<RawXmlEntry>, SourceError> {
    let file = std::fs::File::open(path)?;
    parse_rytec(std::io::BufReader::new(file))
}

fn channel_id(e: &BytesStart<'_>) -> Result<String, SourceError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"id" {
            return Ok(attr.unescape_value()?.trim().to_string());
        }
    }
    Ok(String::new())
}

#[cfg(test)]
#[path = "tests/rytec_tests.rs"]
mod tests;
