//! Service-reference keys and the two textual encodings they travel in.
//!
//! The channel catalog writes references colon-joined with a trailing colon:
//! ```text
//! 1:0:1:27:791A:217C:EEEE0000:0:0:0:
//! ```
//! Logo files carry the same ten fields underscore-joined, without a
//! trailing separator (the "SRC"):
//! ```text
//! 1_0_1_27_791A_217C_EEEE0000_0_0_0
//! ```
//! Both parse into the same [`ServiceKey`]; every comparison in this crate
//! goes through that normalized form.

use std::fmt;
use std::str::FromStr;

use crate::error::XrefError;

/// Number of positional fields in a service reference.
pub const FIELD_COUNT: usize = 10;

pub const SERVICE_TYPE: usize = 0;
pub const DVB_FLAG: usize = 1;
pub const SERVICE_ID: usize = 2;
pub const TRANSPORT_STREAM_ID: usize = 3;
pub const ORIGINAL_NETWORK_ID: usize = 4;
pub const NAMESPACE: usize = 5;
/// First of the four trailing extra fields.
pub const EXTRA_FIELD_1: usize = 6;

/// Field separator of a textual service reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// XML form: `1:0:1:...:0:` (trailing colon)
    Colon,
    /// Filename form: `1_0_1_..._0` (no trailing separator)
    Underscore,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Colon => ':',
            Delimiter::Underscore => '_',
        }
    }

    /// Guess the delimiter of a reference: colon if one is present.
    pub fn detect(text: &str) -> Self {
        if text.contains(':') {
            Delimiter::Colon
        } else {
            Delimiter::Underscore
        }
    }
}

/// Split a reference into its ten canonical (uppercase) fields.
///
/// A single trailing empty field left by a trailing delimiter is dropped.
/// Anything other than exactly [`FIELD_COUNT`] non-empty fields is a
/// [`XrefError::MalformedKey`]; short references are never padded.
pub fn to_canonical_fields(
    text: &str,
    delimiter: Delimiter,
) -> Result<[String; FIELD_COUNT], XrefError> {
    let trimmed = text.trim();
    let mut parts: Vec<&str> = trimmed.split(delimiter.as_char()).collect();
    if parts.last() == Some(&"") {
        parts.pop();
    }

    if parts.len() != FIELD_COUNT {
        return Err(XrefError::malformed_key(
            text,
            format!("expected {FIELD_COUNT} fields, got {}", parts.len()),
        ));
    }
    if let Some(pos) = parts.iter().position(|p| p.is_empty()) {
        return Err(XrefError::malformed_key(
            text,
            format!("field {} is empty", pos + 1),
        ));
    }

    Ok(std::array::from_fn(|i| parts[i].to_ascii_uppercase()))
}

/// Join fields with the given delimiter. The colon form gets a trailing colon.
pub fn encode<S: AsRef<str>>(fields: &[S], delimiter: Delimiter) -> String {
    let sep = delimiter.as_char();
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(field.as_ref());
    }
    if delimiter == Delimiter::Colon {
        out.push(sep);
    }
    out
}

/// Compare two textual references after normalization.
///
/// Each side may use either encoding. A reference that does not normalize
/// is equal to nothing.
pub fn keys_equal(a: &str, b: &str) -> bool {
    match (a.parse::<ServiceKey>(), b.parse::<ServiceKey>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Canonical identity of a channel's broadcast reference.
///
/// Ordering is field-wise, which is what the report listings sort by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey {
    fields: [String; FIELD_COUNT],
}

impl ServiceKey {
    pub fn parse(text: &str, delimiter: Delimiter) -> Result<Self, XrefError> {
        Ok(Self {
            fields: to_canonical_fields(text, delimiter)?,
        })
    }

    /// Parse the colon-joined catalog form.
    pub fn from_xml_ref(text: &str) -> Result<Self, XrefError> {
        Self::parse(text, Delimiter::Colon)
    }

    /// Parse the underscore-joined filename form.
    pub fn from_src(text: &str) -> Result<Self, XrefError> {
        Self::parse(text, Delimiter::Underscore)
    }

    pub fn fields(&self) -> &[String; FIELD_COUNT] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> &str {
        &self.fields[index]
    }

    pub fn service_type(&self) -> &str {
        self.field(SERVICE_TYPE)
    }

    pub fn dvb_flag(&self) -> &str {
        self.field(DVB_FLAG)
    }

    pub fn service_id(&self) -> &str {
        self.field(SERVICE_ID)
    }

    pub fn transport_stream_id(&self) -> &str {
        self.field(TRANSPORT_STREAM_ID)
    }

    pub fn original_network_id(&self) -> &str {
        self.field(ORIGINAL_NETWORK_ID)
    }

    pub fn namespace(&self) -> &str {
        self.field(NAMESPACE)
    }

    /// The four trailing fields after the namespace.
    pub fn extra_fields(&self) -> &[String] {
        &self.fields[EXTRA_FIELD_1..]
    }

    /// A copy of this key with one field replaced (value is uppercased).
    pub fn with_field(&self, index: usize, value: &str) -> Self {
        let mut fields = self.fields.clone();
        fields[index] = value.to_ascii_uppercase();
        Self { fields }
    }

    pub fn encode(&self, delimiter: Delimiter) -> String {
        encode(&self.fields, delimiter)
    }

    /// Underscore-joined logo filename stem.
    pub fn to_src(&self) -> String {
        self.encode(Delimiter::Underscore)
    }

    /// Colon-joined catalog form, with trailing colon.
    pub fn to_xml_ref(&self) -> String {
        self.encode(Delimiter::Colon)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_src())
    }
}

/// Parses either encoding, picking the delimiter with [`Delimiter::detect`].
impl FromStr for ServiceKey {
    type Err = XrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Delimiter::detect(s))
    }
}

#[cfg(test)]
#[path = "tests/key_tests.rs"]
mod tests;
