//! Decoded tag tables.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use super::DirectoryKind;

// =============================================================================
// Rational
// =============================================================================

/// A numerator/denominator pair as stored in rational-format tags.
///
/// Unsigned rationals hold the raw `u32` values, signed rationals the
/// sign-extended `i32` values. The denominator may be zero; no reduction or
/// validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Rational {
            numerator,
            denominator,
        }
    }

    /// Value as a float, or `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(self.numerator as f64 / self.denominator as f64)
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// A decoded tag value.
///
/// Scalars are produced for single-component entries, arrays for every other
/// component count (including zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i64),
    IntArray(Vec<i64>),
    String(String),
    Rational(Rational),
    RationalArray(Vec<Rational>),
    ByteArray(Bytes),
}

impl TagValue {
    /// Short name of the value's shape, used in dumps.
    pub const fn type_name(&self) -> &'static str {
        match self {
            TagValue::Int(_) => "int",
            TagValue::IntArray(_) => "int[]",
            TagValue::String(_) => "string",
            TagValue::Rational(_) => "rational",
            TagValue::RationalArray(_) => "rational[]",
            TagValue::ByteArray(_) => "bytes",
        }
    }
}

// =============================================================================
// Directory
// =============================================================================

/// One logical table of decoded tags, plus the errors met while decoding it.
///
/// Directories are never discarded because of errors: whatever was decoded
/// before (or after) a failure stays available.
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    kind: DirectoryKind,
    tags: BTreeMap<u16, TagValue>,
    errors: Vec<String>,
}

impl Directory {
    /// Create an empty directory of the given kind.
    pub fn new(kind: DirectoryKind) -> Self {
        Directory {
            kind,
            tags: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    /// Store a value under `tag`, replacing any previous value.
    pub fn set(&mut self, tag: u16, value: TagValue) {
        self.tags.insert(tag, value);
    }

    pub fn set_int(&mut self, tag: u16, value: i64) {
        self.set(tag, TagValue::Int(value));
    }

    pub fn set_int_array(&mut self, tag: u16, values: Vec<i64>) {
        self.set(tag, TagValue::IntArray(values));
    }

    pub fn set_string(&mut self, tag: u16, value: impl Into<String>) {
        self.set(tag, TagValue::String(value.into()));
    }

    pub fn set_rational(&mut self, tag: u16, value: Rational) {
        self.set(tag, TagValue::Rational(value));
    }

    pub fn set_rational_array(&mut self, tag: u16, values: Vec<Rational>) {
        self.set(tag, TagValue::RationalArray(values));
    }

    pub fn set_byte_array(&mut self, tag: u16, value: impl Into<Bytes>) {
        self.set(tag, TagValue::ByteArray(value.into()));
    }

    #[inline]
    pub fn contains_tag(&self, tag: u16) -> bool {
        self.tags.contains_key(&tag)
    }

    #[inline]
    pub fn get(&self, tag: u16) -> Option<&TagValue> {
        self.tags.get(&tag)
    }

    /// Read a tag as an integer.
    ///
    /// Integers are returned directly, integer arrays yield their first
    /// element and strings are parsed after trimming. Anything else is `None`.
    pub fn get_int(&self, tag: u16) -> Option<i64> {
        match self.tags.get(&tag)? {
            TagValue::Int(value) => Some(*value),
            TagValue::IntArray(values) => values.first().copied(),
            TagValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Read a tag as a string. Only string values qualify.
    pub fn get_string(&self, tag: u16) -> Option<&str> {
        match self.tags.get(&tag)? {
            TagValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Iterate over all tags in ascending tag-id order.
    pub fn tags(&self) -> impl Iterator<Item = (u16, &TagValue)> {
        self.tags.iter().map(|(tag, value)| (*tag, value))
    }

    #[inline]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Append an error message. Never fails.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(directory = self.kind.name(), error = %message, "Recorded directory error");
        self.errors.push(message);
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
