use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

/// A table: short-string keys (unique) mapped to tagged values. Key order
/// is irrelevant on the wire.
pub type FieldTable = BTreeMap<String, FieldValue>;

/// A decoded method argument list or content property list, keyed by the
/// schema field name.
pub type MethodArguments = BTreeMap<String, FieldValue>;

/// A value in AMQP's self-describing table/array format.
///
/// Each variant corresponds to exactly one wire tag, so encoding is an
/// exhaustive match with no runtime type sniffing. `Decimal` is kept as
/// its raw scale and mantissa rather than a lossy float.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Length-prefixed (1 byte) UTF-8 string. Encodes with tag `S` inside
    /// tables; the short form only exists at the method-field level.
    ShortString(String),
    /// Tag `S`: 4-byte length prefix, arbitrary bytes (UTF-8 by convention).
    LongString(Vec<u8>),
    /// Tag `I`: unsigned 32-bit integer.
    Int(u32),
    /// Tag `l`: 64-bit integer.
    Long(i64),
    /// Tag `f`: IEEE-754 single.
    Float(f32),
    /// Tag `d`: IEEE-754 double.
    Double(f64),
    /// Tag `D`: 1-byte scale, 4-byte unsigned mantissa.
    Decimal { scale: u8, mantissa: u32 },
    /// Tag `T`: seconds since the UNIX epoch.
    Timestamp(u64),
    /// Tag `F`: nested table.
    Table(FieldTable),
    /// Tag `A`: 4-byte byte-length, then packed values.
    Array(Vec<FieldValue>),
    /// Tag `t`: one octet, nonzero = true.
    Bool(bool),
    /// Tag `x`: 4-byte length, raw bytes.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Builds a `Timestamp` from a calendar datetime, truncating to
    /// whole seconds. Datetimes before the epoch clamp to 0.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(datetime.timestamp().max(0) as u64)
    }

    /// Interprets a `Timestamp` value as a calendar datetime.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(secs) => Utc.timestamp_opt(*secs as i64, 0).single(),
            _ => None,
        }
    }

    /// Narrows any of the integral variants to `u64` if non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Int(v) => Some(u64::from(*v)),
            FieldValue::Long(v) if *v >= 0 => Some(*v as u64),
            FieldValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::ShortString(s) => Some(s),
            FieldValue::LongString(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&FieldTable> {
        match self {
            FieldValue::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Short human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::ShortString(_) => "shortstr",
            FieldValue::LongString(_) => "longstr",
            FieldValue::Int(_) => "int",
            FieldValue::Long(_) => "long",
            FieldValue::Float(_) => "float",
            FieldValue::Double(_) => "double",
            FieldValue::Decimal { .. } => "decimal",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Table(_) => "table",
            FieldValue::Array(_) => "array",
            FieldValue::Bool(_) => "bool",
            FieldValue::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::LongString(s.as_bytes().to_vec())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::LongString(s.into_bytes())
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Long(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<FieldTable> for FieldValue {
    fn from(table: FieldTable) -> Self {
        FieldValue::Table(table)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(values: Vec<FieldValue>) -> Self {
        FieldValue::Array(values)
    }
}
