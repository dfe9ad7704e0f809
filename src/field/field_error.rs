use thiserror::Error;

/// Errors from decoding field lists or table values. All of these mean the
/// byte stream is misaligned and, at the connection level, fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldDecodeError {
    #[error("unexpected end of input, needed {needed} more byte(s)")]
    UnexpectedEnd { needed: usize },

    #[error("unknown field value tag {0:#04x}")]
    UnknownValueTag(u8),

    /// The declared byte length of a table or array did not align with the
    /// entries actually consumed.
    #[error("declared length {declared} does not match consumed length {consumed}")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("short string is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors from encoding an argument list. These are local to the single
/// encode call; no partial output is ever handed to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldEncodeError {
    #[error("value {value} out of range for {domain} field '{field}'")]
    OutOfRange {
        field: String,
        domain: &'static str,
        value: u64,
    },

    #[error("short string exceeds 255 bytes ({length}) in field '{field}'")]
    ShortStringTooLong { field: String, length: usize },

    /// A value variant incompatible with the field's declared domain.
    #[error("field '{field}' of domain {domain} cannot encode a {value_kind} value")]
    DomainMismatch {
        field: String,
        domain: &'static str,
        value_kind: &'static str,
    },

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("table key '{key}' exceeds 255 bytes")]
    TableKeyTooLong { key: String },
}
