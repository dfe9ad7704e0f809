use crate::field::{FieldDecodeError, FieldEncodeError};
use thiserror::Error;

/// Registry construction and method/content payload codec errors.
///
/// Construction variants are fatal startup errors; the codec variants are
/// connection-fatal structural decode errors (or local encode failures).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("protocol description contains a class with an empty name (id {0})")]
    MissingClassName(u16),

    #[error("protocol description contains a method with an empty name (class '{class}', id {method_id})")]
    MissingMethodName { class: String, method_id: u16 },

    #[error("duplicate class id {0} in protocol description")]
    DuplicateClass(u16),

    #[error("duplicate method '{0}' in protocol description")]
    DuplicateMethod(String),

    #[error("class '{class}' declares {count} content properties, at most 15 are supported")]
    TooManyProperties { class: String, count: usize },

    #[error("received unknown class/method pair [{class_id}, {method_id}]")]
    UnknownMethod { class_id: u16, method_id: u16 },

    #[error("no method named '{0}' in the protocol description")]
    UnknownMethodName(String),

    #[error("received content header for unknown class {0}")]
    UnknownContentClass(u16),

    /// The peer set the continuation bit of the property flag word,
    /// announcing a second flag word (more than 15 properties).
    #[error("content header property flag continuation is unsupported")]
    PropertyFlagContinuation,

    #[error(transparent)]
    Decode(#[from] FieldDecodeError),

    #[error(transparent)]
    Encode(#[from] FieldEncodeError),
}
