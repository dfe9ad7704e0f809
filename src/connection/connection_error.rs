use crate::frame::{FrameDecodeError, FrameEncodeError};
use crate::protocol::ProtocolError;
use thiserror::Error;

/// The single error channel of a connection.
///
/// Everything here is fatal (the connection transitions to `Closed` when
/// one is surfaced) except [`ConnectionError::UnhandledMethod`], which is
/// warning-class: it is reported but the connection stays open.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectionError {
    #[error("protocol version mismatch: peer advertised {major}.{minor}, expected 0.9")]
    VersionMismatch { major: u8, minor: u8 },

    /// Peer-initiated `connectionClose`, carrying its reply code and text.
    #[error("connection closed by peer: {reply_code} {reply_text}")]
    PeerClosed { reply_code: u16, reply_text: String },

    #[error("unhandled method '{method}' for current handshake state")]
    UnhandledMethod { method: String },

    #[error("connect() called on a connection that already started")]
    AlreadyConnected,

    #[error("connection is closed")]
    Closed,

    #[error(transparent)]
    Frame(#[from] FrameDecodeError),

    #[error(transparent)]
    FrameEncode(#[from] FrameEncodeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ConnectionError {
    /// Whether this error closes the connection when surfaced.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConnectionError::UnhandledMethod { .. })
    }
}
