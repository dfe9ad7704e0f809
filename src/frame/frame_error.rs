use thiserror::Error;

/// Fatal framing errors. Once any of these fires the byte stream can no
/// longer be trusted to be frame-aligned, so the decoder halts and the
/// connection must close.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameDecodeError {
    #[error("oversized frame: declared payload of {size} bytes exceeds limit of {max}")]
    OversizedFrame { size: usize, max: usize },

    #[error("missing frame end marker, got {0:#04x}")]
    MissingFrameEnd(u8),

    #[error("unknown frame type {0}")]
    UnknownFrameType(u8),

    #[error("frame buffer too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameEncodeError {
    #[error("frame payload of {size} bytes exceeds negotiated limit of {max}")]
    PayloadTooLarge { size: usize, max: usize },
}
