use crate::frame::FrameKind;

/// The atomic unit of transport: typed, channel-scoped, length-delimited,
/// end-marked.
///
/// A frame is not necessarily a single network chunk — several frames or
/// fragments of one frame may arrive in a single read, which is why
/// decoding goes through [`crate::frame::FrameStreamDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,

    /// Logical multiplexing lane within the connection. Channel 0 is
    /// reserved for connection-level control methods.
    pub channel: u16,

    /// The frame body, excluding header and end marker. For method frames
    /// this is the class/method ids plus encoded arguments; for heartbeat
    /// frames it is empty.
    pub payload: Vec<u8>,
}
