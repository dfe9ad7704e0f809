use crate::constants::{
    FRAME_TYPE_BODY, FRAME_TYPE_HEADER, FRAME_TYPE_HEARTBEAT, FRAME_TYPE_METHOD,
};

/// The four frame types of AMQP 0-9-1. The wire octets are not contiguous
/// (heartbeat is 8), a leftover of dropped frame types in older protocol
/// drafts.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Method = FRAME_TYPE_METHOD,
    Header = FRAME_TYPE_HEADER,
    Body = FRAME_TYPE_BODY,
    Heartbeat = FRAME_TYPE_HEARTBEAT,
}

impl TryFrom<u8> for FrameKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            FRAME_TYPE_METHOD => Ok(FrameKind::Method),
            FRAME_TYPE_HEADER => Ok(FrameKind::Header),
            FRAME_TYPE_BODY => Ok(FrameKind::Body),
            FRAME_TYPE_HEARTBEAT => Ok(FrameKind::Heartbeat),
            _ => Err(()),
        }
    }
}
