use crate::constants::{
    FRAME_CHANNEL_OFFSET, FRAME_END_MARKER, FRAME_HEADER_SIZE, FRAME_LENGTH_OFFSET, FRAME_OVERHEAD,
    FRAME_TYPE_OFFSET,
};
use crate::frame::{Frame, FrameDecodeError, FrameKind};

/// Stateless codec for one complete frame.
///
/// Streaming input should go through [`crate::frame::FrameStreamDecoder`],
/// which tolerates arbitrary chunk boundaries; `decode` here expects the
/// whole frame to be in the buffer already.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes the 7-byte header, the payload, and the end marker. The
    /// payload must already be encoded (method arguments via
    /// [`crate::field::FieldCodec`], content headers via
    /// [`crate::protocol::MethodCodec`]).
    pub fn encode(kind: FrameKind, channel: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FRAME_OVERHEAD + payload.len());

        buf.push(kind as u8);
        buf.extend_from_slice(&channel.to_be_bytes());
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        buf.extend_from_slice(payload);
        buf.push(FRAME_END_MARKER);

        buf
    }

    /// Decodes a single complete frame from `buf`. Trailing bytes beyond
    /// the frame are ignored.
    pub fn decode(buf: &[u8]) -> Result<Frame, FrameDecodeError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameDecodeError::Truncated {
                expected: FRAME_HEADER_SIZE,
                actual: buf.len(),
            });
        }

        let kind = FrameKind::try_from(buf[FRAME_TYPE_OFFSET])
            .map_err(|_| FrameDecodeError::UnknownFrameType(buf[FRAME_TYPE_OFFSET]))?;
        let channel = u16::from_be_bytes([buf[FRAME_CHANNEL_OFFSET], buf[FRAME_CHANNEL_OFFSET + 1]]);
        let length = u32::from_be_bytes([
            buf[FRAME_LENGTH_OFFSET],
            buf[FRAME_LENGTH_OFFSET + 1],
            buf[FRAME_LENGTH_OFFSET + 2],
            buf[FRAME_LENGTH_OFFSET + 3],
        ]) as usize;

        let total = FRAME_OVERHEAD + length;
        if buf.len() < total {
            return Err(FrameDecodeError::Truncated {
                expected: total,
                actual: buf.len(),
            });
        }

        let end = buf[FRAME_HEADER_SIZE + length];
        if end != FRAME_END_MARKER {
            return Err(FrameDecodeError::MissingFrameEnd(end));
        }

        Ok(Frame {
            kind,
            channel,
            payload: buf[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + length].to_vec(),
        })
    }
}
