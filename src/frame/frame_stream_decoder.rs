use crate::constants::{
    FRAME_CHANNEL_OFFSET, FRAME_END_MARKER, FRAME_HEADER_SIZE, FRAME_LENGTH_OFFSET,
    FRAME_TYPE_OFFSET, MAX_FRAME_BUFFER,
};
use crate::frame::{Frame, FrameDecodeError, FrameKind};
use std::collections::VecDeque;

/// A resumable frame decoder over an arbitrarily-chunked byte stream.
///
/// `read_bytes` may be called with chunks of any size — smaller than one
/// frame header, spanning several frames, or empty. The decoded frame
/// sequence is identical regardless of where the chunk boundaries fall.
///
/// Framing errors are fatal: the offending error is yielded once and the
/// decoder halts permanently, discarding any further input, because a
/// misaligned stream cannot be re-synchronized.
pub struct FrameStreamDecoder {
    buffer: Vec<u8>,
    state: DecoderState,
    max_frame_size: usize,
    halted: bool,
}

enum DecoderState {
    AwaitFrameHeader,
    AwaitFramePayload {
        kind: FrameKind,
        channel: u16,
        size: usize,
    },
    AwaitFrameEnd {
        frame: Frame,
    },
}

pub struct FrameDecoderIterator {
    queue: VecDeque<Result<Frame, FrameDecodeError>>,
}

impl Iterator for FrameDecoderIterator {
    type Item = Result<Frame, FrameDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl FrameStreamDecoder {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            buffer: Vec::new(),
            state: DecoderState::AwaitFrameHeader,
            max_frame_size,
            halted: false,
        }
    }

    /// True once a fatal framing error has been yielded.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Accepts new bytes and yields every frame (or the one fatal error)
    /// that can be completed with what has arrived so far.
    pub fn read_bytes(&mut self, data: &[u8]) -> FrameDecoderIterator {
        let mut queue = VecDeque::new();

        if self.halted {
            return FrameDecoderIterator { queue };
        }

        tracing::trace!(len = data.len(), "frame decoder intake");
        self.buffer.extend_from_slice(data);

        while self.step(&mut queue) {}

        FrameDecoderIterator { queue }
    }

    /// Advances the state machine by at most one transition. Returns false
    /// when more bytes are needed or the decoder has halted.
    fn step(&mut self, queue: &mut VecDeque<Result<Frame, FrameDecodeError>>) -> bool {
        match &self.state {
            DecoderState::AwaitFrameHeader => {
                if self.buffer.len() < FRAME_HEADER_SIZE {
                    return false;
                }

                let type_octet = self.buffer[FRAME_TYPE_OFFSET];
                let kind = match FrameKind::try_from(type_octet) {
                    Ok(kind) => kind,
                    Err(()) => {
                        self.halt(FrameDecodeError::UnknownFrameType(type_octet), queue);
                        return false;
                    }
                };
                let channel = u16::from_be_bytes([
                    self.buffer[FRAME_CHANNEL_OFFSET],
                    self.buffer[FRAME_CHANNEL_OFFSET + 1],
                ]);
                let size = u32::from_be_bytes([
                    self.buffer[FRAME_LENGTH_OFFSET],
                    self.buffer[FRAME_LENGTH_OFFSET + 1],
                    self.buffer[FRAME_LENGTH_OFFSET + 2],
                    self.buffer[FRAME_LENGTH_OFFSET + 3],
                ]) as usize;

                // Reject before waiting for, or buffering, any payload.
                if size > self.max_frame_size {
                    self.halt(
                        FrameDecodeError::OversizedFrame {
                            size,
                            max: self.max_frame_size,
                        },
                        queue,
                    );
                    return false;
                }

                self.buffer.drain(..FRAME_HEADER_SIZE);
                self.state = DecoderState::AwaitFramePayload {
                    kind,
                    channel,
                    size,
                };
                true
            }
            DecoderState::AwaitFramePayload {
                kind,
                channel,
                size,
            } => {
                let (kind, channel, size) = (*kind, *channel, *size);
                if self.buffer.len() < size {
                    return false;
                }

                let payload: Vec<u8> = self.buffer.drain(..size).collect();
                self.state = DecoderState::AwaitFrameEnd {
                    frame: Frame {
                        kind,
                        channel,
                        payload,
                    },
                };
                true
            }
            DecoderState::AwaitFrameEnd { .. } => {
                let Some(&end) = self.buffer.first() else {
                    return false;
                };

                if end != FRAME_END_MARKER {
                    self.halt(FrameDecodeError::MissingFrameEnd(end), queue);
                    return false;
                }

                self.buffer.drain(..1);
                let previous = std::mem::replace(&mut self.state, DecoderState::AwaitFrameHeader);
                let DecoderState::AwaitFrameEnd { frame } = previous else {
                    unreachable!("state matched above");
                };

                queue.push_back(Ok(frame));
                true
            }
        }
    }

    fn halt(
        &mut self,
        error: FrameDecodeError,
        queue: &mut VecDeque<Result<Frame, FrameDecodeError>>,
    ) {
        tracing::debug!(%error, "frame decoder halted");
        self.halted = true;
        self.buffer.clear();
        queue.push_back(Err(error));
    }
}

impl Default for FrameStreamDecoder {
    fn default() -> Self {
        Self::new(MAX_FRAME_BUFFER)
    }
}
