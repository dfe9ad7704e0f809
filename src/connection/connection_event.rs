use crate::connection::ConnectionError;
use crate::protocol::{ContentHeader, MethodSchema};
use crate::field::MethodArguments;
use std::collections::VecDeque;
use std::sync::Arc;

/// What a connection surfaced while digesting inbound bytes.
///
/// Events come out of [`crate::connection::Connection::read_bytes`] in
/// strict arrival order; within a channel, a content header always
/// precedes its body frames. Reassembling multi-frame bodies is the
/// channel-level consumer's job.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The handshake completed; the connection is usable.
    Ready,

    /// A content-free liveness frame arrived. No timer is enforced here.
    Heartbeat,

    /// A decoded method frame for a channel-level consumer.
    Method {
        channel: u16,
        method: Arc<MethodSchema>,
        arguments: MethodArguments,
    },

    ContentHeader {
        channel: u16,
        header: ContentHeader,
    },

    ContentBody {
        channel: u16,
        payload: Vec<u8>,
    },

    /// The single error channel. Fatal errors close the connection;
    /// see [`ConnectionError::is_fatal`].
    Error(ConnectionError),
}

pub struct ConnectionEventIterator {
    pub(crate) queue: VecDeque<ConnectionEvent>,
}

impl Iterator for ConnectionEventIterator {
    type Item = ConnectionEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}
