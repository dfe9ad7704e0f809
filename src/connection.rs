mod connection_error;
mod connection_event;
mod connection_options;
mod connection_struct;
mod wire_emit;

pub use connection_error::ConnectionError;
pub use connection_event::{ConnectionEvent, ConnectionEventIterator};
pub use connection_options::ConnectionOptions;
pub use connection_struct::{Connection, HandshakePhase};
pub use wire_emit::WireEmit;
