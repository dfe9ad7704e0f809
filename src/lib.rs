pub mod connection;
pub mod constants;
pub mod field;
pub mod frame;
pub mod protocol;

pub use connection::{
    Connection, ConnectionError, ConnectionEvent, ConnectionEventIterator, ConnectionOptions,
    HandshakePhase, WireEmit,
};
pub use field::{
    ByteCursor, FieldCodec, FieldDecodeError, FieldDescriptor, FieldDomain, FieldEncodeError,
    FieldTable, FieldValue, MethodArguments,
};
pub use frame::{
    Frame, FrameCodec, FrameDecodeError, FrameDecoderIterator, FrameEncodeError, FrameKind,
    FrameStreamDecoder,
};
pub use protocol::{
    ClassDefinition, ContentClassSchema, ContentHeader, MethodCodec, MethodDefinition,
    MethodRegistry, MethodSchema, ProtocolDefinition, ProtocolError, amqp_0_9_1,
};
