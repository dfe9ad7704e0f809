pub mod amqp_0_9_1;
mod method_codec;
mod method_registry;
mod protocol_definition;
mod protocol_error;

pub use method_codec::{ContentHeader, MethodCodec};
pub use method_registry::{ContentClassSchema, MethodRegistry, MethodSchema};
pub use protocol_definition::{ClassDefinition, MethodDefinition, ProtocolDefinition};
pub use protocol_error::ProtocolError;
