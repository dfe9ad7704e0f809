mod byte_cursor;
mod field_codec;
mod field_descriptor;
mod field_domain;
mod field_error;
mod field_value;

pub use byte_cursor::ByteCursor;
pub use field_codec::FieldCodec;
pub use field_descriptor::FieldDescriptor;
pub use field_domain::FieldDomain;
pub use field_error::{FieldDecodeError, FieldEncodeError};
pub use field_value::{FieldTable, FieldValue, MethodArguments};
