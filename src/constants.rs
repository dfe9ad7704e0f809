// Frame geometry. Every frame is:
//   type:u8  channel:u16  length:u32  payload:length  end:u8(=0xCE)
pub const FRAME_TYPE_OFFSET: usize = 0;
pub const FRAME_CHANNEL_OFFSET: usize = 1;
pub const FRAME_LENGTH_OFFSET: usize = 3;
pub const FRAME_HEADER_SIZE: usize = 7;
pub const FRAME_END_SIZE: usize = 1;

/// Fixed per-frame overhead: 7-byte header plus the end marker octet.
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_SIZE + FRAME_END_SIZE;

/// Octet terminating every frame on the wire.
pub const FRAME_END_MARKER: u8 = 0xCE;

// Frame type octets.
pub const FRAME_TYPE_METHOD: u8 = 1;
pub const FRAME_TYPE_HEADER: u8 = 2;
pub const FRAME_TYPE_BODY: u8 = 3;
pub const FRAME_TYPE_HEARTBEAT: u8 = 8;

/// Largest frame payload accepted before tuning; 128k, same value
/// RabbitMQ uses (which copied qpid).
pub const MAX_FRAME_BUFFER: usize = 131072;

/// Largest payload an encoder should produce for an untuned connection.
pub const MAX_FRAME_SIZE: usize = MAX_FRAME_BUFFER - FRAME_OVERHEAD;

/// Channel 0 carries connection-level control methods only.
pub const CONTROL_CHANNEL: u16 = 0;

/// Bytes the client sends once, before any frame: "AMQP" 0x00 0x00 0x09 0x01.
pub const PROTOCOL_HEADER: [u8; 8] = [b'A', b'M', b'Q', b'P', 0, 0, 9, 1];

/// Protocol version this crate speaks, as advertised in `connectionStart`.
pub const VERSION_MAJOR: u8 = 0;
pub const VERSION_MINOR: u8 = 9;

// Table value tag octets (the self-describing value format inside tables
// and arrays).
pub const TAG_LONG_STRING: u8 = b'S';
pub const TAG_INTEGER: u8 = b'I';
pub const TAG_SIGNED_64BIT: u8 = b'l';
pub const TAG_32BIT_FLOAT: u8 = b'f';
pub const TAG_64BIT_FLOAT: u8 = b'd';
pub const TAG_DECIMAL: u8 = b'D';
pub const TAG_TIME: u8 = b'T';
pub const TAG_HASH: u8 = b'F';
pub const TAG_BOOLEAN: u8 = b't';
pub const TAG_BYTE_ARRAY: u8 = b'x';
pub const TAG_ARRAY: u8 = b'A';

// Connection option defaults.
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5672;
pub const DEFAULT_TLS_PORT: u16 = 5671;
pub const DEFAULT_LOGIN: &str = "guest";
pub const DEFAULT_PASSWORD: &str = "guest";
pub const DEFAULT_VHOST: &str = "/";
pub const DEFAULT_LOCALE: &str = "en_US";

/// SASL mechanism offered in `connectionStartOk`.
pub const SASL_MECHANISM: &str = "AMQPLAIN";

/// At most 15 content properties fit a single AMQP 0-9-1 property flag
/// word; bit 0 would signal a continuation word, which is unsupported.
pub const MAX_CONTENT_PROPERTIES: usize = 15;
