/// Callback receiving encoded outbound bytes, ready for the transport.
pub trait WireEmit: FnMut(&[u8]) {}
impl<T: FnMut(&[u8])> WireEmit for T {}
