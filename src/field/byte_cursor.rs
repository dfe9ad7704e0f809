use crate::field::FieldDecodeError;

/// A bounds-checked read cursor over a borrowed buffer.
///
/// All multi-byte reads are network byte order (big-endian). The cursor is
/// transient: it lives for one decode call and is never shared between
/// connections or retained across calls.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read position in bytes from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FieldDecodeError> {
        if self.remaining() < n {
            return Err(FieldDecodeError::UnexpectedEnd {
                needed: n - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Returns the octet at the cursor without consuming it.
    pub fn peek_u8(&self) -> Result<u8, FieldDecodeError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(FieldDecodeError::UnexpectedEnd { needed: 1 })
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FieldDecodeError> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, FieldDecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, FieldDecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, FieldDecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, FieldDecodeError> {
        let bytes = self.take(8)?;
        Ok(u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    pub fn read_f32(&mut self) -> Result<f32, FieldDecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, FieldDecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Consumes exactly `n` bytes and returns them as a slice of the
    /// underlying buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FieldDecodeError> {
        self.take(n)
    }
}
