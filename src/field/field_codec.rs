use crate::constants::{
    TAG_32BIT_FLOAT, TAG_64BIT_FLOAT, TAG_ARRAY, TAG_BOOLEAN, TAG_BYTE_ARRAY, TAG_DECIMAL,
    TAG_HASH, TAG_INTEGER, TAG_LONG_STRING, TAG_SIGNED_64BIT, TAG_TIME,
};
use crate::field::{
    ByteCursor, FieldDecodeError, FieldDescriptor, FieldDomain, FieldEncodeError, FieldTable,
    FieldValue, MethodArguments,
};

/// Codec between schema-ordered argument lists and their canonical AMQP
/// byte encoding, plus the tagged value format used inside tables.
///
/// The public encode entry points stage output into a scratch buffer and
/// append to the caller's buffer only on success, so a failed encode never
/// leaves partial bytes behind.
pub struct FieldCodec;

impl FieldCodec {
    /// Decodes one value per descriptor, in order. Consecutive `bit`
    /// fields share octets; any other domain starts on a fresh octet.
    pub fn decode_fields(
        cursor: &mut ByteCursor<'_>,
        fields: &[FieldDescriptor],
    ) -> Result<MethodArguments, FieldDecodeError> {
        let mut args = MethodArguments::new();
        let mut bit_index = 0u8;

        for (i, field) in fields.iter().enumerate() {
            let value = match field.domain {
                FieldDomain::Bit => {
                    let octet = cursor.peek_u8()?;
                    let value = octet & (1 << bit_index) != 0;

                    let next_is_bit =
                        matches!(fields.get(i + 1), Some(f) if f.domain == FieldDomain::Bit);

                    // A run longer than 8 bits spills into a fresh octet.
                    if next_is_bit && bit_index < 7 {
                        bit_index += 1;
                    } else {
                        bit_index = 0;
                        cursor.skip(1)?;
                    }

                    FieldValue::Bool(value)
                }
                FieldDomain::Octet => FieldValue::Int(u32::from(cursor.read_u8()?)),
                FieldDomain::Short => FieldValue::Int(u32::from(cursor.read_u16()?)),
                FieldDomain::Long => FieldValue::Int(cursor.read_u32()?),
                FieldDomain::LongLong => FieldValue::Long(cursor.read_u64()? as i64),
                FieldDomain::Timestamp => FieldValue::Timestamp(cursor.read_u64()?),
                FieldDomain::ShortStr => {
                    FieldValue::ShortString(Self::decode_short_string(cursor)?)
                }
                FieldDomain::LongStr => {
                    let length = cursor.read_u32()? as usize;
                    FieldValue::LongString(cursor.read_bytes(length)?.to_vec())
                }
                FieldDomain::Table => FieldValue::Table(Self::decode_table(cursor)?),
            };

            args.insert(field.name.clone(), value);
        }

        Ok(args)
    }

    /// Encodes `args` against the descriptor list and appends the bytes to
    /// `buf`. In strict mode a missing field is an error; otherwise missing
    /// non-bit fields are skipped and missing bits encode as `false` (so a
    /// bit run keeps its octet alignment).
    pub fn encode_fields(
        buf: &mut Vec<u8>,
        fields: &[FieldDescriptor],
        args: &MethodArguments,
        strict: bool,
    ) -> Result<(), FieldEncodeError> {
        let mut out = Vec::new();
        Self::write_fields(&mut out, fields, args, strict)?;
        buf.extend_from_slice(&out);
        Ok(())
    }

    /// Decodes a single tagged value (the format used inside tables and
    /// arrays).
    pub fn decode_value(cursor: &mut ByteCursor<'_>) -> Result<FieldValue, FieldDecodeError> {
        let tag = cursor.read_u8()?;
        match tag {
            TAG_LONG_STRING => {
                let length = cursor.read_u32()? as usize;
                Ok(FieldValue::LongString(cursor.read_bytes(length)?.to_vec()))
            }
            TAG_INTEGER => Ok(FieldValue::Int(cursor.read_u32()?)),
            TAG_SIGNED_64BIT => Ok(FieldValue::Long(cursor.read_u64()? as i64)),
            TAG_32BIT_FLOAT => Ok(FieldValue::Float(cursor.read_f32()?)),
            TAG_64BIT_FLOAT => Ok(FieldValue::Double(cursor.read_f64()?)),
            TAG_DECIMAL => {
                let scale = cursor.read_u8()?;
                let mantissa = cursor.read_u32()?;
                Ok(FieldValue::Decimal { scale, mantissa })
            }
            TAG_TIME => Ok(FieldValue::Timestamp(cursor.read_u64()?)),
            TAG_HASH => Ok(FieldValue::Table(Self::decode_table(cursor)?)),
            TAG_BOOLEAN => Ok(FieldValue::Bool(cursor.read_u8()? != 0)),
            TAG_BYTE_ARRAY => {
                let length = cursor.read_u32()? as usize;
                Ok(FieldValue::Bytes(cursor.read_bytes(length)?.to_vec()))
            }
            TAG_ARRAY => Ok(FieldValue::Array(Self::decode_array(cursor)?)),
            other => Err(FieldDecodeError::UnknownValueTag(other)),
        }
    }

    /// Encodes a single tagged value, appending to `buf` only on success.
    pub fn encode_value(buf: &mut Vec<u8>, value: &FieldValue) -> Result<(), FieldEncodeError> {
        let mut out = Vec::new();
        Self::write_value(&mut out, value)?;
        buf.extend_from_slice(&out);
        Ok(())
    }

    /// Decodes a table: 4-byte byte-length, then `(shortstr key, value)`
    /// pairs until exactly that many bytes are consumed.
    pub fn decode_table(cursor: &mut ByteCursor<'_>) -> Result<FieldTable, FieldDecodeError> {
        let declared = cursor.read_u32()? as usize;
        if cursor.remaining() < declared {
            return Err(FieldDecodeError::UnexpectedEnd {
                needed: declared - cursor.remaining(),
            });
        }

        let start = cursor.position();
        let end = start + declared;
        let mut table = FieldTable::new();

        while cursor.position() < end {
            let key = Self::decode_short_string(cursor)?;
            let value = Self::decode_value(cursor)?;
            table.insert(key, value);
        }

        if cursor.position() != end {
            return Err(FieldDecodeError::LengthMismatch {
                declared,
                consumed: cursor.position() - start,
            });
        }

        Ok(table)
    }

    /// Encodes a table, appending to `buf` only on success.
    pub fn encode_table(buf: &mut Vec<u8>, table: &FieldTable) -> Result<(), FieldEncodeError> {
        let mut out = Vec::new();
        Self::write_table(&mut out, table)?;
        buf.extend_from_slice(&out);
        Ok(())
    }

    fn decode_array(cursor: &mut ByteCursor<'_>) -> Result<Vec<FieldValue>, FieldDecodeError> {
        let declared = cursor.read_u32()? as usize;
        if cursor.remaining() < declared {
            return Err(FieldDecodeError::UnexpectedEnd {
                needed: declared - cursor.remaining(),
            });
        }

        let start = cursor.position();
        let end = start + declared;
        let mut values = Vec::new();

        while cursor.position() < end {
            values.push(Self::decode_value(cursor)?);
        }

        if cursor.position() != end {
            return Err(FieldDecodeError::LengthMismatch {
                declared,
                consumed: cursor.position() - start,
            });
        }

        Ok(values)
    }

    fn decode_short_string(cursor: &mut ByteCursor<'_>) -> Result<String, FieldDecodeError> {
        let length = cursor.read_u8()? as usize;
        let bytes = cursor.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FieldDecodeError::InvalidUtf8)
    }

    fn write_fields(
        out: &mut Vec<u8>,
        fields: &[FieldDescriptor],
        args: &MethodArguments,
        strict: bool,
    ) -> Result<(), FieldEncodeError> {
        let mut bit_field = 0u8;
        let mut bit_index = 0u8;

        for (i, field) in fields.iter().enumerate() {
            let param = match args.get(&field.name) {
                Some(param) => Some(param),
                None if strict => return Err(FieldEncodeError::MissingField(field.name.clone())),
                None => None,
            };

            if field.domain == FieldDomain::Bit {
                // Missing bits encode as false to preserve the run's
                // octet alignment.
                let set = match param {
                    Some(FieldValue::Bool(v)) => *v,
                    Some(other) => {
                        return Err(Self::domain_mismatch(field, other));
                    }
                    None => false,
                };

                if set {
                    bit_field |= 1 << bit_index;
                }
                bit_index += 1;

                let next_is_bit =
                    matches!(fields.get(i + 1), Some(f) if f.domain == FieldDomain::Bit);
                if !next_is_bit || bit_index == 8 {
                    out.push(bit_field);
                    bit_field = 0;
                    bit_index = 0;
                }
                continue;
            }

            let Some(param) = param else {
                continue;
            };

            match field.domain {
                FieldDomain::Bit => unreachable!("bit handled above"),
                FieldDomain::Octet => {
                    let v = Self::uint_param(field, param, 0xFF)?;
                    out.push(v as u8);
                }
                FieldDomain::Short => {
                    let v = Self::uint_param(field, param, 0xFFFF)?;
                    out.extend_from_slice(&(v as u16).to_be_bytes());
                }
                FieldDomain::Long => {
                    let v = Self::uint_param(field, param, 0xFFFF_FFFF)?;
                    out.extend_from_slice(&(v as u32).to_be_bytes());
                }
                FieldDomain::LongLong => match param {
                    FieldValue::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
                    FieldValue::Int(v) => out.extend_from_slice(&u64::from(*v).to_be_bytes()),
                    FieldValue::Timestamp(v) => out.extend_from_slice(&v.to_be_bytes()),
                    other => return Err(Self::domain_mismatch(field, other)),
                },
                FieldDomain::Timestamp => match param {
                    FieldValue::Timestamp(v) => out.extend_from_slice(&v.to_be_bytes()),
                    FieldValue::Int(v) => out.extend_from_slice(&u64::from(*v).to_be_bytes()),
                    FieldValue::Long(v) if *v >= 0 => out.extend_from_slice(&v.to_be_bytes()),
                    other => return Err(Self::domain_mismatch(field, other)),
                },
                FieldDomain::ShortStr => match param {
                    FieldValue::ShortString(s) => {
                        Self::write_short_string_checked(out, s, &field.name)?;
                    }
                    other => return Err(Self::domain_mismatch(field, other)),
                },
                FieldDomain::LongStr => match param {
                    FieldValue::LongString(bytes) => Self::write_long_string(out, bytes),
                    FieldValue::ShortString(s) => Self::write_long_string(out, s.as_bytes()),
                    FieldValue::Bytes(bytes) => Self::write_long_string(out, bytes),
                    // A table in a longstr slot encodes as a field table;
                    // its entry-length prefix doubles as the longstr
                    // length. This is how the AMQPLAIN response works.
                    FieldValue::Table(table) => Self::write_table(out, table)?,
                    other => return Err(Self::domain_mismatch(field, other)),
                },
                FieldDomain::Table => match param {
                    FieldValue::Table(table) => Self::write_table(out, table)?,
                    other => return Err(Self::domain_mismatch(field, other)),
                },
            }
        }

        Ok(())
    }

    fn write_value(out: &mut Vec<u8>, value: &FieldValue) -> Result<(), FieldEncodeError> {
        match value {
            FieldValue::ShortString(s) => {
                out.push(TAG_LONG_STRING);
                Self::write_long_string(out, s.as_bytes());
            }
            FieldValue::LongString(bytes) => {
                out.push(TAG_LONG_STRING);
                Self::write_long_string(out, bytes);
            }
            FieldValue::Int(v) => {
                out.push(TAG_INTEGER);
                out.extend_from_slice(&v.to_be_bytes());
            }
            FieldValue::Long(v) => {
                out.push(TAG_SIGNED_64BIT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            FieldValue::Float(v) => {
                out.push(TAG_32BIT_FLOAT);
                out.extend_from_slice(&v.to_bits().to_be_bytes());
            }
            FieldValue::Double(v) => {
                out.push(TAG_64BIT_FLOAT);
                out.extend_from_slice(&v.to_bits().to_be_bytes());
            }
            FieldValue::Decimal { scale, mantissa } => {
                out.push(TAG_DECIMAL);
                out.push(*scale);
                out.extend_from_slice(&mantissa.to_be_bytes());
            }
            FieldValue::Timestamp(v) => {
                out.push(TAG_TIME);
                out.extend_from_slice(&v.to_be_bytes());
            }
            FieldValue::Table(table) => {
                out.push(TAG_HASH);
                Self::write_table(out, table)?;
            }
            FieldValue::Array(values) => {
                out.push(TAG_ARRAY);
                Self::write_packed(out, |out| {
                    for value in values {
                        Self::write_value(out, value)?;
                    }
                    Ok(())
                })?;
            }
            FieldValue::Bool(v) => {
                out.push(TAG_BOOLEAN);
                out.push(u8::from(*v));
            }
            FieldValue::Bytes(bytes) => {
                out.push(TAG_BYTE_ARRAY);
                Self::write_long_string(out, bytes);
            }
        }

        Ok(())
    }

    fn write_table(out: &mut Vec<u8>, table: &FieldTable) -> Result<(), FieldEncodeError> {
        Self::write_packed(out, |out| {
            for (key, value) in table {
                if key.len() > 0xFF {
                    return Err(FieldEncodeError::TableKeyTooLong { key: key.clone() });
                }
                out.push(key.len() as u8);
                out.extend_from_slice(key.as_bytes());
                Self::write_value(out, value)?;
            }
            Ok(())
        })
    }

    /// Reserves a 4-byte length slot, writes the entries, then backpatches
    /// the slot with the actual entry byte count. The length cannot be
    /// known up front because nested values have variable encodings.
    fn write_packed(
        out: &mut Vec<u8>,
        write_entries: impl FnOnce(&mut Vec<u8>) -> Result<(), FieldEncodeError>,
    ) -> Result<(), FieldEncodeError> {
        let length_index = out.len();
        out.extend_from_slice(&[0u8; 4]);
        let start_index = out.len();

        write_entries(out)?;

        let entry_length = (out.len() - start_index) as u32;
        out[length_index..length_index + 4].copy_from_slice(&entry_length.to_be_bytes());
        Ok(())
    }

    fn write_long_string(out: &mut Vec<u8>, bytes: &[u8]) {
        out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        out.extend_from_slice(bytes);
    }

    fn write_short_string_checked(
        out: &mut Vec<u8>,
        s: &str,
        field_name: &str,
    ) -> Result<(), FieldEncodeError> {
        let length = s.len();
        if length > 0xFF {
            return Err(FieldEncodeError::ShortStringTooLong {
                field: field_name.to_string(),
                length,
            });
        }
        out.push(length as u8);
        out.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn uint_param(
        field: &FieldDescriptor,
        param: &FieldValue,
        max: u64,
    ) -> Result<u64, FieldEncodeError> {
        let value = match param {
            FieldValue::Int(v) => u64::from(*v),
            FieldValue::Long(v) if *v >= 0 => *v as u64,
            other => return Err(Self::domain_mismatch(field, other)),
        };

        if value > max {
            return Err(FieldEncodeError::OutOfRange {
                field: field.name.clone(),
                domain: field.domain.as_str(),
                value,
            });
        }

        Ok(value)
    }

    fn domain_mismatch(field: &FieldDescriptor, value: &FieldValue) -> FieldEncodeError {
        FieldEncodeError::DomainMismatch {
            field: field.name.clone(),
            domain: field.domain.as_str(),
            value_kind: value.kind(),
        }
    }
}
