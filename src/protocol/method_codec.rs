use crate::field::{ByteCursor, FieldCodec, FieldDescriptor, MethodArguments};
use crate::protocol::{ContentClassSchema, MethodRegistry, MethodSchema, ProtocolError};
use std::sync::Arc;

/// A decoded content-header payload: which class the following body
/// belongs to, the total body size across all body frames, and whichever
/// optional properties the peer flagged as present.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentHeader {
    pub class: Arc<ContentClassSchema>,
    pub weight: u16,
    pub body_size: u64,
    pub properties: MethodArguments,
}

/// Codec for method and content-header frame payloads, bridging the
/// registry's schemas and the field codec.
pub struct MethodCodec;

impl MethodCodec {
    /// Decodes a method payload: class id, method id, then the arguments
    /// in schema order. An unknown id pair is a fatal decode error.
    pub fn decode_method(
        registry: &MethodRegistry,
        payload: &[u8],
    ) -> Result<(Arc<MethodSchema>, MethodArguments), ProtocolError> {
        let mut cursor = ByteCursor::new(payload);
        let class_id = cursor.read_u16()?;
        let method_id = cursor.read_u16()?;

        let schema = registry
            .method_by_id(class_id, method_id)
            .ok_or(ProtocolError::UnknownMethod {
                class_id,
                method_id,
            })?;

        let arguments = FieldCodec::decode_fields(&mut cursor, &schema.fields)?;
        tracing::trace!(method = %schema.name, "decoded method payload");

        Ok((Arc::clone(schema), arguments))
    }

    /// Encodes a method payload for the given schema. All schema fields
    /// are required.
    pub fn encode_method(
        schema: &MethodSchema,
        arguments: &MethodArguments,
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&schema.class_id.to_be_bytes());
        payload.extend_from_slice(&schema.method_id.to_be_bytes());
        FieldCodec::encode_fields(&mut payload, &schema.fields, arguments, true)?;
        Ok(payload)
    }

    /// Decodes a content-header payload: class index, weight, 64-bit body
    /// size, then the 16-bit property flag word and the flagged
    /// properties. Flag bit `i` (from the high end) selects property `i`;
    /// bit 0 would announce a continuation word and is unsupported.
    pub fn decode_content_header(
        registry: &MethodRegistry,
        payload: &[u8],
    ) -> Result<ContentHeader, ProtocolError> {
        let mut cursor = ByteCursor::new(payload);
        let class_id = cursor.read_u16()?;
        let weight = cursor.read_u16()?;
        let body_size = cursor.read_u64()?;

        let class = registry
            .content_class(class_id)
            .ok_or(ProtocolError::UnknownContentClass(class_id))?;

        let flags = cursor.read_u16()?;
        if flags & 0x0001 != 0 {
            return Err(ProtocolError::PropertyFlagContinuation);
        }

        let present: Vec<FieldDescriptor> = class
            .properties
            .iter()
            .enumerate()
            .filter(|(i, _)| flags & (1 << (15 - i)) != 0)
            .map(|(_, property)| property.clone())
            .collect();

        let properties = FieldCodec::decode_fields(&mut cursor, &present)?;

        Ok(ContentHeader {
            class: Arc::clone(class),
            weight,
            body_size,
            properties,
        })
    }

    /// Encodes a content-header payload, flagging exactly the properties
    /// present in `properties`.
    pub fn encode_content_header(
        class: &ContentClassSchema,
        weight: u16,
        body_size: u64,
        properties: &MethodArguments,
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut flags = 0u16;
        let mut present = Vec::new();

        for (i, property) in class.properties.iter().enumerate() {
            if properties.contains_key(&property.name) {
                flags |= 1 << (15 - i);
                present.push(property.clone());
            }
        }

        let mut payload = Vec::new();
        payload.extend_from_slice(&class.id.to_be_bytes());
        payload.extend_from_slice(&weight.to_be_bytes());
        payload.extend_from_slice(&body_size.to_be_bytes());
        payload.extend_from_slice(&flags.to_be_bytes());
        FieldCodec::encode_fields(&mut payload, &present, properties, true)?;

        Ok(payload)
    }
}
