use amqp_wire::field::{
    ByteCursor, FieldCodec, FieldDecodeError, FieldDescriptor, FieldDomain, FieldEncodeError,
    FieldTable, FieldValue, MethodArguments,
};
use chrono::{TimeZone, Utc};

fn desc(name: &str, domain: FieldDomain) -> FieldDescriptor {
    FieldDescriptor::new(name, domain)
}

fn arg(name: &str, value: FieldValue) -> (String, FieldValue) {
    (name.to_string(), value)
}

#[test]
fn five_bits_and_an_octet_use_exactly_two_octets() {
    let fields = vec![
        desc("b0", FieldDomain::Bit),
        desc("b1", FieldDomain::Bit),
        desc("b2", FieldDomain::Bit),
        desc("b3", FieldDomain::Bit),
        desc("b4", FieldDomain::Bit),
        desc("o", FieldDomain::Octet),
    ];
    let args: MethodArguments = [
        arg("b0", FieldValue::Bool(true)),
        arg("b1", FieldValue::Bool(false)),
        arg("b2", FieldValue::Bool(true)),
        arg("b3", FieldValue::Bool(false)),
        arg("b4", FieldValue::Bool(true)),
        arg("o", FieldValue::Int(0xAB)),
    ]
    .into_iter()
    .collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, true).expect("encode");

    // Bits LSB-first in one shared octet, then the octet field fresh.
    assert_eq!(buf, vec![0b0001_0101, 0xAB]);

    let mut cursor = ByteCursor::new(&buf);
    let decoded = FieldCodec::decode_fields(&mut cursor, &fields).expect("decode");
    assert_eq!(decoded, args);
    assert!(cursor.is_at_end());
}

#[test]
fn nine_bit_run_spills_into_a_second_octet() {
    let fields: Vec<FieldDescriptor> = (0..9)
        .map(|i| FieldDescriptor::new(format!("b{i}"), FieldDomain::Bit))
        .collect();
    let args: MethodArguments = (0..9)
        .map(|i| arg(&format!("b{i}"), FieldValue::Bool(i % 2 == 0)))
        .collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, true).expect("encode");
    assert_eq!(buf.len(), 2);
    assert_eq!(buf[0], 0b0101_0101);
    assert_eq!(buf[1], 0b0000_0001);

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        FieldCodec::decode_fields(&mut cursor, &fields).expect("decode"),
        args
    );
}

#[test]
fn every_domain_round_trips() {
    let fields = vec![
        desc("octet", FieldDomain::Octet),
        desc("short", FieldDomain::Short),
        desc("long", FieldDomain::Long),
        desc("longlong", FieldDomain::LongLong),
        desc("timestamp", FieldDomain::Timestamp),
        desc("shortstr", FieldDomain::ShortStr),
        desc("longstr", FieldDomain::LongStr),
        desc("table", FieldDomain::Table),
        desc("flag", FieldDomain::Bit),
    ];

    let mut table = FieldTable::new();
    table.insert("k".to_string(), FieldValue::Int(1));

    let args: MethodArguments = [
        arg("octet", FieldValue::Int(200)),
        arg("short", FieldValue::Int(0xBEEF)),
        arg("long", FieldValue::Int(0xDEAD_BEEF)),
        arg("longlong", FieldValue::Long(-42)),
        arg("timestamp", FieldValue::Timestamp(1_700_000_000)),
        arg("shortstr", FieldValue::ShortString("queue.name".to_string())),
        arg("longstr", FieldValue::LongString(vec![0, 159, 146, 150])),
        arg("table", FieldValue::Table(table)),
        arg("flag", FieldValue::Bool(true)),
    ]
    .into_iter()
    .collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, true).expect("encode");

    let mut cursor = ByteCursor::new(&buf);
    let decoded = FieldCodec::decode_fields(&mut cursor, &fields).expect("decode");
    assert_eq!(decoded, args);
    assert!(cursor.is_at_end());
}

#[test]
fn table_length_prefix_counts_entry_bytes_exactly() {
    let mut table = FieldTable::new();
    table.insert("a".to_string(), FieldValue::Int(1));
    table.insert("b".to_string(), FieldValue::LongString(b"x".to_vec()));

    let mut buf = Vec::new();
    FieldCodec::encode_table(&mut buf, &table).expect("encode");

    // "a" entry: key(1+1) + tag + u32 = 7; "b" entry: key(1+1) + tag +
    // len(4) + 1 byte = 8.
    let declared = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    assert_eq!(declared, 15);
    assert_eq!(buf.len(), 4 + declared);

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(FieldCodec::decode_table(&mut cursor).expect("decode"), table);
}

#[test]
fn table_key_order_is_irrelevant_on_decode() {
    // Hand-build the same two entries in the opposite order.
    let mut entries = Vec::new();
    entries.push(1u8);
    entries.extend_from_slice(b"b");
    entries.push(b'S');
    entries.extend_from_slice(&1u32.to_be_bytes());
    entries.extend_from_slice(b"x");
    entries.push(1u8);
    entries.extend_from_slice(b"a");
    entries.push(b'I');
    entries.extend_from_slice(&1u32.to_be_bytes());

    let mut buf = Vec::new();
    buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    buf.extend_from_slice(&entries);

    let mut expected = FieldTable::new();
    expected.insert("a".to_string(), FieldValue::Int(1));
    expected.insert("b".to_string(), FieldValue::LongString(b"x".to_vec()));

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        FieldCodec::decode_table(&mut cursor).expect("decode"),
        expected
    );
}

#[test]
fn nested_values_round_trip() {
    let mut inner = FieldTable::new();
    inner.insert("deep".to_string(), FieldValue::Bool(true));

    let mut table = FieldTable::new();
    table.insert("str".to_string(), FieldValue::LongString(b"text".to_vec()));
    table.insert("int".to_string(), FieldValue::Int(7));
    table.insert("long".to_string(), FieldValue::Long(-1));
    table.insert("float".to_string(), FieldValue::Float(1.5));
    table.insert("double".to_string(), FieldValue::Double(-2.25));
    table.insert(
        "decimal".to_string(),
        FieldValue::Decimal {
            scale: 2,
            mantissa: 12345,
        },
    );
    table.insert("time".to_string(), FieldValue::Timestamp(1_700_000_000));
    table.insert("nested".to_string(), FieldValue::Table(inner));
    table.insert("bytes".to_string(), FieldValue::Bytes(vec![0xDE, 0xAD]));
    table.insert(
        "list".to_string(),
        FieldValue::Array(vec![
            FieldValue::Int(1),
            FieldValue::LongString(b"two".to_vec()),
            FieldValue::Array(vec![FieldValue::Bool(false)]),
        ]),
    );

    let mut buf = Vec::new();
    FieldCodec::encode_table(&mut buf, &table).expect("encode");

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(FieldCodec::decode_table(&mut cursor).expect("decode"), table);
    assert!(cursor.is_at_end());
}

#[test]
fn unknown_value_tag_is_an_error() {
    let mut buf = Vec::new();
    let entries: Vec<u8> = vec![1, b'k', b'Z'];
    buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    buf.extend_from_slice(&entries);

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        FieldCodec::decode_table(&mut cursor),
        Err(FieldDecodeError::UnknownValueTag(b'Z'))
    );
}

#[test]
fn misdeclared_table_length_is_an_error() {
    // One 7-byte entry, but the prefix claims 5 bytes.
    let mut entries = Vec::new();
    entries.push(1u8);
    entries.extend_from_slice(b"a");
    entries.push(b'I');
    entries.extend_from_slice(&1u32.to_be_bytes());

    let mut buf = Vec::new();
    buf.extend_from_slice(&5u32.to_be_bytes());
    buf.extend_from_slice(&entries);

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        FieldCodec::decode_table(&mut cursor),
        Err(FieldDecodeError::LengthMismatch {
            declared: 5,
            consumed: 7,
        })
    );
}

#[test]
fn truncated_input_is_an_error() {
    let fields = vec![desc("n", FieldDomain::Long)];
    let mut cursor = ByteCursor::new(&[0, 0]);

    assert_eq!(
        FieldCodec::decode_fields(&mut cursor, &fields),
        Err(FieldDecodeError::UnexpectedEnd { needed: 2 })
    );
}

#[test]
fn numeric_domains_reject_out_of_range_values() {
    for (domain, value) in [(FieldDomain::Octet, 256u32), (FieldDomain::Short, 0x1_0000)] {
        let fields = vec![desc("n", domain)];
        let args: MethodArguments = [arg("n", FieldValue::Int(value))].into_iter().collect();
        let mut buf = Vec::new();
        assert!(matches!(
            FieldCodec::encode_fields(&mut buf, &fields, &args, true),
            Err(FieldEncodeError::OutOfRange { .. })
        ));
    }

    let fields = vec![desc("n", FieldDomain::Long)];
    let args: MethodArguments = [arg("n", FieldValue::Long(0x1_0000_0000))]
        .into_iter()
        .collect();
    let mut buf = Vec::new();
    assert!(matches!(
        FieldCodec::encode_fields(&mut buf, &fields, &args, true),
        Err(FieldEncodeError::OutOfRange { .. })
    ));
}

#[test]
fn short_string_over_255_bytes_is_rejected() {
    let fields = vec![desc("s", FieldDomain::ShortStr)];
    let args: MethodArguments = [arg("s", FieldValue::ShortString("x".repeat(256)))]
        .into_iter()
        .collect();

    let mut buf = Vec::new();
    assert!(matches!(
        FieldCodec::encode_fields(&mut buf, &fields, &args, true),
        Err(FieldEncodeError::ShortStringTooLong { length: 256, .. })
    ));
}

#[test]
fn bit_fields_require_booleans() {
    let fields = vec![desc("flag", FieldDomain::Bit)];
    let args: MethodArguments = [arg("flag", FieldValue::Int(1))].into_iter().collect();

    let mut buf = Vec::new();
    assert!(matches!(
        FieldCodec::encode_fields(&mut buf, &fields, &args, true),
        Err(FieldEncodeError::DomainMismatch { .. })
    ));
}

#[test]
fn strict_mode_requires_every_field() {
    let fields = vec![desc("s", FieldDomain::ShortStr), desc("o", FieldDomain::Octet)];
    let args: MethodArguments = [arg("o", FieldValue::Int(1))].into_iter().collect();

    let mut buf = Vec::new();
    assert_eq!(
        FieldCodec::encode_fields(&mut buf, &fields, &args, true),
        Err(FieldEncodeError::MissingField("s".to_string()))
    );
}

#[test]
fn non_strict_mode_skips_missing_fields() {
    let fields = vec![desc("s", FieldDomain::ShortStr), desc("o", FieldDomain::Octet)];
    let args: MethodArguments = [arg("o", FieldValue::Int(0x7F))].into_iter().collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, false).expect("encode");
    assert_eq!(buf, vec![0x7F]);
}

#[test]
fn non_strict_missing_bit_encodes_as_false() {
    let fields = vec![desc("a", FieldDomain::Bit), desc("b", FieldDomain::Bit)];
    let args: MethodArguments = [arg("b", FieldValue::Bool(true))].into_iter().collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, false).expect("encode");
    assert_eq!(buf, vec![0b0000_0010]);
}

#[test]
fn failed_encode_leaves_output_untouched() {
    let fields = vec![desc("o", FieldDomain::Octet), desc("n", FieldDomain::Short)];
    let args: MethodArguments = [
        arg("o", FieldValue::Int(1)),
        arg("n", FieldValue::Int(0x1_0000)),
    ]
    .into_iter()
    .collect();

    let mut buf = b"prefix".to_vec();
    assert!(FieldCodec::encode_fields(&mut buf, &fields, &args, true).is_err());
    assert_eq!(buf, b"prefix");
}

#[test]
fn long_strings_round_trip_arbitrary_bytes() {
    let fields = vec![desc("blob", FieldDomain::LongStr)];
    let payload: Vec<u8> = (0..=255).collect();
    let args: MethodArguments = [arg("blob", FieldValue::LongString(payload))]
        .into_iter()
        .collect();

    let mut buf = Vec::new();
    FieldCodec::encode_fields(&mut buf, &fields, &args, true).expect("encode");

    let mut cursor = ByteCursor::new(&buf);
    assert_eq!(
        FieldCodec::decode_fields(&mut cursor, &fields).expect("decode"),
        args
    );
}

#[test]
fn timestamps_convert_to_calendar_datetimes() {
    let datetime = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
    let value = FieldValue::from_datetime(datetime);

    assert_eq!(value, FieldValue::Timestamp(1_700_000_000));
    assert_eq!(value.as_datetime(), Some(datetime));
}
