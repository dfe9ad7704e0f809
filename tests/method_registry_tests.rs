use amqp_wire::field::{FieldDescriptor, FieldDomain, FieldTable, FieldValue, MethodArguments};
use amqp_wire::protocol::{
    amqp_0_9_1, ClassDefinition, MethodCodec, MethodDefinition, MethodRegistry,
    ProtocolDefinition, ProtocolError,
};

fn arg(name: &str, value: FieldValue) -> (String, FieldValue) {
    (name.to_string(), value)
}

#[test]
fn built_in_registry_resolves_well_known_ids() {
    let registry = amqp_0_9_1::registry();

    for (class_id, method_id, name) in [
        (10, 10, "connectionStart"),
        (10, 11, "connectionStartOk"),
        (10, 30, "connectionTune"),
        (10, 41, "connectionOpenOk"),
        (20, 40, "channelClose"),
        (60, 40, "basicPublish"),
        (60, 60, "basicDeliver"),
        (60, 120, "basicNack"),
        (85, 10, "confirmSelect"),
        (90, 30, "txRollback"),
    ] {
        let schema = registry
            .method_by_id(class_id, method_id)
            .unwrap_or_else(|| panic!("missing [{class_id}, {method_id}]"));
        assert_eq!(schema.name, name);

        let by_name = registry.method_by_name(name).expect("lookup by name");
        assert_eq!(by_name.class_id, class_id);
        assert_eq!(by_name.method_id, method_id);
    }
}

#[test]
fn built_in_registry_rejects_unknown_lookups() {
    let registry = amqp_0_9_1::registry();
    assert!(registry.method_by_id(10, 99).is_none());
    assert!(registry.method_by_id(99, 10).is_none());
    assert!(registry.method_by_name("basicTeleport").is_none());
    assert!(registry.content_class(99).is_none());
}

#[test]
fn basic_class_carries_its_content_properties() {
    let registry = amqp_0_9_1::registry();
    let class = registry.content_class(60).expect("basic class");

    assert_eq!(class.name, "basic");
    assert_eq!(class.properties.len(), 14);
    assert_eq!(class.properties[0].name, "contentType");
    assert_eq!(class.properties[2].name, "headers");
    assert_eq!(class.properties[2].domain, FieldDomain::Table);
    assert_eq!(class.properties[9].domain, FieldDomain::Timestamp);
}

#[test]
fn method_names_capitalize_the_method_part() {
    let definition = ProtocolDefinition {
        classes: vec![ClassDefinition {
            id: 10,
            name: "widget".to_string(),
            methods: vec![
                MethodDefinition {
                    id: 10,
                    name: "startOk".to_string(),
                    fields: vec![],
                },
                MethodDefinition {
                    id: 11,
                    name: "go".to_string(),
                    fields: vec![],
                },
            ],
            properties: vec![],
        }],
    };

    let registry = MethodRegistry::from_definition(&definition).expect("valid definition");
    assert!(registry.method_by_name("widgetStartOk").is_some());
    assert!(registry.method_by_name("widgetGo").is_some());
    assert_eq!(registry.method_count(), 2);
}

#[test]
fn construction_rejects_structural_defects() {
    let base = |classes| ProtocolDefinition { classes };
    let class = |id: u16, name: &str, methods| ClassDefinition {
        id,
        name: name.to_string(),
        methods,
        properties: vec![],
    };
    let method = |id: u16, name: &str| MethodDefinition {
        id,
        name: name.to_string(),
        fields: vec![],
    };

    assert_eq!(
        MethodRegistry::from_definition(&base(vec![class(10, "", vec![])])).err(),
        Some(ProtocolError::MissingClassName(10))
    );

    assert_eq!(
        MethodRegistry::from_definition(&base(vec![class(10, "c", vec![method(10, "")])])).err(),
        Some(ProtocolError::MissingMethodName {
            class: "c".to_string(),
            method_id: 10,
        })
    );

    assert_eq!(
        MethodRegistry::from_definition(&base(vec![
            class(10, "a", vec![]),
            class(10, "b", vec![]),
        ]))
        .err(),
        Some(ProtocolError::DuplicateClass(10))
    );

    assert_eq!(
        MethodRegistry::from_definition(&base(vec![class(
            10,
            "c",
            vec![method(10, "go"), method(10, "go")],
        )]))
        .err(),
        Some(ProtocolError::DuplicateMethod("cGo".to_string()))
    );

    let overloaded = ClassDefinition {
        id: 10,
        name: "c".to_string(),
        methods: vec![],
        properties: (0..16)
            .map(|i| FieldDescriptor::new(format!("p{i}"), FieldDomain::ShortStr))
            .collect(),
    };
    assert_eq!(
        MethodRegistry::from_definition(&base(vec![overloaded])).err(),
        Some(ProtocolError::TooManyProperties {
            class: "c".to_string(),
            count: 16,
        })
    );
}

#[test]
fn method_payloads_round_trip() {
    let registry = amqp_0_9_1::registry();
    let schema = registry.method_by_name("basicDeliver").expect("schema");

    let args: MethodArguments = [
        arg("consumerTag", FieldValue::ShortString("tag-1".to_string())),
        arg("deliveryTag", FieldValue::Long(42)),
        arg("redelivered", FieldValue::Bool(true)),
        arg("exchange", FieldValue::ShortString("events".to_string())),
        arg("routingKey", FieldValue::ShortString("user.created".to_string())),
    ]
    .into_iter()
    .collect();

    let payload = MethodCodec::encode_method(schema, &args).expect("encode");
    assert_eq!(&payload[..4], &[0, 60, 0, 60]);

    let (decoded_schema, decoded_args) =
        MethodCodec::decode_method(registry, &payload).expect("decode");
    assert_eq!(decoded_schema.name, "basicDeliver");
    assert_eq!(decoded_args, args);
}

#[test]
fn decoding_an_unknown_method_pair_fails() {
    let registry = amqp_0_9_1::registry();
    let payload = [0u8, 99, 0, 99];

    assert_eq!(
        MethodCodec::decode_method(registry, &payload).err(),
        Some(ProtocolError::UnknownMethod {
            class_id: 99,
            method_id: 99,
        })
    );
}

#[test]
fn content_headers_round_trip_a_property_subset() {
    let registry = amqp_0_9_1::registry();
    let class = registry.content_class(60).expect("basic class");

    let mut headers = FieldTable::new();
    headers.insert("retries".to_string(), FieldValue::Int(3));

    let properties: MethodArguments = [
        arg("contentType", FieldValue::ShortString("text/plain".to_string())),
        arg("headers", FieldValue::Table(headers)),
        arg("deliveryMode", FieldValue::Int(2)),
        arg("timestamp", FieldValue::Timestamp(1_700_000_000)),
    ]
    .into_iter()
    .collect();

    let payload =
        MethodCodec::encode_content_header(class, 0, 11, &properties).expect("encode");

    // class 60, weight 0, body size 11, then the flag word selecting
    // properties 0, 2, 3, and 9 from the high end.
    assert_eq!(&payload[..2], &[0, 60]);
    assert_eq!(&payload[2..4], &[0, 0]);
    assert_eq!(&payload[4..12], &11u64.to_be_bytes());
    let flags = u16::from_be_bytes([payload[12], payload[13]]);
    assert_eq!(flags, (1 << 15) | (1 << 13) | (1 << 12) | (1 << 6));

    let header = MethodCodec::decode_content_header(registry, &payload).expect("decode");
    assert_eq!(header.class.id, 60);
    assert_eq!(header.weight, 0);
    assert_eq!(header.body_size, 11);
    assert_eq!(header.properties, properties);
}

#[test]
fn content_header_with_no_properties_has_a_zero_flag_word() {
    let registry = amqp_0_9_1::registry();
    let class = registry.content_class(60).expect("basic class");

    let payload = MethodCodec::encode_content_header(class, 0, 5, &MethodArguments::new())
        .expect("encode");
    assert_eq!(&payload[12..14], &[0, 0]);

    let header = MethodCodec::decode_content_header(registry, &payload).expect("decode");
    assert!(header.properties.is_empty());
}

#[test]
fn property_flag_continuation_bit_is_rejected() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&60u16.to_be_bytes());
    payload.extend_from_slice(&0u16.to_be_bytes());
    payload.extend_from_slice(&0u64.to_be_bytes());
    payload.extend_from_slice(&0x0001u16.to_be_bytes());

    assert_eq!(
        MethodCodec::decode_content_header(amqp_0_9_1::registry(), &payload).err(),
        Some(ProtocolError::PropertyFlagContinuation)
    );
}

#[test]
fn content_header_for_unknown_class_fails() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&99u16.to_be_bytes());
    payload.extend_from_slice(&0u16.to_be_bytes());
    payload.extend_from_slice(&0u64.to_be_bytes());
    payload.extend_from_slice(&0u16.to_be_bytes());

    assert_eq!(
        MethodCodec::decode_content_header(amqp_0_9_1::registry(), &payload).err(),
        Some(ProtocolError::UnknownContentClass(99))
    );
}
