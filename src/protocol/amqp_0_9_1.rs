//! The built-in AMQP 0-9-1 protocol description: the classes, methods,
//! fields, and content properties a broker speaking 0-9-1 (with the common
//! RabbitMQ extensions) will use.

use crate::field::{FieldDescriptor, FieldDomain};
use crate::protocol::{ClassDefinition, MethodDefinition, MethodRegistry, ProtocolDefinition};
use once_cell::sync::Lazy;

static REGISTRY: Lazy<MethodRegistry> = Lazy::new(|| {
    MethodRegistry::from_definition(&definition())
        .expect("built-in AMQP 0-9-1 definition is structurally valid")
});

/// The shared registry built from [`definition`]. Built lazily, once per
/// process; callers pass it by reference into connections.
pub fn registry() -> &'static MethodRegistry {
    &REGISTRY
}

/// The full AMQP 0-9-1 class/method/field table.
pub fn definition() -> ProtocolDefinition {
    use FieldDomain::{Bit, Long, LongLong, LongStr, Octet, Short, ShortStr, Table, Timestamp};

    ProtocolDefinition {
        classes: vec![
            class(
                10,
                "connection",
                vec![
                    method(
                        10,
                        "start",
                        vec![
                            field("versionMajor", Octet),
                            field("versionMinor", Octet),
                            field("serverProperties", Table),
                            field("mechanisms", LongStr),
                            field("locales", LongStr),
                        ],
                    ),
                    method(
                        11,
                        "startOk",
                        vec![
                            field("clientProperties", Table),
                            field("mechanism", ShortStr),
                            field("response", LongStr),
                            field("locale", ShortStr),
                        ],
                    ),
                    method(20, "secure", vec![field("challenge", LongStr)]),
                    method(21, "secureOk", vec![field("response", LongStr)]),
                    method(
                        30,
                        "tune",
                        vec![
                            field("channelMax", Short),
                            field("frameMax", Long),
                            field("heartbeat", Short),
                        ],
                    ),
                    method(
                        31,
                        "tuneOk",
                        vec![
                            field("channelMax", Short),
                            field("frameMax", Long),
                            field("heartbeat", Short),
                        ],
                    ),
                    method(
                        40,
                        "open",
                        vec![
                            field("virtualHost", ShortStr),
                            field("capabilities", ShortStr),
                            field("insist", Bit),
                        ],
                    ),
                    method(41, "openOk", vec![field("knownHosts", ShortStr)]),
                    method(
                        50,
                        "close",
                        vec![
                            field("replyCode", Short),
                            field("replyText", ShortStr),
                            field("classId", Short),
                            field("methodId", Short),
                        ],
                    ),
                    method(51, "closeOk", vec![]),
                ],
                vec![],
            ),
            class(
                20,
                "channel",
                vec![
                    method(10, "open", vec![field("outOfBand", ShortStr)]),
                    method(11, "openOk", vec![field("channelId", LongStr)]),
                    method(20, "flow", vec![field("active", Bit)]),
                    method(21, "flowOk", vec![field("active", Bit)]),
                    method(
                        40,
                        "close",
                        vec![
                            field("replyCode", Short),
                            field("replyText", ShortStr),
                            field("classId", Short),
                            field("methodId", Short),
                        ],
                    ),
                    method(41, "closeOk", vec![]),
                ],
                vec![],
            ),
            class(
                40,
                "exchange",
                vec![
                    method(
                        10,
                        "declare",
                        vec![
                            field("ticket", Short),
                            field("exchange", ShortStr),
                            field("type", ShortStr),
                            field("passive", Bit),
                            field("durable", Bit),
                            field("autoDelete", Bit),
                            field("internal", Bit),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(11, "declareOk", vec![]),
                    method(
                        20,
                        "delete",
                        vec![
                            field("ticket", Short),
                            field("exchange", ShortStr),
                            field("ifUnused", Bit),
                            field("nowait", Bit),
                        ],
                    ),
                    method(21, "deleteOk", vec![]),
                    method(
                        30,
                        "bind",
                        vec![
                            field("ticket", Short),
                            field("destination", ShortStr),
                            field("source", ShortStr),
                            field("routingKey", ShortStr),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(31, "bindOk", vec![]),
                    method(
                        40,
                        "unbind",
                        vec![
                            field("ticket", Short),
                            field("destination", ShortStr),
                            field("source", ShortStr),
                            field("routingKey", ShortStr),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(51, "unbindOk", vec![]),
                ],
                vec![],
            ),
            class(
                50,
                "queue",
                vec![
                    method(
                        10,
                        "declare",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("passive", Bit),
                            field("durable", Bit),
                            field("exclusive", Bit),
                            field("autoDelete", Bit),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(
                        11,
                        "declareOk",
                        vec![
                            field("queue", ShortStr),
                            field("messageCount", Long),
                            field("consumerCount", Long),
                        ],
                    ),
                    method(
                        20,
                        "bind",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(21, "bindOk", vec![]),
                    method(
                        30,
                        "purge",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("nowait", Bit),
                        ],
                    ),
                    method(31, "purgeOk", vec![field("messageCount", Long)]),
                    method(
                        40,
                        "delete",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("ifUnused", Bit),
                            field("ifEmpty", Bit),
                            field("nowait", Bit),
                        ],
                    ),
                    method(41, "deleteOk", vec![field("messageCount", Long)]),
                    method(
                        50,
                        "unbind",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                            field("arguments", Table),
                        ],
                    ),
                    method(51, "unbindOk", vec![]),
                ],
                vec![],
            ),
            class(
                60,
                "basic",
                vec![
                    method(
                        10,
                        "qos",
                        vec![
                            field("prefetchSize", Long),
                            field("prefetchCount", Short),
                            field("global", Bit),
                        ],
                    ),
                    method(11, "qosOk", vec![]),
                    method(
                        20,
                        "consume",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("consumerTag", ShortStr),
                            field("noLocal", Bit),
                            field("noAck", Bit),
                            field("exclusive", Bit),
                            field("nowait", Bit),
                            field("arguments", Table),
                        ],
                    ),
                    method(21, "consumeOk", vec![field("consumerTag", ShortStr)]),
                    method(
                        30,
                        "cancel",
                        vec![field("consumerTag", ShortStr), field("nowait", Bit)],
                    ),
                    method(31, "cancelOk", vec![field("consumerTag", ShortStr)]),
                    method(
                        40,
                        "publish",
                        vec![
                            field("ticket", Short),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                            field("mandatory", Bit),
                            field("immediate", Bit),
                        ],
                    ),
                    method(
                        50,
                        "return",
                        vec![
                            field("replyCode", Short),
                            field("replyText", ShortStr),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                        ],
                    ),
                    method(
                        60,
                        "deliver",
                        vec![
                            field("consumerTag", ShortStr),
                            field("deliveryTag", LongLong),
                            field("redelivered", Bit),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                        ],
                    ),
                    method(
                        70,
                        "get",
                        vec![
                            field("ticket", Short),
                            field("queue", ShortStr),
                            field("noAck", Bit),
                        ],
                    ),
                    method(
                        71,
                        "getOk",
                        vec![
                            field("deliveryTag", LongLong),
                            field("redelivered", Bit),
                            field("exchange", ShortStr),
                            field("routingKey", ShortStr),
                            field("messageCount", Long),
                        ],
                    ),
                    method(72, "getEmpty", vec![field("clusterId", ShortStr)]),
                    method(
                        80,
                        "ack",
                        vec![field("deliveryTag", LongLong), field("multiple", Bit)],
                    ),
                    method(
                        90,
                        "reject",
                        vec![field("deliveryTag", LongLong), field("requeue", Bit)],
                    ),
                    method(100, "recoverAsync", vec![field("requeue", Bit)]),
                    method(110, "recover", vec![field("requeue", Bit)]),
                    method(111, "recoverOk", vec![]),
                    method(
                        120,
                        "nack",
                        vec![
                            field("deliveryTag", LongLong),
                            field("multiple", Bit),
                            field("requeue", Bit),
                        ],
                    ),
                ],
                vec![
                    field("contentType", ShortStr),
                    field("contentEncoding", ShortStr),
                    field("headers", Table),
                    field("deliveryMode", Octet),
                    field("priority", Octet),
                    field("correlationId", ShortStr),
                    field("replyTo", ShortStr),
                    field("expiration", ShortStr),
                    field("messageId", ShortStr),
                    field("timestamp", Timestamp),
                    field("type", ShortStr),
                    field("userId", ShortStr),
                    field("appId", ShortStr),
                    field("clusterId", ShortStr),
                ],
            ),
            class(
                85,
                "confirm",
                vec![
                    method(10, "select", vec![field("nowait", Bit)]),
                    method(11, "selectOk", vec![]),
                ],
                vec![],
            ),
            class(
                90,
                "tx",
                vec![
                    method(10, "select", vec![]),
                    method(11, "selectOk", vec![]),
                    method(20, "commit", vec![]),
                    method(21, "commitOk", vec![]),
                    method(30, "rollback", vec![]),
                    method(31, "rollbackOk", vec![]),
                ],
                vec![],
            ),
        ],
    }
}

fn class(
    id: u16,
    name: &str,
    methods: Vec<MethodDefinition>,
    properties: Vec<FieldDescriptor>,
) -> ClassDefinition {
    ClassDefinition {
        id,
        name: name.to_string(),
        methods,
        properties,
    }
}

fn method(id: u16, name: &str, fields: Vec<FieldDescriptor>) -> MethodDefinition {
    MethodDefinition {
        id,
        name: name.to_string(),
        fields,
    }
}

fn field(name: &str, domain: FieldDomain) -> FieldDescriptor {
    FieldDescriptor::new(name, domain)
}
