use crate::field::FieldDescriptor;

/// The external protocol description the registry is built from: ordered
/// classes, each with ordered methods and (for content classes) ordered
/// property fields. This is the sole external data dependency of the
/// crate; a built-in AMQP 0-9-1 description ships in
/// [`crate::protocol::amqp_0_9_1`].
#[derive(Debug, Clone)]
pub struct ProtocolDefinition {
    pub classes: Vec<ClassDefinition>,
}

#[derive(Debug, Clone)]
pub struct ClassDefinition {
    pub id: u16,
    pub name: String,
    pub methods: Vec<MethodDefinition>,

    /// Optional content properties carried by this class's content-header
    /// frames. At most 15 fit the single AMQP 0-9-1 property flag word.
    pub properties: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone)]
pub struct MethodDefinition {
    pub id: u16,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}
