use crate::field::FieldDomain;

/// One named, domain-typed slot in a method argument list or content
/// property list. Order matters: codecs walk descriptors in sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub domain: FieldDomain,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, domain: FieldDomain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }
}
