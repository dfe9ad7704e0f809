use crate::constants::MAX_CONTENT_PROPERTIES;
use crate::field::FieldDescriptor;
use crate::protocol::{ProtocolDefinition, ProtocolError};
use std::collections::HashMap;
use std::sync::Arc;

/// The schema of one method: its two-level id, synthesized name, and
/// ordered field list. Immutable after registry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSchema {
    pub class_id: u16,
    pub method_id: u16,

    /// Synthesized as class name + method name with its first letter
    /// capitalized, e.g. `connection` + `startOk` = `connectionStartOk`.
    pub name: String,

    pub fields: Vec<FieldDescriptor>,
}

/// Per-class content metadata: the ordered optional properties selected by
/// a content header's property flag word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentClassSchema {
    pub id: u16,
    pub name: String,
    pub properties: Vec<FieldDescriptor>,
}

/// Lookup from `(class id, method id)` or synthesized method name to a
/// shared [`MethodSchema`], built once from a [`ProtocolDefinition`].
///
/// Construction is total and deterministic; it fails only on a
/// structurally invalid description, which is a startup error. The built
/// registry is read-only and safe to share across connections and threads.
pub struct MethodRegistry {
    by_id: HashMap<(u16, u16), Arc<MethodSchema>>,
    by_name: HashMap<String, Arc<MethodSchema>>,
    content_classes: HashMap<u16, Arc<ContentClassSchema>>,
}

impl MethodRegistry {
    pub fn from_definition(definition: &ProtocolDefinition) -> Result<Self, ProtocolError> {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        let mut content_classes = HashMap::new();

        for class in &definition.classes {
            if class.name.is_empty() {
                return Err(ProtocolError::MissingClassName(class.id));
            }
            if class.properties.len() > MAX_CONTENT_PROPERTIES {
                return Err(ProtocolError::TooManyProperties {
                    class: class.name.clone(),
                    count: class.properties.len(),
                });
            }

            let content = Arc::new(ContentClassSchema {
                id: class.id,
                name: class.name.clone(),
                properties: class.properties.clone(),
            });
            if content_classes.insert(class.id, content).is_some() {
                return Err(ProtocolError::DuplicateClass(class.id));
            }

            for method in &class.methods {
                if method.name.is_empty() {
                    return Err(ProtocolError::MissingMethodName {
                        class: class.name.clone(),
                        method_id: method.id,
                    });
                }

                let name = synthesize_name(&class.name, &method.name);
                let schema = Arc::new(MethodSchema {
                    class_id: class.id,
                    method_id: method.id,
                    name: name.clone(),
                    fields: method.fields.clone(),
                });

                if by_id
                    .insert((class.id, method.id), Arc::clone(&schema))
                    .is_some()
                {
                    return Err(ProtocolError::DuplicateMethod(name));
                }
                if by_name.insert(name.clone(), schema).is_some() {
                    return Err(ProtocolError::DuplicateMethod(name));
                }
            }
        }

        Ok(Self {
            by_id,
            by_name,
            content_classes,
        })
    }

    pub fn method_by_id(&self, class_id: u16, method_id: u16) -> Option<&Arc<MethodSchema>> {
        self.by_id.get(&(class_id, method_id))
    }

    pub fn method_by_name(&self, name: &str) -> Option<&Arc<MethodSchema>> {
        self.by_name.get(name)
    }

    pub fn content_class(&self, class_id: u16) -> Option<&Arc<ContentClassSchema>> {
        self.content_classes.get(&class_id)
    }

    pub fn method_count(&self) -> usize {
        self.by_id.len()
    }
}

fn synthesize_name(class_name: &str, method_name: &str) -> String {
    let mut name = String::with_capacity(class_name.len() + method_name.len());
    name.push_str(class_name);

    let mut chars = method_name.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }

    name
}
