//! Property descriptors extracted from instance fields.

use crate::parser::ast::{ClassDecl, ClassMember, FieldDecl, TypeAnnotation};

use super::marker::FIELD_MARKERS;

/// One non-static field of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Declared type, carried through to generated signatures unchanged.
    pub type_annotation: Option<TypeAnnotation>,
    /// `name?: T`
    pub optional: bool,
    /// `readonly` in the source
    pub readonly: bool,
    pub has_default: bool,
    pub private: bool,
    pub non_null: bool,
    /// Recognized field markers found on the field.
    pub markers: Vec<String>,
}

impl PropertyDescriptor {
    pub fn from_field(field: &FieldDecl) -> Self {
        let mut markers: Vec<String> = Vec::new();
        for name in field.decorators.iter().filter_map(|d| d.simple_name()) {
            if FIELD_MARKERS.contains(&name) && !markers.iter().any(|m| m == name) {
                markers.push(name.to_string());
            }
        }

        Self {
            name: field.name.name.clone(),
            type_annotation: field.type_annotation.clone(),
            optional: field.optional,
            readonly: field.is_readonly,
            has_default: field.initializer.is_some(),
            private: field.is_private(),
            non_null: markers.iter().any(|m| m == super::marker::NON_NULL),
            markers,
        }
    }

    /// Part of a required-arguments constructor.
    pub fn is_required(&self) -> bool {
        !self.has_default && !self.optional
    }

    /// Field name with its first character upper-cased: `firstName` -> `FirstName`.
    pub fn capitalized(&self) -> String {
        capitalize(&self.name)
    }
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collect descriptors for every instance field, in declaration order.
pub fn extract_properties(class: &ClassDecl) -> Vec<PropertyDescriptor> {
    class
        .members
        .iter()
        .filter_map(|member| match member {
            ClassMember::Field(field) if !field.is_static => Some(PropertyDescriptor::from_field(field)),
            _ => None,
        })
        .collect()
}
