//! Marker names and the marker classifier.
//!
//! A decorator counts as a marker only in its simple forms, `@Value` and
//! `@Value(...)`. Member-access decorators (`@lib.Value`) are always
//! treated as unrelated.

use crate::parser::ast::{ClassDecl, ClassMember, Decorator};

use super::registry::HandlerRegistry;

// Class-level markers
pub const VALUE: &str = "Value";
pub const RECORD: &str = "Record";
pub const DATA: &str = "Data";
pub const NO_ARGS_CONSTRUCTOR: &str = "NoArgsConstructor";
pub const ALL_ARGS_CONSTRUCTOR: &str = "AllArgsConstructor";
pub const REQUIRED_ARGS_CONSTRUCTOR: &str = "RequiredArgsConstructor";
pub const EQUALS_AND_HASH_CODE: &str = "EqualsAndHashCode";
pub const TO_STRING: &str = "ToString";
pub const WITH: &str = "With";
pub const GETTER: &str = "Getter";
pub const SETTER: &str = "Setter";
pub const BUILDER: &str = "Builder";
pub const SINGLETON: &str = "Singleton";
pub const LOG: &str = "Log";

// Field-level markers
pub const NON_NULL: &str = "NonNull";

// Method-level markers (recognized, no handlers)
pub const MEMOIZE: &str = "Memoize";
pub const AUTO_BIND: &str = "AutoBind";

pub const CLASS_MARKERS: &[&str] = &[
    VALUE,
    RECORD,
    DATA,
    NO_ARGS_CONSTRUCTOR,
    ALL_ARGS_CONSTRUCTOR,
    REQUIRED_ARGS_CONSTRUCTOR,
    EQUALS_AND_HASH_CODE,
    TO_STRING,
    WITH,
    GETTER,
    SETTER,
    BUILDER,
    SINGLETON,
    LOG,
];

/// Class markers that choose a constructor shape of their own.
pub const CONSTRUCTOR_MARKERS: &[&str] = &[
    VALUE,
    RECORD,
    DATA,
    NO_ARGS_CONSTRUCTOR,
    ALL_ARGS_CONSTRUCTOR,
    REQUIRED_ARGS_CONSTRUCTOR,
];

pub const FIELD_MARKERS: &[&str] = &[NON_NULL];

pub const METHOD_MARKERS: &[&str] = &[MEMOIZE, AUTO_BIND];

/// Markers found on a class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Recognized class markers, in source order, without repeats.
    pub class_markers: Vec<String>,
    /// Whether any instance field carries a recognized field marker.
    pub has_field_markers: bool,
}

impl Classification {
    /// No recognized marker at all; the class is left untouched.
    pub fn is_empty(&self) -> bool {
        self.class_markers.is_empty() && !self.has_field_markers
    }
}

/// Whether a decorator is a recognized field marker.
pub fn is_field_marker(decorator: &Decorator) -> bool {
    decorator
        .simple_name()
        .is_some_and(|name| FIELD_MARKERS.contains(&name))
}

/// Whether a decorator is a recognized method marker.
pub fn is_method_marker(decorator: &Decorator) -> bool {
    decorator
        .simple_name()
        .is_some_and(|name| METHOD_MARKERS.contains(&name))
}

/// Partition a class's decorators into recognized markers.
///
/// Class markers are recognized when the registry has a handler for them.
pub fn classify(class: &ClassDecl, registry: &HandlerRegistry) -> Classification {
    let mut class_markers: Vec<String> = Vec::new();
    for name in class.decorators.iter().filter_map(Decorator::simple_name) {
        if registry.lookup(name).is_some() && !class_markers.iter().any(|m| m == name) {
            class_markers.push(name.to_string());
        }
    }

    let has_field_markers = class.members.iter().any(|member| match member {
        ClassMember::Field(field) => !field.is_static && field.decorators.iter().any(is_field_marker),
        _ => false,
    });

    Classification {
        class_markers,
        has_field_markers,
    }
}
