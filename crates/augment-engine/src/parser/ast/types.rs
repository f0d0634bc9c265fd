//! Type annotation AST nodes
//!
//! Types are carried through the transformation untouched; the engine never
//! checks them. Supported forms:
//! - Primitive types (number, string, boolean, null, undefined, void)
//! - Type references (Point, Map<K, V>)
//! - Union types (A | B | null)
//! - Array types (T[])

use super::*;
use crate::parser::token::Span;

/// Type annotation
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub ty: Type,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(ty: Type, span: Span) -> Self {
        Self { ty, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    Reference(TypeReference),
    Union(UnionType),
    Array(ArrayType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Number,
    String,
    Boolean,
    Null,
    Undefined,
    Void,
}

impl PrimitiveType {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
            PrimitiveType::Undefined => "undefined",
            PrimitiveType::Void => "void",
        }
    }

    /// Primitive named by `name`, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(PrimitiveType::Number),
            "string" => Some(PrimitiveType::String),
            "boolean" => Some(PrimitiveType::Boolean),
            "undefined" => Some(PrimitiveType::Undefined),
            _ => None,
        }
    }
}

/// Type reference: Point, Map<K, V>
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub name: Identifier,
    pub type_args: Option<Vec<TypeAnnotation>>,
}

impl TypeReference {
    pub fn simple(name: Identifier) -> Self {
        Self {
            name,
            type_args: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub types: Vec<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element_type: Box<TypeAnnotation>,
}
