//! Runtime values and primitive conversions.

use std::fmt;

use crate::parser::printer::format_number;

/// Index of an object on the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Index of a class in the class registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub usize);

/// Host-provided globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `console`
    Console,
    /// `console.log`
    ConsoleLog,
    /// `Object`
    Object,
    /// `Object.freeze`
    ObjectFreeze,
    /// `String(value)`
    String,
    /// `Error` / `new Error(message)`
    Error,
}

impl Builtin {
    pub fn from_global(name: &str) -> Option<Self> {
        match name {
            "console" => Some(Builtin::Console),
            "Object" => Some(Builtin::Object),
            "String" => Some(Builtin::String),
            "Error" => Some(Builtin::Error),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        !matches!(self, Builtin::Console)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Console => "console",
            Builtin::ConsoleLog => "log",
            Builtin::Object => "Object",
            Builtin::ObjectFreeze => "freeze",
            Builtin::String => "String",
            Builtin::Error => "Error",
        }
    }
}

/// A method detached from its receiver, e.g. the value of `p.getX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    pub class: ClassId,
    pub name: String,
    pub is_static: bool,
}

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(ObjectId),
    Class(ClassId),
    Function(FunctionRef),
    Native(Builtin),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Result of `typeof value`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Class(_) | Value::Function(_) => "function",
            Value::Native(builtin) if builtin.is_callable() => "function",
            Value::Native(_) => "object",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// String conversion for primitives; heap values print a placeholder.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Class(_) | Value::Function(_) => write!(f, "function () {{ [native code] }}"),
            Value::Native(Builtin::Console) => write!(f, "[object console]"),
            Value::Native(b) => write!(f, "function {}() {{ [native code] }}", b.name()),
        }
    }
}

/// Number conversion for primitive strings: whitespace-trimmed, empty is 0,
/// `0x` prefixes are hexadecimal, anything unparsable is NaN.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16).map_or(f64::NAN, |v| v as f64);
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// ECMAScript ToInt32.
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    const TWO_32: f64 = 4_294_967_296.0;
    let wrapped = n.trunc().rem_euclid(TWO_32);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - TWO_32) as i32
    } else {
        wrapped as i32
    }
}
