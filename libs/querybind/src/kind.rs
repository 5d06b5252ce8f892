use std::fmt;

use serde::Serialize;

/// Bit width of an integer kind. `Size` is the platform pointer width
/// (`isize` / `usize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    Size,
}

/// Bit width of a floating point kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatWidth {
    W32,
    W64,
}

/// Primitive kind accepted for each individual value of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Bool,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Str,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Bool => "bool",
            ElementKind::Int(IntWidth::W8) => "i8",
            ElementKind::Int(IntWidth::W16) => "i16",
            ElementKind::Int(IntWidth::W32) => "i32",
            ElementKind::Int(IntWidth::W64) => "i64",
            ElementKind::Int(IntWidth::Size) => "isize",
            ElementKind::Uint(IntWidth::W8) => "u8",
            ElementKind::Uint(IntWidth::W16) => "u16",
            ElementKind::Uint(IntWidth::W32) => "u32",
            ElementKind::Uint(IntWidth::W64) => "u64",
            ElementKind::Uint(IntWidth::Size) => "usize",
            ElementKind::Float(FloatWidth::W32) => "f32",
            ElementKind::Float(FloatWidth::W64) => "f64",
            ElementKind::Str => "string",
        };
        f.write_str(name)
    }
}

/// Element kinds a record field may declare but that cannot be bound
/// from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedKind {
    Complex,
    Channel,
    Function,
    /// Trait objects and `impl Trait`.
    Interface,
    Map,
    /// A nested composite type; carries the type as written.
    Record(&'static str),
    RawPointer,
    Reference,
    /// A wrapper inside a wrapper, e.g. `Option<Vec<u8>>`.
    NestedShape,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::Complex => f.write_str("complex number"),
            UnsupportedKind::Channel => f.write_str("channel"),
            UnsupportedKind::Function => f.write_str("function"),
            UnsupportedKind::Interface => f.write_str("trait object"),
            UnsupportedKind::Map => f.write_str("map"),
            UnsupportedKind::Record(ty) => write!(f, "nested record `{ty}`"),
            UnsupportedKind::RawPointer => f.write_str("raw pointer"),
            UnsupportedKind::Reference => f.write_str("reference"),
            UnsupportedKind::NestedShape => f.write_str("nested optional/sequence"),
        }
    }
}

/// Upper bound on the number of raw values a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxValues {
    Limited(usize),
    Unbounded,
}

impl MaxValues {
    pub fn admits(self, count: usize) -> bool {
        match self {
            MaxValues::Limited(max) => count <= max,
            MaxValues::Unbounded => true,
        }
    }
}

impl fmt::Display for MaxValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxValues::Limited(max) => write!(f, "{max}"),
            MaxValues::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// How many raw values a parameter takes, and whether their order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one value.
    Scalar,
    /// Zero or one value.
    Optional,
    /// Any number of values, in input order.
    Repeated,
    /// Exactly `n` values, order-significant.
    Fixed(usize),
}

impl Cardinality {
    pub fn min(self) -> usize {
        match self {
            Cardinality::Scalar => 1,
            Cardinality::Optional | Cardinality::Repeated => 0,
            Cardinality::Fixed(n) => n,
        }
    }

    pub fn max(self) -> MaxValues {
        match self {
            Cardinality::Scalar | Cardinality::Optional => MaxValues::Limited(1),
            Cardinality::Repeated => MaxValues::Unbounded,
            Cardinality::Fixed(n) => MaxValues::Limited(n),
        }
    }
}
