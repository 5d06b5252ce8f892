use std::fmt;

use crate::kind::{ElementKind, UnsupportedKind};
use crate::value::FieldValue;

/// A type whose fields can be bound from query parameters.
///
/// Normally implemented with `#[derive(Record)]`, which builds the
/// descriptor table at compile time and generates positional accessors
/// for every exported field. A hand-written implementation must keep
/// [`Record::field`] and [`Record::set_field`] consistent with the
/// [`FieldShape`] it declares for each index.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Default, querybind::Record)]
/// pub struct Search {
///     #[param(rename = "q")]
///     pub query: String,
///     pub page: Option<u32>,
///     pub tags: Vec<String>,
///     request_id: u64,
/// }
/// ```
pub trait Record: Clone + 'static {
    fn descriptor() -> RecordDescriptor;

    /// Current content of the exported field declared at `index`.
    fn field(&self, index: usize) -> Option<FieldValue>;

    /// Overwrite the exported field declared at `index`.
    ///
    /// The value is handed back when its shape or kind does not fit the field.
    fn set_field(&mut self, index: usize, value: FieldValue) -> Result<(), FieldValue>;
}

/// Compile-time description of a record type.
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
    pub type_name: &'static str,
    pub layout: RecordLayout,
}

impl RecordDescriptor {
    pub fn named(type_name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            type_name,
            layout: RecordLayout::Named(fields),
        }
    }

    pub fn new(type_name: &'static str, layout: RecordLayout) -> Self {
        Self { type_name, layout }
    }
}

/// Shape of the type behind a descriptor. Only `Named` is a record.
#[derive(Debug, Clone)]
pub enum RecordLayout {
    Named(Vec<FieldSpec>),
    Tuple,
    Unit,
    Enum,
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLayout::Named(_) => f.write_str("struct"),
            RecordLayout::Tuple => f.write_str("tuple struct"),
            RecordLayout::Unit => f.write_str("unit struct"),
            RecordLayout::Enum => f.write_str("enum"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Bound from query parameters.
    Exported,
    /// Never read from the query; always copied from the scanned default.
    Internal,
}

/// Element type of a field, as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Primitive(ElementKind),
    Unsupported(UnsupportedKind),
}

/// Declared shape of a field: the wrapper around its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar(TypeShape),
    Optional(TypeShape),
    Repeated(TypeShape),
    Fixed(TypeShape, usize),
}

impl FieldShape {
    pub fn element(self) -> TypeShape {
        match self {
            FieldShape::Scalar(t)
            | FieldShape::Optional(t)
            | FieldShape::Repeated(t)
            | FieldShape::Fixed(t, _) => t,
        }
    }
}

/// One row of a record's descriptor table.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Declaration position among all fields of the record.
    pub index: usize,
    pub visibility: Visibility,
    /// Parameter name override, from `#[param(rename = "...")]`.
    pub rename: Option<&'static str>,
    pub shape: FieldShape,
}

impl FieldSpec {
    pub fn exported(name: &'static str, index: usize, shape: FieldShape) -> Self {
        Self {
            name,
            index,
            visibility: Visibility::Exported,
            rename: None,
            shape,
        }
    }

    pub fn internal(name: &'static str, index: usize, shape: FieldShape) -> Self {
        Self {
            name,
            index,
            visibility: Visibility::Internal,
            rename: None,
            shape,
        }
    }

    pub fn renamed(mut self, parameter: &'static str) -> Self {
        self.rename = Some(parameter);
        self
    }

    /// Name this field is addressed by in the query.
    pub fn parameter_name(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }
}
