use crate::kind::{ElementKind, FloatWidth, IntWidth};

/// A single decoded primitive.
///
/// One variant per supported Rust primitive, so that a value can be moved
/// into a typed field without loss.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ElementKind {
        match self {
            Value::Bool(_) => ElementKind::Bool,
            Value::I8(_) => ElementKind::Int(IntWidth::W8),
            Value::I16(_) => ElementKind::Int(IntWidth::W16),
            Value::I32(_) => ElementKind::Int(IntWidth::W32),
            Value::I64(_) => ElementKind::Int(IntWidth::W64),
            Value::Isize(_) => ElementKind::Int(IntWidth::Size),
            Value::U8(_) => ElementKind::Uint(IntWidth::W8),
            Value::U16(_) => ElementKind::Uint(IntWidth::W16),
            Value::U32(_) => ElementKind::Uint(IntWidth::W32),
            Value::U64(_) => ElementKind::Uint(IntWidth::W64),
            Value::Usize(_) => ElementKind::Uint(IntWidth::Size),
            Value::F32(_) => ElementKind::Float(FloatWidth::W32),
            Value::F64(_) => ElementKind::Float(FloatWidth::W64),
            Value::Str(_) => ElementKind::Str,
        }
    }
}

/// A Rust type that can be the element of a bindable field.
///
/// Implemented for `bool`, every integer and float primitive, and `String`.
pub trait Primitive: Sized + Clone {
    const KIND: ElementKind;

    fn into_value(self) -> Value;

    /// Hands the value back if it holds a different kind.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident, $kind:expr;)*) => {
        $(
            impl Primitive for $ty {
                const KIND: ElementKind = $kind;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool, ElementKind::Bool;
    i8 => I8, ElementKind::Int(IntWidth::W8);
    i16 => I16, ElementKind::Int(IntWidth::W16);
    i32 => I32, ElementKind::Int(IntWidth::W32);
    i64 => I64, ElementKind::Int(IntWidth::W64);
    isize => Isize, ElementKind::Int(IntWidth::Size);
    u8 => U8, ElementKind::Uint(IntWidth::W8);
    u16 => U16, ElementKind::Uint(IntWidth::W16);
    u32 => U32, ElementKind::Uint(IntWidth::W32);
    u64 => U64, ElementKind::Uint(IntWidth::W64);
    usize => Usize, ElementKind::Uint(IntWidth::Size);
    f32 => F32, ElementKind::Float(FloatWidth::W32);
    f64 => F64, ElementKind::Float(FloatWidth::W64);
    String => Str, ElementKind::Str;
}

/// Shaped content of one record field, as read from or written to a
/// [`Record`](crate::Record).
///
/// Fixed-size arrays and `Vec`s both travel as `Sequence`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Optional(Option<Value>),
    Sequence(Vec<Value>),
}

impl FieldValue {
    pub fn from_scalar<T: Primitive>(value: &T) -> Self {
        FieldValue::Scalar(value.clone().into_value())
    }

    pub fn from_optional<T: Primitive>(value: &Option<T>) -> Self {
        FieldValue::Optional(value.clone().map(T::into_value))
    }

    pub fn from_sequence<T: Primitive>(values: &[T]) -> Self {
        FieldValue::Sequence(values.iter().cloned().map(T::into_value).collect())
    }

    pub fn into_scalar<T: Primitive>(self) -> Result<T, FieldValue> {
        match self {
            FieldValue::Scalar(value) => T::from_value(value).map_err(FieldValue::Scalar),
            other => Err(other),
        }
    }

    pub fn into_optional<T: Primitive>(self) -> Result<Option<T>, FieldValue> {
        match self {
            FieldValue::Optional(None) => Ok(None),
            FieldValue::Optional(Some(value)) => T::from_value(value)
                .map(Some)
                .map_err(|v| FieldValue::Optional(Some(v))),
            other => Err(other),
        }
    }

    pub fn into_vec<T: Primitive>(self) -> Result<Vec<T>, FieldValue> {
        match self {
            FieldValue::Sequence(values) => {
                if values.iter().any(|v| v.kind() != T::KIND) {
                    return Err(FieldValue::Sequence(values));
                }
                let mut out = Vec::with_capacity(values.len());
                for value in values {
                    // Kinds were checked above.
                    if let Ok(v) = T::from_value(value) {
                        out.push(v);
                    }
                }
                Ok(out)
            }
            other => Err(other),
        }
    }

    pub fn into_array<T: Primitive, const N: usize>(self) -> Result<[T; N], FieldValue> {
        match self {
            FieldValue::Sequence(values) if values.len() == N => {
                let items = FieldValue::Sequence(values).into_vec::<T>()?;
                <[T; N]>::try_from(items).map_err(|items: Vec<T>| {
                    FieldValue::Sequence(items.into_iter().map(T::into_value).collect())
                })
            }
            other => Err(other),
        }
    }
}
