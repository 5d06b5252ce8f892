use crate::kind::{ElementKind, MaxValues, UnsupportedKind};
use crate::record::RecordLayout;

/// Why a record type cannot produce a [`Signature`](crate::Signature).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("`{type_name}` is a {layout}, not a struct with named fields")]
    NotARecord {
        type_name: &'static str,
        layout: RecordLayout,
    },

    #[error("field '{field}' has unsupported kind: {kind}")]
    UnsupportedFieldKind {
        field: &'static str,
        kind: UnsupportedKind,
    },

    #[error("fields '{first}' and '{second}' both bind parameter '{name}'")]
    DuplicateParameter {
        name: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

/// A single raw string could not be converted to the field's element kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("invalid boolean {raw:?} (expected true/yes/1 or false/no/0)")]
    InvalidBoolean { raw: String },

    #[error("invalid {kind} integer {raw:?}")]
    InvalidInteger { raw: String, kind: ElementKind },

    #[error("invalid {kind} float {raw:?}")]
    InvalidFloat { raw: String, kind: ElementKind },
}

/// The raw query string is not valid `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedQuery {
    #[error("invalid percent-escape in {segment:?}")]
    InvalidEscape { segment: String },

    #[error("invalid semicolon separator in {segment:?}")]
    Semicolon { segment: String },

    #[error("percent-decoded {segment:?} is not valid UTF-8")]
    InvalidUtf8 { segment: String },
}

/// Why decoding query values onto a record failed.
///
/// A failed decode never leaves the target partially written.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("signature was scanned from `{expected}` but the target is `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing required parameter '{name}'")]
    MissingRequiredParameter { name: String },

    #[error("parameter '{name}' takes at least {min} values, got {found}")]
    TooFewValues {
        name: String,
        min: usize,
        found: usize,
    },

    #[error("parameter '{name}' takes at most {max} values, got {found}")]
    TooManyValues {
        name: String,
        max: MaxValues,
        found: usize,
    },

    #[error("parameter '{name}': {source}")]
    ValueParseError {
        name: String,
        #[source]
        source: CoercionError,
    },

    #[error("malformed query: {0}")]
    MalformedInput(#[from] MalformedQuery),

    #[error("record rejected the decoded value for field '{field}'")]
    FieldShapeMismatch { field: &'static str },
}

impl DecodeError {
    /// Parameter this error is about, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            DecodeError::MissingRequiredParameter { name }
            | DecodeError::TooFewValues { name, .. }
            | DecodeError::TooManyValues { name, .. }
            | DecodeError::ValueParseError { name, .. } => Some(name),
            _ => None,
        }
    }
}
