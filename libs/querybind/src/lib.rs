//! Bind URL query parameters onto typed records.
//!
//! A record type is scanned once into a [`Signature`], which maps each
//! exported field to a parameter name, a [`Cardinality`] and an
//! [`ElementKind`]. The signature then decodes any number of query strings
//! into fresh instances of the record.
//!
//! ```ignore
//! use querybind::{Record, Signature};
//!
//! #[derive(Clone, Default, Record)]
//! pub struct Search {
//!     #[param(rename = "q")]
//!     pub query: String,
//!     pub page: Option<u32>,
//!     pub tags: Vec<String>,
//! }
//!
//! let signature = Signature::scan(&Search::default())?;
//! let mut search = Search::default();
//! querybind::decode("q=rust&tags=cli&tags=web", &signature, &mut search)?;
//! ```

// Lets the derive's `::querybind::` paths resolve inside this crate.
extern crate self as querybind;

pub mod cache;
pub mod coerce;
pub mod decode;
pub mod error;
pub mod kind;
pub mod query;
pub mod record;
pub mod signature;
pub mod value;

pub use querybind_derive::Record;

pub use cache::{AnySignature, SignatureCache};
pub use coerce::coerce;
pub use decode::{decode, decode_values};
pub use error::{CoercionError, DecodeError, MalformedQuery, ScanError};
pub use kind::{Cardinality, ElementKind, FloatWidth, IntWidth, MaxValues, UnsupportedKind};
pub use query::QueryValues;
pub use record::{
    FieldShape, FieldSpec, Record, RecordDescriptor, RecordLayout, TypeShape, Visibility,
};
pub use signature::{ParameterDescriptor, RecordType, Signature};
pub use value::{FieldValue, Primitive, Value};

/// Build the [`Signature`] of `R` from a default instance.
pub fn scan<R: Record>(record: &R) -> Result<Signature<R>, ScanError> {
    Signature::scan(record)
}
