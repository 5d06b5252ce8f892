use std::any::TypeId;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::error::ScanError;
use crate::kind::{Cardinality, ElementKind, MaxValues};
use crate::record::{FieldShape, Record, RecordLayout, TypeShape, Visibility};

/// Identity of the record type a signature was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordType {
    #[serde(skip)]
    pub id: TypeId,
    pub name: &'static str,
}

impl RecordType {
    pub fn of<R: 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<R>(),
            name,
        }
    }
}

/// How one exported field is bound from the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    field_name: &'static str,
    field_index: usize,
    cardinality: Cardinality,
    element_kind: ElementKind,
    min: usize,
    max: MaxValues,
}

impl ParameterDescriptor {
    pub fn new(
        field_name: &'static str,
        field_index: usize,
        cardinality: Cardinality,
        element_kind: ElementKind,
    ) -> Self {
        Self {
            field_name,
            field_index,
            cardinality,
            element_kind,
            min: cardinality.min(),
            max: cardinality.max(),
        }
    }

    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn element_kind(&self) -> ElementKind {
        self.element_kind
    }

    /// Inclusive lower bound on the number of raw values.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Inclusive upper bound on the number of raw values.
    pub fn max(&self) -> MaxValues {
        self.max
    }
}

/// The decoding schema of one record type.
///
/// Built once by [`Signature::scan`], then shared read-only by any number
/// of decode calls.
#[derive(Debug, Clone, Serialize)]
pub struct Signature<R> {
    record_type: RecordType,
    #[serde(skip)]
    default_instance: R,
    parameters: IndexMap<String, ParameterDescriptor>,
}

impl<R: Record> Signature<R> {
    /// Build the signature of `R`, capturing `record` as the baseline that
    /// every decode starts from.
    ///
    /// Fields that are not exported are skipped. An exported field whose
    /// element kind cannot be bound fails the whole scan.
    pub fn scan(record: &R) -> Result<Self, ScanError> {
        let descriptor = R::descriptor();
        let fields = match descriptor.layout {
            RecordLayout::Named(fields) => fields,
            layout => {
                return Err(ScanError::NotARecord {
                    type_name: descriptor.type_name,
                    layout,
                });
            }
        };

        let mut parameters: IndexMap<String, ParameterDescriptor> = IndexMap::new();
        for field in fields
            .iter()
            .filter(|f| f.visibility == Visibility::Exported)
        {
            let element_kind = match field.shape.element() {
                TypeShape::Primitive(kind) => kind,
                TypeShape::Unsupported(kind) => {
                    return Err(ScanError::UnsupportedFieldKind {
                        field: field.name,
                        kind,
                    });
                }
            };
            let cardinality = match field.shape {
                FieldShape::Scalar(_) => Cardinality::Scalar,
                FieldShape::Optional(_) => Cardinality::Optional,
                FieldShape::Repeated(_) => Cardinality::Repeated,
                FieldShape::Fixed(_, n) => Cardinality::Fixed(n),
            };

            let name = field.parameter_name();
            match parameters.entry(name.to_string()) {
                Entry::Occupied(existing) => {
                    return Err(ScanError::DuplicateParameter {
                        name,
                        first: existing.get().field_name,
                        second: field.name,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(ParameterDescriptor::new(
                        field.name,
                        field.index,
                        cardinality,
                        element_kind,
                    ));
                }
            }
        }

        tracing::debug!(
            record = descriptor.type_name,
            parameters = parameters.len(),
            "scanned record signature"
        );

        Ok(Self {
            record_type: RecordType::of::<R>(descriptor.type_name),
            default_instance: record.clone(),
            parameters,
        })
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Snapshot taken at scan time. Internal fields of every decoded record
    /// come from here.
    pub fn default_instance(&self) -> &R {
        &self.default_instance
    }

    pub fn parameters(&self) -> &IndexMap<String, ParameterDescriptor> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.get(name)
    }
}
