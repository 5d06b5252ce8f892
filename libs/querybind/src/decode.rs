use crate::coerce::coerce;
use crate::error::DecodeError;
use crate::kind::Cardinality;
use crate::query::QueryValues;
use crate::record::Record;
use crate::signature::{ParameterDescriptor, Signature};
use crate::value::{FieldValue, Value};

impl<R: Record> Signature<R> {
    /// Decode `values` into a new record.
    ///
    /// The result starts as the scanned default (which supplies every
    /// internal field), takes the current exported fields of `seed`, and
    /// then overwrites each parameter present in `values`. Parameters absent
    /// from `values` keep the seed's value, unless they are required.
    pub fn decode(&self, seed: &R, values: &QueryValues) -> Result<R, DecodeError> {
        let mut working = self.default_instance().clone();

        for descriptor in self.parameters().values() {
            if let Some(current) = seed.field(descriptor.field_index()) {
                store(&mut working, descriptor, current)?;
            }
        }

        for (name, descriptor) in self.parameters() {
            let raw = values.get(name).unwrap_or_default();
            if raw.is_empty() {
                if descriptor.min() > 0 {
                    return Err(DecodeError::MissingRequiredParameter { name: name.clone() });
                }
                continue;
            }

            let found = raw.len();
            if found < descriptor.min() {
                return Err(DecodeError::TooFewValues {
                    name: name.clone(),
                    min: descriptor.min(),
                    found,
                });
            }
            if !descriptor.max().admits(found) {
                return Err(DecodeError::TooManyValues {
                    name: name.clone(),
                    max: descriptor.max(),
                    found,
                });
            }

            tracing::trace!(parameter = %name, values = found, "decoding parameter");

            let mut decoded = raw
                .iter()
                .map(|r| coerce(r, descriptor.element_kind()))
                .collect::<Result<Vec<Value>, _>>()
                .map_err(|source| DecodeError::ValueParseError {
                    name: name.clone(),
                    source,
                })?;

            let value = match descriptor.cardinality() {
                Cardinality::Scalar => FieldValue::Scalar(decoded.swap_remove(0)),
                Cardinality::Optional => FieldValue::Optional(Some(decoded.swap_remove(0))),
                Cardinality::Repeated | Cardinality::Fixed(_) => FieldValue::Sequence(decoded),
            };
            store(&mut working, descriptor, value)?;
        }

        Ok(working)
    }

    /// Decode `values` onto `target`.
    ///
    /// `target` is replaced only when every parameter decodes; on error it
    /// is left exactly as it was.
    pub fn decode_into(&self, values: &QueryValues, target: &mut R) -> Result<(), DecodeError> {
        *target = self.decode(target, values)?;
        Ok(())
    }
}

fn store<R: Record>(
    record: &mut R,
    descriptor: &ParameterDescriptor,
    value: FieldValue,
) -> Result<(), DecodeError> {
    record
        .set_field(descriptor.field_index(), value)
        .map_err(|_| DecodeError::FieldShapeMismatch {
            field: descriptor.field_name(),
        })
}

/// Parse `query` and decode it onto `target`.
pub fn decode<R: Record>(
    query: &str,
    signature: &Signature<R>,
    target: &mut R,
) -> Result<(), DecodeError> {
    let values = QueryValues::parse(query)?;
    decode_values(&values, signature, target)
}

/// Decode already-parsed query values onto `target`.
pub fn decode_values<R: Record>(
    values: &QueryValues,
    signature: &Signature<R>,
    target: &mut R,
) -> Result<(), DecodeError> {
    signature.decode_into(values, target)
}
