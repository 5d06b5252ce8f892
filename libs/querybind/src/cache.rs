use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::error::{DecodeError, ScanError};
use crate::query::QueryValues;
use crate::record::Record;
use crate::signature::{ParameterDescriptor, RecordType, Signature};

/// Scans each record type once and hands out shared signatures.
#[derive(Default)]
pub struct SignatureCache {
    signatures: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl SignatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached signature of `R`, scanning `record` on the first request.
    ///
    /// Only the first successful scan of a type is kept: later calls get
    /// that signature back regardless of the `record` they pass.
    pub fn get_or_scan<R>(&self, record: &R) -> Result<Arc<Signature<R>>, ScanError>
    where
        R: Record + Send + Sync,
    {
        let id = TypeId::of::<R>();
        if let Some(found) = self.lookup::<R>(id) {
            return Ok(found);
        }

        tracing::debug!(record = std::any::type_name::<R>(), "signature cache miss");
        let scanned = Arc::new(Signature::scan(record)?);

        let mut signatures = self
            .signatures
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = signatures
            .entry(id)
            .or_insert_with(|| scanned.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        Ok(entry.downcast::<Signature<R>>().unwrap_or(scanned))
    }

    pub fn len(&self) -> usize {
        self.signatures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<R: Record + Send + Sync>(&self, id: TypeId) -> Option<Arc<Signature<R>>> {
        let signatures = self
            .signatures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        signatures
            .get(&id)
            .cloned()
            .and_then(|any| any.downcast::<Signature<R>>().ok())
    }
}

trait ErasedSignature: Send + Sync {
    fn parameters(&self) -> &IndexMap<String, ParameterDescriptor>;
    fn decode_any(&self, values: &QueryValues, target: &mut dyn Any) -> Result<(), DecodeError>;
}

impl<R: Record + Send + Sync> ErasedSignature for Signature<R> {
    fn parameters(&self) -> &IndexMap<String, ParameterDescriptor> {
        Signature::parameters(self)
    }

    fn decode_any(&self, values: &QueryValues, target: &mut dyn Any) -> Result<(), DecodeError> {
        match target.downcast_mut::<R>() {
            Some(target) => self.decode_into(values, target),
            None => Err(DecodeError::TypeMismatch {
                expected: self.record_type().name,
                // `dyn Any` does not expose the concrete type name.
                found: "<unknown>",
            }),
        }
    }
}

/// A signature with its record type erased, so that signatures of several
/// record types can live in one collection.
///
/// The target type is checked at decode time instead of at compile time.
#[derive(Clone)]
pub struct AnySignature {
    record_type: RecordType,
    inner: Arc<dyn ErasedSignature>,
}

impl AnySignature {
    pub fn new<R: Record + Send + Sync>(signature: Signature<R>) -> Self {
        Self {
            record_type: signature.record_type(),
            inner: Arc::new(signature),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn parameters(&self) -> &IndexMap<String, ParameterDescriptor> {
        self.inner.parameters()
    }

    /// Decode `values` onto `target`, which must be the scanned record type.
    ///
    /// A target of any other type fails with [`DecodeError::TypeMismatch`]
    /// and is not touched.
    pub fn decode_values_into(
        &self,
        values: &QueryValues,
        target: &mut dyn Any,
    ) -> Result<(), DecodeError> {
        self.inner.decode_any(values, target)
    }

    /// Typed convenience over [`AnySignature::decode_values_into`] that
    /// reports the target's type name on mismatch.
    pub fn decode_values<T: Any>(
        &self,
        values: &QueryValues,
        target: &mut T,
    ) -> Result<(), DecodeError> {
        if TypeId::of::<T>() != self.record_type.id {
            return Err(DecodeError::TypeMismatch {
                expected: self.record_type.name,
                found: std::any::type_name::<T>(),
            });
        }
        self.inner.decode_any(values, target)
    }
}

impl<R: Record + Send + Sync> From<Signature<R>> for AnySignature {
    fn from(signature: Signature<R>) -> Self {
        Self::new(signature)
    }
}
