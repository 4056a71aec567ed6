use crate::display::RecordDisplay;
use crate::field::FieldSpec;
use crate::ids::Fingerprint;
use crate::ids::Identifier;
use crate::ids::InternerId;
use crate::kind::TypeRef;
use crate::value::instantiate;
use crate::value::Record;
use std::fmt;
use std::mem;
use std::sync::Arc;

/// An interned structural record type.
///
/// Descriptors are only created by [`RecordInterner`](crate::RecordInterner)
/// and are immutable once returned. Two descriptors obtained for equal field
/// sets from the same interner are the same `Arc`, so identity checks should
/// use [`Arc::ptr_eq`].
#[derive(Debug)]
pub struct RecordDescriptor {
  identifier: Identifier,
  fingerprint: Fingerprint,
  fields: Box<[FieldSpec]>,
  owner: InternerId,
}

impl RecordDescriptor {
  pub(crate) fn new(
    identifier: Identifier,
    fingerprint: Fingerprint,
    fields: Box<[FieldSpec]>,
    owner: InternerId,
  ) -> Self {
    Self {
      identifier,
      fingerprint,
      fields,
      owner,
    }
  }

  pub fn identifier(&self) -> &Identifier {
    &self.identifier
  }

  /// The fingerprint this descriptor was interned under.
  pub fn fingerprint(&self) -> &Fingerprint {
    &self.fingerprint
  }

  pub fn fields(&self) -> &[FieldSpec] {
    &self.fields
  }

  pub fn field(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|field| field.name == name)
  }

  pub fn field_index(&self, name: &str) -> Option<usize> {
    self.fields.iter().position(|field| field.name == name)
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  /// Always `false`: empty field sets are rejected at interning time.
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// Build a default-initialized instance of this record.
  pub fn instantiate(self: &Arc<Self>) -> Record {
    instantiate(self)
  }

  pub fn display(&self) -> RecordDisplay<'_> {
    RecordDisplay::new(self)
  }

  pub(crate) fn owner(&self) -> InternerId {
    self.owner
  }
}

// Releasing the last handle to a deeply nested descriptor would otherwise drop
// the whole chain of nested `Arc`s recursively.
impl Drop for RecordDescriptor {
  fn drop(&mut self) {
    let mut pending: Vec<TypeRef> = mem::take(&mut self.fields)
      .into_vec()
      .into_iter()
      .map(|field| field.ty)
      .collect();
    while let Some(ty) = pending.pop() {
      match ty {
        TypeRef::Primitive(_) => {}
        TypeRef::Record(descriptor) => {
          if let Some(mut nested) = Arc::into_inner(descriptor) {
            pending.extend(
              mem::take(&mut nested.fields)
                .into_vec()
                .into_iter()
                .map(|field| field.ty),
            );
          }
        }
        TypeRef::List(inner) | TypeRef::Optional(inner) => pending.push(*inner),
        TypeRef::Tuple(elements) => pending.extend(elements),
      }
    }
  }
}

impl fmt::Display for RecordDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.identifier)
  }
}
