use crate::descriptor::RecordDescriptor;
use crate::ids::InternerId;
use crate::value::Value;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum PrimitiveKind {
  Bool,
  I32,
  I64,
  F64,
  Char,
  String,
}

impl PrimitiveKind {
  /// Stable name used when rendering fingerprints.
  pub fn name(self) -> &'static str {
    match self {
      PrimitiveKind::Bool => "bool",
      PrimitiveKind::I32 => "i32",
      PrimitiveKind::I64 => "i64",
      PrimitiveKind::F64 => "f64",
      PrimitiveKind::Char => "char",
      PrimitiveKind::String => "string",
    }
  }

  pub fn default_value(self) -> Value {
    match self {
      PrimitiveKind::Bool => Value::Bool(false),
      PrimitiveKind::I32 => Value::I32(0),
      PrimitiveKind::I64 => Value::I64(0),
      PrimitiveKind::F64 => Value::F64(0.0),
      PrimitiveKind::Char => Value::Char('\0'),
      PrimitiveKind::String => Value::String(String::new()),
    }
  }

  pub fn accepts(self, value: &Value) -> bool {
    matches!(
      (self, value),
      (PrimitiveKind::Bool, Value::Bool(_))
        | (PrimitiveKind::I32, Value::I32(_))
        | (PrimitiveKind::I64, Value::I64(_))
        | (PrimitiveKind::F64, Value::F64(_))
        | (PrimitiveKind::Char, Value::Char(_))
        | (PrimitiveKind::String, Value::String(_))
    )
  }
}

/// The declared type of a record field.
///
/// Nested records are referenced by their interned descriptor and compare by
/// pointer identity, never structurally.
#[derive(Clone, Debug)]
pub enum TypeRef {
  Primitive(PrimitiveKind),
  Record(Arc<RecordDescriptor>),
  /// Homogeneous ordered collection.
  List(Box<TypeRef>),
  /// Fixed-arity, heterogeneous container. Must have at least one element.
  Tuple(Vec<TypeRef>),
  /// Nullable wrapper; defaults to [`Value::Null`].
  Optional(Box<TypeRef>),
}

impl TypeRef {
  pub fn bool() -> Self {
    Self::Primitive(PrimitiveKind::Bool)
  }

  pub fn i32() -> Self {
    Self::Primitive(PrimitiveKind::I32)
  }

  pub fn i64() -> Self {
    Self::Primitive(PrimitiveKind::I64)
  }

  pub fn f64() -> Self {
    Self::Primitive(PrimitiveKind::F64)
  }

  pub fn char() -> Self {
    Self::Primitive(PrimitiveKind::Char)
  }

  pub fn string() -> Self {
    Self::Primitive(PrimitiveKind::String)
  }

  pub fn record(descriptor: &Arc<RecordDescriptor>) -> Self {
    Self::Record(Arc::clone(descriptor))
  }

  pub fn list(element: impl Into<TypeRef>) -> Self {
    Self::List(Box::new(element.into()))
  }

  pub fn optional(inner: impl Into<TypeRef>) -> Self {
    Self::Optional(Box::new(inner.into()))
  }

  pub fn tuple<I>(elements: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<TypeRef>,
  {
    Self::Tuple(elements.into_iter().map(Into::into).collect())
  }

  /// Whether `value` conforms to this type.
  pub fn accepts(&self, value: &Value) -> bool {
    match (self, value) {
      (TypeRef::Primitive(kind), value) => kind.accepts(value),
      (TypeRef::Record(descriptor), Value::Record(record)) => {
        Arc::ptr_eq(descriptor, record.descriptor())
      }
      (TypeRef::List(element), Value::List(items)) => {
        items.iter().all(|item| element.accepts(item))
      }
      (TypeRef::Tuple(elements), Value::Tuple(items)) => {
        elements.len() == items.len()
          && elements
            .iter()
            .zip(items)
            .all(|(element, item)| element.accepts(item))
      }
      (TypeRef::Optional(_), Value::Null) => true,
      (TypeRef::Optional(inner), value) => inner.accepts(value),
      _ => false,
    }
  }

  /// Returns the innermost part of this type that `owner` cannot resolve: a
  /// record interned elsewhere, or an empty tuple.
  pub(crate) fn unresolved(&self, owner: InternerId) -> Option<&TypeRef> {
    match self {
      TypeRef::Primitive(_) => None,
      TypeRef::Record(descriptor) => (descriptor.owner() != owner).then_some(self),
      TypeRef::List(inner) | TypeRef::Optional(inner) => inner.unresolved(owner),
      TypeRef::Tuple(elements) if elements.is_empty() => Some(self),
      TypeRef::Tuple(elements) => elements.iter().find_map(|element| element.unresolved(owner)),
    }
  }
}

impl PartialEq for TypeRef {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (TypeRef::Primitive(a), TypeRef::Primitive(b)) => a == b,
      (TypeRef::Record(a), TypeRef::Record(b)) => Arc::ptr_eq(a, b),
      (TypeRef::List(a), TypeRef::List(b)) | (TypeRef::Optional(a), TypeRef::Optional(b)) => a == b,
      (TypeRef::Tuple(a), TypeRef::Tuple(b)) => a == b,
      _ => false,
    }
  }
}

impl Eq for TypeRef {}

impl From<PrimitiveKind> for TypeRef {
  fn from(kind: PrimitiveKind) -> Self {
    Self::Primitive(kind)
  }
}

impl From<Arc<RecordDescriptor>> for TypeRef {
  fn from(descriptor: Arc<RecordDescriptor>) -> Self {
    Self::Record(descriptor)
  }
}

impl From<&Arc<RecordDescriptor>> for TypeRef {
  fn from(descriptor: &Arc<RecordDescriptor>) -> Self {
    Self::record(descriptor)
  }
}
