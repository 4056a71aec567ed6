use crate::ids::Fingerprint;
use crate::ids::Identifier;
use thiserror::Error;

/// Reasons [`RecordInterner::get_or_create`](crate::RecordInterner::get_or_create)
/// refuses a definition. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternError {
  #[error("field set definition has no fields")]
  EmptyDefinition,
  #[error("field {index} has an empty name")]
  InvalidFieldName { index: usize },
  #[error("field {index} repeats the name `{name}`")]
  DuplicateFieldName { name: String, index: usize },
  /// Two structurally different definitions hashed to the same identifier.
  /// Widen `digest_bytes` or rename a field; never fall back to another name.
  #[error("identifier {identifier} is taken by `{existing}`, refusing to reuse it for `{requested}`")]
  Collision {
    identifier: Identifier,
    existing: Fingerprint,
    requested: Fingerprint,
  },
  #[error("field `{field}` has unresolvable type `{ty}`")]
  UnknownFieldType { field: String, ty: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
  #[error("record {record} has no field `{field}`")]
  UnknownField { record: Identifier, field: String },
  #[error("field `{field}` expects a value of type `{expected}`")]
  TypeMismatch { field: String, expected: String },
}
