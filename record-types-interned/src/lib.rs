#![deny(missing_debug_implementations)]

//! Interned structural record types.
//!
//! [`RecordInterner`] turns an ordered list of named, typed fields into a
//! canonical [`RecordDescriptor`]. Field sets that agree on names, types and
//! order resolve to the same `Arc`; any difference yields a distinct
//! descriptor. Identifiers are derived from a SHA-256 hash of the field set's
//! [`Fingerprint`], and a hash collision between different field sets is
//! reported as [`InternError::Collision`] instead of being merged.
//!
//! # Example
//! ```
//! use record_types_interned::{FieldSetDefinition, RecordInterner, TypeRef};
//! use std::sync::Arc;
//!
//! let interner = RecordInterner::new();
//! let point = || {
//!   FieldSetDefinition::new()
//!     .field("x", TypeRef::f64())
//!     .field("y", TypeRef::f64())
//! };
//! let a = interner.get_or_create(point()).unwrap();
//! let b = interner.get_or_create(point()).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! assert!(a.identifier().as_str().starts_with("Record_"));
//! ```

mod descriptor;
mod display;
mod error;
mod field;
mod fingerprint;
mod ids;
mod kind;
mod options;
mod store;
mod value;

pub use descriptor::RecordDescriptor;
pub use display::RecordDisplay;
pub use error::InternError;
pub use error::RecordError;
pub use field::FieldSetDefinition;
pub use field::FieldSpec;
pub use field::POSITIONAL_FIELD_PREFIX;
pub use fingerprint::compute_fingerprint;
pub use fingerprint::derive_identifier;
pub use fingerprint::sha256_digest;
pub use fingerprint::Digest;
pub use fingerprint::DigestFn;
pub use ids::Fingerprint;
pub use ids::Identifier;
pub use kind::PrimitiveKind;
pub use kind::TypeRef;
pub use options::InternerOptions;
pub use options::DEFAULT_IDENTIFIER_PREFIX;
pub use options::MAX_DIGEST_BYTES;
pub use options::MIN_DIGEST_BYTES;
pub use store::InternerStats;
pub use store::RecordInterner;
pub use value::instantiate;
pub use value::Record;
pub use value::Value;
