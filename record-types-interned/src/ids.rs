use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

macro_rules! string_newtype {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub(crate) fn new(value: String) -> Self {
        Self(value)
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }

      pub fn len(&self) -> usize {
        self.0.len()
      }

      pub fn is_empty(&self) -> bool {
        self.0.is_empty()
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }
  };
}

string_newtype!(
  /// Canonical encoding of a field set's names, types and order.
  Fingerprint
);
string_newtype!(
  /// Fixed-width, hash-derived registry key for a record descriptor.
  Identifier
);

/// Distinguishes interners from each other so descriptors created by one
/// interner are never accepted as field types by another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub(crate) struct InternerId(u64);

static NEXT_INTERNER_ID: AtomicU64 = AtomicU64::new(0);

impl InternerId {
  pub(crate) fn fresh() -> Self {
    Self(NEXT_INTERNER_ID.fetch_add(1, Ordering::Relaxed))
  }
}
