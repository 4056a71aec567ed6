use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_IDENTIFIER_PREFIX: &str = "Record_";

/// Width of a SHA-256 digest in bytes.
pub const MAX_DIGEST_BYTES: usize = 32;
pub const MIN_DIGEST_BYTES: usize = 4;

/// Options that control how identifiers are derived from fingerprints.
///
/// Both knobs change every identifier the interner hands out, so they must be
/// fixed for the lifetime of an interner. Widening the digest is the remedy
/// for a reported collision.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InternerOptions {
  /// Constant tag prepended to every identifier so they can share a namespace
  /// with names from other domains.
  pub identifier_prefix: String,
  /// Number of digest bytes rendered into the identifier. Clamped to
  /// `MIN_DIGEST_BYTES..=MAX_DIGEST_BYTES`.
  pub digest_bytes: usize,
}

impl InternerOptions {
  pub fn digest_len(&self) -> usize {
    self.digest_bytes.clamp(MIN_DIGEST_BYTES, MAX_DIGEST_BYTES)
  }
}

impl Default for InternerOptions {
  fn default() -> Self {
    Self {
      identifier_prefix: DEFAULT_IDENTIFIER_PREFIX.to_string(),
      digest_bytes: MAX_DIGEST_BYTES,
    }
  }
}
