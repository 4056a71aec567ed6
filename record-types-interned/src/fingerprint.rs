use crate::field::FieldSpec;
use crate::ids::Fingerprint;
use crate::ids::Identifier;
use crate::options::InternerOptions;
use crate::options::MAX_DIGEST_BYTES;
use sha2::Digest as _;
use sha2::Sha256;

pub type Digest = [u8; MAX_DIGEST_BYTES];

/// Hash applied to a fingerprint's UTF-8 bytes to derive its identifier.
pub type DigestFn = fn(&[u8]) -> Digest;

pub fn sha256_digest(bytes: &[u8]) -> Digest {
  let mut out = [0u8; MAX_DIGEST_BYTES];
  out.copy_from_slice(&Sha256::digest(bytes));
  out
}

/// Encode the full structural identity of `fields`.
///
/// Each field contributes `<name byte length>:<name>:<type>;`, with a `!`
/// before the terminator for fields that do not participate in serialization.
/// The length prefix keeps the concatenation unambiguous, so two field lists
/// encode equally exactly when they agree on count, names, types, flags and
/// order. Nested records render as their identifier.
pub fn compute_fingerprint(fields: &[FieldSpec]) -> Fingerprint {
  let mut out = String::new();
  for field in fields {
    out.push_str(&field.name.len().to_string());
    out.push(':');
    out.push_str(&field.name);
    out.push(':');
    out.push_str(&field.ty.to_string());
    if !field.serializable {
      out.push('!');
    }
    out.push(';');
  }
  Fingerprint::new(out)
}

/// Derive the registry key for `fingerprint` with SHA-256.
pub fn derive_identifier(fingerprint: &Fingerprint, options: &InternerOptions) -> Identifier {
  derive_identifier_with(fingerprint, options, sha256_digest)
}

pub(crate) fn derive_identifier_with(
  fingerprint: &Fingerprint,
  options: &InternerOptions,
  digest_fn: DigestFn,
) -> Identifier {
  let digest = digest_fn(fingerprint.as_str().as_bytes());
  let width = options.digest_len();
  let mut out = String::with_capacity(options.identifier_prefix.len() + width * 2);
  out.push_str(&options.identifier_prefix);
  for byte in &digest[..width] {
    out.push_str(&format!("{byte:02x}"));
  }
  Identifier::new(out)
}
