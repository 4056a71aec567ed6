use crate::descriptor::RecordDescriptor;
use crate::error::InternError;
use crate::field::FieldSetDefinition;
use crate::fingerprint::compute_fingerprint;
use crate::fingerprint::derive_identifier_with;
use crate::fingerprint::sha256_digest;
use crate::fingerprint::DigestFn;
use crate::ids::Fingerprint;
use crate::ids::Identifier;
use crate::ids::InternerId;
use crate::kind::TypeRef;
use crate::options::InternerOptions;
use ahash::AHashSet;
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::instrument;

const HASH_KEY1: u64 = 0x9e37_79b9_7f4a_7c15;
const HASH_KEY2: u64 = 0xc2b2_ae3d_27d4_eb4f;
const HASH_KEY3: u64 = 0x1656_67b1_9e37_79f9;
const HASH_KEY4: u64 = 0x85eb_ca6b_c8f6_9b07;

const RECORD_DOMAIN: u64 = 0x7265_636f;

fn stable_state(domain: u64) -> RandomState {
  RandomState::with_seeds(
    HASH_KEY1 ^ domain,
    HASH_KEY2.wrapping_add(domain),
    HASH_KEY3 ^ (domain << 1),
    HASH_KEY4.wrapping_sub(domain),
  )
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternerStats {
  /// Requests answered with an existing descriptor.
  pub hits: u64,
  /// Requests that synthesized a new descriptor.
  pub misses: u64,
  pub collisions: u64,
}

impl InternerStats {
  pub fn hit_rate(&self) -> f64 {
    let total = self.hits + self.misses;
    if total == 0 {
      0.0
    } else {
      self.hits as f64 / total as f64
    }
  }
}

#[derive(Debug, Default)]
struct Counters {
  hits: AtomicU64,
  misses: AtomicU64,
  collisions: AtomicU64,
}

/// Thread-safe registry of structural record types.
///
/// Equal field sets always resolve to the same `Arc<RecordDescriptor>`. The
/// registry only grows; descriptors live as long as the interner (and any
/// record or descriptor still referencing them).
///
/// Fingerprinting, hashing and validation happen outside any lock. Only the
/// lookup-or-insert step takes the owning shard's lock, so a novel field set
/// is synthesized exactly once even when callers race on it.
pub struct RecordInterner {
  id: InternerId,
  registry: DashMap<Identifier, Arc<RecordDescriptor>, RandomState>,
  digest_fn: DigestFn,
  options: InternerOptions,
  counters: Counters,
}

impl fmt::Debug for RecordInterner {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RecordInterner")
      .field("id", &self.id)
      .field("options", &self.options)
      .field("len", &self.registry.len())
      .field("stats", &self.stats())
      .finish_non_exhaustive()
  }
}

impl RecordInterner {
  pub fn new() -> Arc<Self> {
    Self::with_options(InternerOptions::default())
  }

  pub fn with_options(options: InternerOptions) -> Arc<Self> {
    Self::with_options_and_digest(options, sha256_digest)
  }

  #[doc(hidden)]
  pub fn with_options_and_digest(options: InternerOptions, digest_fn: DigestFn) -> Arc<Self> {
    Arc::new(Self {
      id: InternerId::fresh(),
      registry: DashMap::with_hasher(stable_state(RECORD_DOMAIN)),
      digest_fn,
      options,
      counters: Counters::default(),
    })
  }

  pub fn options(&self) -> &InternerOptions {
    &self.options
  }

  /// The identifier this interner derives for `fingerprint`.
  pub fn identifier_for(&self, fingerprint: &Fingerprint) -> Identifier {
    derive_identifier_with(fingerprint, &self.options, self.digest_fn)
  }

  /// Return the descriptor for `def`, creating and registering it on first
  /// use.
  #[instrument(level = "trace", skip_all, fields(field_count = def.len()))]
  pub fn get_or_create(
    &self,
    def: FieldSetDefinition,
  ) -> Result<Arc<RecordDescriptor>, InternError> {
    self.validate(&def)?;
    let fingerprint = compute_fingerprint(&def.fields);
    let identifier = self.identifier_for(&fingerprint);

    if let Some(existing) = self.registry.get(&identifier) {
      return self.reuse(&identifier, existing.value(), &fingerprint);
    }

    match self.registry.entry(identifier) {
      // Another caller won the race between the read and the entry lock.
      Entry::Occupied(entry) => self.reuse(entry.key(), entry.get(), &fingerprint),
      Entry::Vacant(entry) => {
        let descriptor = Arc::new(RecordDescriptor::new(
          entry.key().clone(),
          fingerprint,
          def.fields.into_boxed_slice(),
          self.id,
        ));
        entry.insert(Arc::clone(&descriptor));
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
          target: "record_types::interner",
          cache_hit = false,
          identifier = %descriptor.identifier()
        );
        Ok(descriptor)
      }
    }
  }

  /// Intern an unnamed field list, naming the fields `Item0`, `Item1`, ...
  pub fn get_or_create_positional<I>(&self, types: I) -> Result<Arc<RecordDescriptor>, InternError>
  where
    I: IntoIterator,
    I::Item: Into<TypeRef>,
  {
    self.get_or_create(FieldSetDefinition::positional(types))
  }

  pub fn get(&self, identifier: &Identifier) -> Option<Arc<RecordDescriptor>> {
    self
      .registry
      .get(identifier)
      .map(|entry| Arc::clone(entry.value()))
  }

  pub fn contains(&self, identifier: &Identifier) -> bool {
    self.registry.contains_key(identifier)
  }

  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.is_empty()
  }

  /// Every registered descriptor, sorted by identifier.
  pub fn descriptors(&self) -> Vec<Arc<RecordDescriptor>> {
    let mut descriptors: Vec<_> = self
      .registry
      .iter()
      .map(|entry| Arc::clone(entry.value()))
      .collect();
    descriptors.sort_by(|a, b| a.identifier().cmp(b.identifier()));
    descriptors
  }

  pub fn stats(&self) -> InternerStats {
    InternerStats {
      hits: self.counters.hits.load(Ordering::Relaxed),
      misses: self.counters.misses.load(Ordering::Relaxed),
      collisions: self.counters.collisions.load(Ordering::Relaxed),
    }
  }

  fn validate(&self, def: &FieldSetDefinition) -> Result<(), InternError> {
    if def.is_empty() {
      return Err(InternError::EmptyDefinition);
    }
    let mut seen = AHashSet::with_capacity(def.len());
    for (index, field) in def.iter().enumerate() {
      if field.name.is_empty() {
        return Err(InternError::InvalidFieldName { index });
      }
      if !seen.insert(field.name.as_str()) {
        return Err(InternError::DuplicateFieldName {
          name: field.name.clone(),
          index,
        });
      }
      if let Some(ty) = field.ty.unresolved(self.id) {
        return Err(InternError::UnknownFieldType {
          field: field.name.clone(),
          ty: ty.to_string(),
        });
      }
    }
    Ok(())
  }

  fn reuse(
    &self,
    identifier: &Identifier,
    existing: &Arc<RecordDescriptor>,
    fingerprint: &Fingerprint,
  ) -> Result<Arc<RecordDescriptor>, InternError> {
    debug_assert_eq!(&compute_fingerprint(existing.fields()), existing.fingerprint());
    if existing.fingerprint() == fingerprint {
      self.counters.hits.fetch_add(1, Ordering::Relaxed);
      tracing::trace!(target: "record_types::interner", cache_hit = true, %identifier);
      return Ok(Arc::clone(existing));
    }

    self.counters.collisions.fetch_add(1, Ordering::Relaxed);
    tracing::warn!(
      target: "record_types::interner",
      %identifier,
      existing = %existing.fingerprint(),
      requested = %fingerprint,
      "record identifier collision"
    );
    Err(InternError::Collision {
      identifier: identifier.clone(),
      existing: existing.fingerprint().clone(),
      requested: fingerprint.clone(),
    })
  }
}
