use std::collections::HashSet;
use std::sync::Arc;

use record_types_interned::{FieldSetDefinition, RecordInterner, TypeRef};

const COUNT: usize = 10_000;

fn indexed(idx: usize) -> FieldSetDefinition {
  FieldSetDefinition::new()
    .field("shared", TypeRef::string())
    .field(format!("field_{idx}"), TypeRef::i32())
}

#[test]
fn distinct_definitions_never_collapse() {
  let interner = RecordInterner::new();
  let descriptors: Vec<_> = (0..COUNT)
    .map(|idx| interner.get_or_create(indexed(idx)).unwrap())
    .collect();

  assert_eq!(interner.len(), COUNT);
  let identifiers: HashSet<_> = descriptors
    .iter()
    .map(|descriptor| descriptor.identifier().clone())
    .collect();
  assert_eq!(identifiers.len(), COUNT);

  for (idx, descriptor) in descriptors.iter().enumerate() {
    assert_eq!(descriptor.fields()[1].name, format!("field_{idx}"));
  }

  // A second pass resolves every definition to the descriptor from the first.
  for (idx, descriptor) in descriptors.iter().enumerate() {
    let again = interner.get_or_create(indexed(idx)).unwrap();
    assert!(Arc::ptr_eq(descriptor, &again));
  }
  assert_eq!(interner.len(), COUNT);

  let stats = interner.stats();
  assert_eq!(stats.misses, COUNT as u64);
  assert_eq!(stats.hits, COUNT as u64);
}
