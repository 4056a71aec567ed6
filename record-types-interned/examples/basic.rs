use std::sync::Arc;

use record_types_interned::{FieldSetDefinition, InternError, RecordInterner, TypeRef};

fn main() -> Result<(), InternError> {
  let interner = RecordInterner::new();

  // `{ x: f64, y: f64 }`
  let point = interner.get_or_create(
    FieldSetDefinition::new()
      .field("x", TypeRef::f64())
      .field("y", TypeRef::f64()),
  )?;

  // Nested records reference previously interned descriptors.
  let shape = interner.get_or_create(
    FieldSetDefinition::new()
      .field("name", TypeRef::string())
      .field("origin", &point)
      .field("vertices", TypeRef::list(&point)),
  )?;

  let same = interner.get_or_create(
    FieldSetDefinition::new()
      .field("x", TypeRef::f64())
      .field("y", TypeRef::f64()),
  )?;
  assert!(Arc::ptr_eq(&point, &same));

  // Field order is part of identity.
  let swapped = interner.get_or_create(
    FieldSetDefinition::new()
      .field("y", TypeRef::f64())
      .field("x", TypeRef::f64()),
  )?;
  assert!(!Arc::ptr_eq(&point, &swapped));

  let pair = interner.get_or_create_positional([TypeRef::i32(), TypeRef::string()])?;

  for descriptor in [&point, &shape, &swapped, &pair] {
    println!("{} = {}", descriptor.identifier(), descriptor.display());
  }

  let mut instance = shape.instantiate();
  if let Err(err) = instance.set("name", "triangle") {
    eprintln!("{err}");
  }
  println!("{instance:#?}");
  println!("{:?}", interner.stats());
  Ok(())
}
