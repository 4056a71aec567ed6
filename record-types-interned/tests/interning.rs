use std::sync::Arc;

use record_types_interned::{
  compute_fingerprint, FieldSetDefinition, FieldSpec, InternError, RecordInterner, TypeRef,
  Value,
};

fn scenario(order: &[&str]) -> FieldSetDefinition {
  order
    .iter()
    .map(|name| match *name {
      "foo" => FieldSpec::new("foo", TypeRef::list(TypeRef::string())),
      "bar" => FieldSpec::new("bar", TypeRef::i32()),
      "baz" => FieldSpec::new(
        "baz",
        TypeRef::tuple([
          TypeRef::i32(),
          TypeRef::optional(TypeRef::i32()),
          TypeRef::string(),
        ]),
      ),
      other => panic!("unexpected field {other}"),
    })
    .collect()
}

#[test]
fn same_definition_returns_same_descriptor() {
  let interner = RecordInterner::new();
  let first = interner.get_or_create(scenario(&["foo", "bar", "baz"])).unwrap();
  let second = interner.get_or_create(scenario(&["foo", "bar", "baz"])).unwrap();
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(interner.len(), 1);
}

#[test]
fn reordering_fields_yields_distinct_descriptor() {
  let interner = RecordInterner::new();
  let original = interner.get_or_create(scenario(&["foo", "bar", "baz"])).unwrap();
  let reordered = interner.get_or_create(scenario(&["foo", "baz", "bar"])).unwrap();
  assert!(!Arc::ptr_eq(&original, &reordered));
  assert_ne!(original.identifier(), reordered.identifier());
  assert_eq!(interner.len(), 2);
}

#[test]
fn swapping_differently_typed_fields_is_order_sensitive() {
  let interner = RecordInterner::new();
  let ab = interner
    .get_or_create(FieldSetDefinition::new().field("a", TypeRef::i32()).field("b", TypeRef::string()))
    .unwrap();
  let ba = interner
    .get_or_create(FieldSetDefinition::new().field("b", TypeRef::string()).field("a", TypeRef::i32()))
    .unwrap();
  assert!(!Arc::ptr_eq(&ab, &ba));
}

#[test]
fn names_and_types_both_participate_in_identity() {
  let interner = RecordInterner::new();
  let base = interner
    .get_or_create(FieldSetDefinition::new().field("a", TypeRef::i32()))
    .unwrap();
  let renamed = interner
    .get_or_create(FieldSetDefinition::new().field("b", TypeRef::i32()))
    .unwrap();
  let retyped = interner
    .get_or_create(FieldSetDefinition::new().field("a", TypeRef::i64()))
    .unwrap();
  let extended = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("a", TypeRef::i32())
        .field("b", TypeRef::i32()),
    )
    .unwrap();
  let transient = interner
    .get_or_create(FieldSetDefinition::new().transient_field("a", TypeRef::i32()))
    .unwrap();
  for other in [&renamed, &retyped, &extended, &transient] {
    assert!(!Arc::ptr_eq(&base, other));
  }
  assert_eq!(interner.len(), 5);
}

#[test]
fn descriptor_exposes_fields_in_order() {
  let interner = RecordInterner::new();
  let descriptor = interner.get_or_create(scenario(&["foo", "bar", "baz"])).unwrap();
  let names: Vec<_> = descriptor.fields().iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["foo", "bar", "baz"]);
  assert_eq!(descriptor.field("bar").unwrap().ty, TypeRef::i32());
  assert_eq!(descriptor.field_index("baz"), Some(2));
  assert_eq!(descriptor.field("missing"), None);
  assert_eq!(
    compute_fingerprint(descriptor.fields()),
    *descriptor.fingerprint()
  );
  assert_eq!(
    descriptor.display().to_string(),
    "{ foo: List<string>, bar: i32, baz: Tuple<i32, Option<i32>, string> }"
  );
}

#[test]
fn identifier_is_prefixed_fixed_width_hex() {
  let interner = RecordInterner::new();
  let descriptor = interner.get_or_create(scenario(&["foo", "bar", "baz"])).unwrap();
  let id = descriptor.identifier().as_str();
  let hex = id.strip_prefix("Record_").unwrap();
  assert_eq!(hex.len(), 64);
  assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  assert_eq!(descriptor.to_string(), id);
}

#[test]
fn identifiers_are_stable_across_interners() {
  let a = RecordInterner::new();
  let b = RecordInterner::new();
  let from_a = a.get_or_create(scenario(&["bar", "foo"])).unwrap();
  let from_b = b.get_or_create(scenario(&["bar", "foo"])).unwrap();
  assert_eq!(from_a.identifier(), from_b.identifier());
  assert!(!Arc::ptr_eq(&from_a, &from_b));
}

#[test]
fn positional_form_assigns_item_names() {
  let interner = RecordInterner::new();
  let positional = interner
    .get_or_create_positional([TypeRef::i32(), TypeRef::string()])
    .unwrap();
  let named = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("Item0", TypeRef::i32())
        .field("Item1", TypeRef::string()),
    )
    .unwrap();
  assert!(Arc::ptr_eq(&positional, &named));
}

#[test]
fn empty_definition_is_rejected() {
  let interner = RecordInterner::new();
  assert_eq!(
    interner.get_or_create(FieldSetDefinition::new()).unwrap_err(),
    InternError::EmptyDefinition
  );
  let no_types: [TypeRef; 0] = [];
  assert_eq!(
    interner.get_or_create_positional(no_types).unwrap_err(),
    InternError::EmptyDefinition
  );
  assert!(interner.is_empty());
}

#[test]
fn empty_field_name_is_rejected() {
  let interner = RecordInterner::new();
  let err = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("ok", TypeRef::bool())
        .field("", TypeRef::i32()),
    )
    .unwrap_err();
  assert_eq!(err, InternError::InvalidFieldName { index: 1 });
  assert!(interner.is_empty());
}

#[test]
fn repeated_field_names_are_rejected() {
  let interner = RecordInterner::new();
  let err = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("a", TypeRef::i32())
        .field("b", TypeRef::bool())
        .field("a", TypeRef::string()),
    )
    .unwrap_err();
  assert_eq!(
    err,
    InternError::DuplicateFieldName {
      name: "a".to_string(),
      index: 2,
    }
  );
  assert!(interner.is_empty());

  // Same name with a different serialization flag is still a repeat.
  let err = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("x", TypeRef::i32())
        .transient_field("x", TypeRef::i32()),
    )
    .unwrap_err();
  assert!(matches!(err, InternError::DuplicateFieldName { index: 1, .. }));

  // Names only need to be unique within one record.
  let inner = interner
    .get_or_create(FieldSetDefinition::new().field("a", TypeRef::i32()))
    .unwrap();
  let outer = interner
    .get_or_create(
      FieldSetDefinition::new()
        .field("a", &inner)
        .field("b", TypeRef::string()),
    )
    .unwrap();
  let mut record = outer.instantiate();
  record.set("b", "reachable").unwrap();
  assert_eq!(record.get("b").unwrap(), &Value::from("reachable"));
}

#[test]
fn records_from_another_interner_are_unknown_types() {
  let home = RecordInterner::new();
  let foreign = RecordInterner::new();
  let point = foreign
    .get_or_create(FieldSetDefinition::new().field("x", TypeRef::f64()))
    .unwrap();

  let err = home
    .get_or_create(FieldSetDefinition::new().field("nested", TypeRef::list(&point)))
    .unwrap_err();
  assert_eq!(
    err,
    InternError::UnknownFieldType {
      field: "nested".to_string(),
      ty: point.identifier().to_string(),
    }
  );
  assert!(home.is_empty());
}

#[test]
fn empty_tuple_is_an_unknown_type() {
  let interner = RecordInterner::new();
  let empty: [TypeRef; 0] = [];
  let err = interner
    .get_or_create(FieldSetDefinition::new().field("unit", TypeRef::tuple(empty)))
    .unwrap_err();
  assert!(matches!(err, InternError::UnknownFieldType { ref field, ref ty } if field == "unit" && ty == "Tuple<>"));
}

#[test]
fn registry_lookup_and_stats() {
  let interner = RecordInterner::new();
  let a = interner.get_or_create(scenario(&["foo"])).unwrap();
  let b = interner.get_or_create(scenario(&["bar"])).unwrap();
  let _ = interner.get_or_create(scenario(&["foo"])).unwrap();

  assert!(interner.contains(a.identifier()));
  assert!(Arc::ptr_eq(&interner.get(b.identifier()).unwrap(), &b));

  let listed = interner.descriptors();
  assert_eq!(listed.len(), 2);
  assert!(listed[0].identifier() < listed[1].identifier());

  let stats = interner.stats();
  assert_eq!(stats.misses, 2);
  assert_eq!(stats.hits, 1);
  assert_eq!(stats.collisions, 0);
  assert!((stats.hit_rate() - 1.0 / 3.0).abs() < f64::EPSILON);
}
