use crate::kind::TypeRef;

/// Name prefix for fields created by [`FieldSetDefinition::positional`].
pub const POSITIONAL_FIELD_PREFIX: &str = "Item";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: String,
  pub ty: TypeRef,
  /// Whether the field participates in external serialization. Part of the
  /// record's identity.
  pub serializable: bool,
}

impl FieldSpec {
  pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
    Self {
      name: name.into(),
      ty: ty.into(),
      serializable: true,
    }
  }

  pub fn transient(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
    Self {
      serializable: false,
      ..Self::new(name, ty)
    }
  }
}

/// Ordered field list submitted to the interner. Order is part of identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSetDefinition {
  pub fields: Vec<FieldSpec>,
}

impl FieldSetDefinition {
  pub fn new() -> Self {
    Self { fields: Vec::new() }
  }

  /// Names each type `Item0`, `Item1`, ... in order.
  pub fn positional<I>(types: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<TypeRef>,
  {
    types
      .into_iter()
      .enumerate()
      .map(|(idx, ty)| FieldSpec::new(format!("{POSITIONAL_FIELD_PREFIX}{idx}"), ty))
      .collect()
  }

  pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
    self.fields.push(FieldSpec::new(name, ty));
    self
  }

  pub fn transient_field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
    self.fields.push(FieldSpec::transient(name, ty));
    self
  }

  pub fn push(&mut self, field: FieldSpec) {
    self.fields.push(field);
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
    self.fields.iter()
  }
}

impl FromIterator<FieldSpec> for FieldSetDefinition {
  fn from_iter<T: IntoIterator<Item = FieldSpec>>(iter: T) -> Self {
    Self {
      fields: iter.into_iter().collect(),
    }
  }
}

impl From<Vec<FieldSpec>> for FieldSetDefinition {
  fn from(fields: Vec<FieldSpec>) -> Self {
    Self { fields }
  }
}

impl<'a> IntoIterator for &'a FieldSetDefinition {
  type Item = &'a FieldSpec;
  type IntoIter = std::slice::Iter<'a, FieldSpec>;

  fn into_iter(self) -> Self::IntoIter {
    self.fields.iter()
  }
}
