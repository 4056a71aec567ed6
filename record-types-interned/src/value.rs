use crate::descriptor::RecordDescriptor;
use crate::error::RecordError;
use crate::field::FieldSpec;
use crate::kind::TypeRef;
use std::mem;
use std::sync::Arc;

/// A value stored in a record slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Bool(bool),
  I32(i32),
  I64(i64),
  F64(f64),
  Char(char),
  String(String),
  List(Vec<Value>),
  Tuple(Vec<Value>),
  /// Absent value of an optional field.
  Null,
  Record(Record),
}

impl Value {
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_record(&self) -> Option<&Record> {
    match self {
      Value::Record(record) => Some(record),
      _ => None,
    }
  }

  pub fn as_record_mut(&mut self) -> Option<&mut Record> {
    match self {
      Value::Record(record) => Some(record),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_tuple(&self) -> Option<&[Value]> {
    match self {
      Value::Tuple(items) => Some(items),
      _ => None,
    }
  }
}

macro_rules! value_from {
  ($ty:ty => $variant:ident) => {
    impl From<$ty> for Value {
      fn from(value: $ty) -> Self {
        Value::$variant(value)
      }
    }
  };
}

value_from!(bool => Bool);
value_from!(i32 => I32);
value_from!(i64 => I64);
value_from!(f64 => F64);
value_from!(char => Char);
value_from!(String => String);
value_from!(Record => Record);

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.to_string())
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}

/// An instance of a [`RecordDescriptor`]: one slot per field, in field order.
///
/// Dropping and comparing records walk nested values with an explicit stack.
/// `Clone` and `Debug` still recurse once per level of nesting.
#[derive(Clone, Debug)]
pub struct Record {
  descriptor: Arc<RecordDescriptor>,
  values: Vec<Value>,
}

impl Record {
  pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
    &self.descriptor
  }

  pub fn values(&self) -> &[Value] {
    &self.values
  }

  pub fn into_values(mut self) -> Vec<Value> {
    mem::take(&mut self.values)
  }

  pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &Value)> {
    self.descriptor.fields().iter().zip(self.values.iter())
  }

  pub fn get(&self, name: &str) -> Result<&Value, RecordError> {
    let idx = self.slot(name)?;
    Ok(&self.values[idx])
  }

  /// Mutable access to a slot. Unlike [`Record::set`], writes through the
  /// returned reference are not type-checked.
  pub fn get_mut(&mut self, name: &str) -> Result<&mut Value, RecordError> {
    let idx = self.slot(name)?;
    Ok(&mut self.values[idx])
  }

  /// Replace a slot's value, rejecting values that do not conform to the
  /// field's declared type.
  pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RecordError> {
    let idx = self.slot(name)?;
    let value = value.into();
    let field = &self.descriptor.fields()[idx];
    if !field.ty.accepts(&value) {
      return Err(RecordError::TypeMismatch {
        field: field.name.clone(),
        expected: field.ty.to_string(),
      });
    }
    self.values[idx] = value;
    Ok(())
  }

  fn slot(&self, name: &str) -> Result<usize, RecordError> {
    self
      .descriptor
      .field_index(name)
      .ok_or_else(|| RecordError::UnknownField {
        record: self.descriptor.identifier().clone(),
        field: name.to_string(),
      })
  }
}

impl PartialEq for Record {
  fn eq(&self, other: &Self) -> bool {
    let mut pending: Vec<(&Record, &Record)> = vec![(self, other)];
    let mut values: Vec<(&Value, &Value)> = Vec::new();
    loop {
      if let Some((a, b)) = pending.pop() {
        if !Arc::ptr_eq(&a.descriptor, &b.descriptor) || a.values.len() != b.values.len() {
          return false;
        }
        values.extend(a.values.iter().zip(&b.values));
        continue;
      }
      match values.pop() {
        Some((Value::Record(a), Value::Record(b))) => pending.push((a, b)),
        Some((Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b))) => {
          if a.len() != b.len() {
            return false;
          }
          values.extend(a.iter().zip(b));
        }
        Some((a, b)) => {
          if a != b {
            return false;
          }
        }
        None => return true,
      }
    }
  }
}

impl Drop for Record {
  fn drop(&mut self) {
    let mut pending = mem::take(&mut self.values);
    while let Some(value) = pending.pop() {
      match value {
        Value::Record(mut record) => pending.append(&mut record.values),
        Value::List(mut items) | Value::Tuple(mut items) => pending.append(&mut items),
        _ => {}
      }
    }
  }
}

#[derive(Clone, Copy)]
enum Container<'a> {
  Record(&'a Arc<RecordDescriptor>),
  Tuple(&'a [TypeRef]),
}

impl<'a> Container<'a> {
  fn slot_type(self, idx: usize) -> Option<&'a TypeRef> {
    match self {
      Container::Record(descriptor) => descriptor.fields().get(idx).map(|field| &field.ty),
      Container::Tuple(elements) => elements.get(idx),
    }
  }
}

struct Frame<'a> {
  container: Container<'a>,
  values: Vec<Value>,
}

impl<'a> Frame<'a> {
  fn new(container: Container<'a>) -> Self {
    let capacity = match container {
      Container::Record(descriptor) => descriptor.len(),
      Container::Tuple(elements) => elements.len(),
    };
    Self {
      container,
      values: Vec::with_capacity(capacity),
    }
  }

  fn into_value(self) -> Value {
    match self.container {
      Container::Record(descriptor) => Value::Record(Record {
        descriptor: Arc::clone(descriptor),
        values: self.values,
      }),
      Container::Tuple(_) => Value::Tuple(self.values),
    }
  }
}

/// Default-initialize every slot of `root`, descending into nested records
/// and tuples with an explicit stack so depth is bounded only by memory.
fn build_default(root: Container<'_>) -> Vec<Value> {
  let mut parents: Vec<Frame<'_>> = Vec::new();
  let mut current = Frame::new(root);
  loop {
    match current.container.slot_type(current.values.len()) {
      Some(TypeRef::Primitive(kind)) => current.values.push(kind.default_value()),
      Some(TypeRef::List(_)) => current.values.push(Value::List(Vec::new())),
      Some(TypeRef::Optional(_)) => current.values.push(Value::Null),
      Some(TypeRef::Record(nested)) => {
        parents.push(mem::replace(&mut current, Frame::new(Container::Record(nested))));
      }
      Some(TypeRef::Tuple(elements)) => {
        parents.push(mem::replace(&mut current, Frame::new(Container::Tuple(elements))));
      }
      None => match parents.pop() {
        Some(parent) => {
          let finished = mem::replace(&mut current, parent);
          current.values.push(finished.into_value());
        }
        None => return current.values,
      },
    }
  }
}

/// Build a default-initialized instance of `descriptor`.
///
/// Primitives start at their zero value, lists empty, optionals null, and
/// nested records and tuples are default-initialized recursively.
pub fn instantiate(descriptor: &Arc<RecordDescriptor>) -> Record {
  Record {
    descriptor: Arc::clone(descriptor),
    values: build_default(Container::Record(descriptor)),
  }
}

impl TypeRef {
  /// The value a freshly instantiated slot of this type holds.
  pub fn default_value(&self) -> Value {
    match self {
      TypeRef::Primitive(kind) => kind.default_value(),
      TypeRef::Record(descriptor) => Value::Record(instantiate(descriptor)),
      TypeRef::List(_) => Value::List(Vec::new()),
      TypeRef::Tuple(elements) => Value::Tuple(build_default(Container::Tuple(elements))),
      TypeRef::Optional(_) => Value::Null,
    }
  }
}
