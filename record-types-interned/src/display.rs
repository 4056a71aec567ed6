use crate::descriptor::RecordDescriptor;
use crate::kind::TypeRef;
use std::fmt;

/// Renders the canonical type name that fingerprints are built from.
impl fmt::Display for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TypeRef::Primitive(kind) => f.write_str(kind.name()),
      TypeRef::Record(descriptor) => write!(f, "{}", descriptor.identifier()),
      TypeRef::List(element) => write!(f, "List<{element}>"),
      TypeRef::Optional(inner) => write!(f, "Option<{inner}>"),
      TypeRef::Tuple(elements) => {
        write!(f, "Tuple<")?;
        let mut iter = elements.iter().peekable();
        while let Some(element) = iter.next() {
          write!(f, "{element}")?;
          if iter.peek().is_some() {
            write!(f, ", ")?;
          }
        }
        write!(f, ">")
      }
    }
  }
}

/// Human-readable rendering of a record's fields, e.g.
/// `{ foo: List<string>, bar: i32 }`.
#[derive(Debug)]
pub struct RecordDisplay<'a> {
  descriptor: &'a RecordDescriptor,
}

impl<'a> RecordDisplay<'a> {
  pub fn new(descriptor: &'a RecordDescriptor) -> Self {
    Self { descriptor }
  }
}

impl<'a> fmt::Display for RecordDisplay<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{ ")?;
    let mut iter = self.descriptor.fields().iter().peekable();
    while let Some(field) = iter.next() {
      if !field.serializable {
        write!(f, "#[transient] ")?;
      }
      if is_identifier(&field.name) {
        write!(f, "{}", field.name)?;
      } else {
        write!(f, "\"{}\"", field.name.escape_default())?;
      }
      write!(f, ": {}", field.ty)?;
      if iter.peek().is_some() {
        write!(f, ", ")?;
      }
    }
    write!(f, " }}")
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_alphabetic() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_alphanumeric() || c == '_')
}
