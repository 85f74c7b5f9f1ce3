//! Structural equality between nodes.
//!
//! Paths and codecs never take part. Primitives compare by decoded value, so
//! `1`, `1.0` and an unparsed `"1"` are all equal. Objects compare as key sets
//! regardless of insertion order.

use super::{Element, Json, read};

impl PartialEq for Json {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        match (self.element(), other.element()) {
            // Two raw References compare host values without unwrapping
            (Element::Reference(left), Element::Reference(right)) => {
                if let (Some(l), Some(r)) = (left.raw(), right.raw()) {
                    return l.host_eq(r.as_ref());
                }
                match (left.tree(self), right.tree(other)) {
                    (Ok(l), Ok(r)) => l == r,
                    _ => false,
                }
            }
            (Element::Reference(reference), _) => {
                reference.tree(self).is_ok_and(|tree| &tree == other)
            }
            (_, Element::Reference(reference)) => {
                reference.tree(other).is_ok_and(|tree| self == &tree)
            }

            (Element::Null, Element::Null) => true,
            (Element::Primitive(l), Element::Primitive(r)) => l == r,

            (Element::Object(l), Element::Object(r)) => {
                let (l, r) = (read(l), read(r));
                l.len() == r.len()
                    && l.iter()
                        .all(|(key, value)| r.get(key).is_some_and(|other| value == other))
            }
            (Element::Array(l), Element::Array(r)) => *read(l) == *read(r),

            (Element::Empty(l), Element::Empty(r)) => l.wrapped() == r.wrapped(),
            (Element::Empty(empty), Element::Object(_) | Element::Array(_)) => {
                empty.wrapped() == Some(other)
            }
            (Element::Object(_) | Element::Array(_), Element::Empty(empty)) => {
                empty.wrapped() == Some(self)
            }

            _ => false,
        }
    }
}
