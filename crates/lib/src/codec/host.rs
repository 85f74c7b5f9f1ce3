//! Host values and the transformers that map them into trees.

use std::{any::Any, fmt};

use serde::Serialize;

use crate::{Codec, Json};

/// A host value that can live inside a tree as a Reference.
///
/// Implemented for every `Serialize + PartialEq + Debug` type that is
/// `Send + Sync + 'static`, so callers never implement it by hand.
pub trait HostValue: Any + Send + Sync + fmt::Debug {
    /// The Rust type name, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Access for downcasting in transformers.
    fn as_any(&self) -> &dyn Any;

    /// Converts the value into a `serde_json::Value`.
    fn to_serde_value(&self) -> serde_json::Result<serde_json::Value>;

    /// Equality with another host value of the same concrete type.
    fn host_eq(&self, other: &dyn HostValue) -> bool;
}

impl<T> HostValue for T
where
    T: Serialize + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_serde_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn host_eq(&self, other: &dyn HostValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A hook consulted before the default classification of a wrapped value.
///
/// Transformers run in registration order and the first one returning
/// `Some` wins. The returned node is rebound to the wrap target's path.
///
/// ```
/// use fluent_json::{Codec, HostValue, Json};
///
/// #[derive(Debug, PartialEq, serde::Serialize)]
/// struct Celsius(f64);
///
/// let codec = Codec::builder()
///     .transform_with(|value: &dyn HostValue, codec: &Codec| {
///         let c = value.as_any().downcast_ref::<Celsius>()?;
///         Some(codec.wrap(format!("{}C", c.0)))
///     })
///     .build();
///
/// assert_eq!(codec.wrap(Celsius(21.5)).string()?, "21.5C");
/// # Ok::<(), fluent_json::Error>(())
/// ```
pub trait Transformer: Send + Sync {
    /// Returns a tree for `value`, or `None` to let the next transformer try.
    fn transform(&self, value: &dyn HostValue, codec: &Codec) -> Option<Json>;
}

impl<F> Transformer for F
where
    F: Fn(&dyn HostValue, &Codec) -> Option<Json> + Send + Sync,
{
    fn transform(&self, value: &dyn HostValue, codec: &Codec) -> Option<Json> {
        self(value, codec)
    }
}
