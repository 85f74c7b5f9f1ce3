//! Conversions from host values into detached nodes bound to the global codec.
//!
//! These power the `impl Into<Json>` arguments of the mutation API:
//!
//! ```
//! use fluent_json::{Codec, Json};
//!
//! let root = Codec::global().new_json();
//! root.set("name", "Alice")?;
//! root.set("age", 30)?;
//! root.set("nick", None::<String>)?;
//! root.set("scores", vec![1.5, 2.0])?;
//!
//! assert_eq!(root.to_json_string()?, r#"{"name":"Alice","age":30,"nick":null,"scores":[1.5,2.0]}"#);
//! # Ok::<(), fluent_json::Error>(())
//! ```

use crate::{Codec, JsonPath};

use super::Json;

macro_rules! impl_from_host {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Json {
                fn from(value: $ty) -> Self {
                    Codec::global().wrap(value)
                }
            }
        )*
    };
}

impl_from_host!(
    bool, char, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    serde_json::Value,
);

impl From<&str> for Json {
    fn from(value: &str) -> Self {
        Codec::global().wrap(value.to_string())
    }
}

impl From<&Json> for Json {
    fn from(value: &Json) -> Self {
        value.clone()
    }
}

/// `None` becomes a Null node.
impl<T: Into<Json>> From<Option<T>> for Json {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Codec::global().null(),
        }
    }
}

impl<T: Into<Json>> From<Vec<T>> for Json {
    fn from(values: Vec<T>) -> Self {
        let codec = Codec::global();
        let root = JsonPath::root();
        let items = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| value.into().adopt(&root.index(index), codec))
            .collect();
        Json::array_at(items, root, codec.clone())
    }
}
