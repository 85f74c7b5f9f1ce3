//! Opaque host values that are converted to a subtree on first structural use.

use std::{
    fmt,
    sync::{Arc, OnceLock, RwLock},
};

use tracing::debug;

use super::{Json, NodeError, read, write};
use crate::{Codec, JsonPath, Result, codec::HostValue, constants::EMPTY_ELEMENT};

pub(crate) struct Reference {
    /// Dropped once the tree form exists
    raw: RwLock<Option<Arc<dyn HostValue>>>,
    tree: OnceLock<Result<Json>>,
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.get() {
            Some(Ok(tree)) => f.debug_tuple("Unwrapped").field(tree).finish(),
            Some(Err(err)) => f.debug_tuple("Failed").field(err).finish(),
            None => match read(&self.raw).as_ref() {
                Some(raw) => f.debug_tuple("Raw").field(raw).finish(),
                None => f.write_str("Raw(<taken>)"),
            },
        }
    }
}

impl Reference {
    pub(super) fn new(value: Arc<dyn HostValue>) -> Self {
        Self {
            raw: RwLock::new(Some(value)),
            tree: OnceLock::new(),
        }
    }

    /// The host value, as long as no structural operation has unwrapped it.
    pub(crate) fn raw(&self) -> Option<Arc<dyn HostValue>> {
        if self.tree.get().is_some() {
            return None;
        }
        read(&self.raw).clone()
    }

    /// The tree form of the host value, converted at most once.
    ///
    /// The result is bound to `node`'s path and codec. A conversion failure is
    /// remembered and raised by every later call.
    pub(crate) fn tree(&self, node: &Json) -> Result<Json> {
        self.tree
            .get_or_init(|| {
                let Some(value) = read(&self.raw).clone() else {
                    return Err(NodeError::missing(EMPTY_ELEMENT, node.path()).into());
                };
                debug!(
                    path = %node.path(),
                    type_name = value.type_name(),
                    "unwrapping reference"
                );
                let tree = node
                    .codec()
                    .to_tree(value.as_ref(), node.path())
                    .map(|tree| tree.copy_if_needed(node.path(), node.codec()).attach());
                write(&self.raw).take();
                tree
            })
            .clone()
    }

    pub(super) fn select<T>(
        &self,
        node: &Json,
        on_raw: impl FnOnce(&dyn HostValue) -> T,
        on_tree: impl FnOnce(&Json) -> T,
    ) -> Result<T> {
        if let Some(raw) = self.raw() {
            return Ok(on_raw(raw.as_ref()));
        }
        self.tree(node).map(|tree| on_tree(&tree))
    }

    pub(super) fn element_name(&self, node: &Json) -> String {
        self.select(node, |raw| raw.type_name().to_string(), Json::element_name)
            .unwrap_or_else(|err| format!("error ({err})"))
    }

    /// A still-raw Reference is copied as a new Reference sharing the host
    /// value; an unwrapped one copies its tree.
    pub(super) fn copy_under(
        &self,
        node: &Json,
        path: &JsonPath,
        codec: &Codec,
        parent: Option<&JsonPath>,
    ) -> Json {
        if let Some(raw) = self.raw() {
            return Json::reference_at(raw, path.clone(), codec.clone());
        }
        match self.tree(node) {
            Ok(tree) => tree.copy_under(path, codec, parent),
            Err(err) => Json::error_at(err, path.clone(), codec.clone()),
        }
    }
}
