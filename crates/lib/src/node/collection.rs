//! Member storage for Object and Array nodes.
//!
//! Reads take the read lock first and only upgrade to the write lock when a
//! placeholder must be vivified. Values being stored are copied or adopted
//! before the target lock is taken, since copying may read arbitrary nodes.

use std::sync::RwLock;

use indexmap::IndexMap;
use tracing::trace;

use super::{Json, NodeError, empty::Pending, read, write};
use crate::Result;

impl Json {
    pub(super) fn object_get(&self, entries: &RwLock<IndexMap<String, Json>>, key: &str) -> Json {
        if let Some(child) = read(entries).get(key) {
            return child.clone();
        }

        write(entries)
            .entry(key.to_string())
            .or_insert_with(|| {
                trace!(path = %self.path(), key, "vivifying missing key");
                Json::placeholder_at(
                    Pending::missing_key(key, self.path()),
                    self.path().key(key),
                    self.codec().clone(),
                )
                .attach()
            })
            .clone()
    }

    pub(super) fn object_set(&self, entries: &RwLock<IndexMap<String, Json>>, key: &str, value: Json) {
        let node = value.adopt(&self.path().key(key), self.codec());
        write(entries).insert(key.to_string(), node);
    }

    /// Reading past the end fills every missing slot up to `index`, each
    /// placeholder remembering the read that created it.
    pub(super) fn array_get(&self, items: &RwLock<Vec<Json>>, index: usize) -> Json {
        if let Some(child) = read(items).get(index) {
            return child.clone();
        }

        let mut items = write(items);
        let len = items.len();
        if len <= index {
            trace!(path = %self.path(), index, len, "vivifying out of bounds index");
        }
        while items.len() <= index {
            let slot = items.len();
            items.push(
                Json::placeholder_at(
                    Pending::out_of_bounds(index, len, self.path()),
                    self.path().index(slot),
                    self.codec().clone(),
                )
                .attach(),
            );
        }
        items[index].clone()
    }

    /// Writing past the end pads the gap with plain placeholders.
    pub(super) fn array_set(&self, items: &RwLock<Vec<Json>>, index: usize, value: Json) {
        let node = value.adopt(&self.path().index(index), self.codec());

        let mut items = write(items);
        if index < items.len() {
            items[index] = node;
            return;
        }
        while items.len() < index {
            let slot = items.len();
            items.push(Json::empty_at(self.path().index(slot), self.codec().clone()).attach());
        }
        items.push(node);
    }

    /// Later elements move down one slot and are rebound to their new paths.
    pub(super) fn array_remove(&self, items: &RwLock<Vec<Json>>, index: usize) -> Result<()> {
        let shifted: Vec<Json> = {
            let items = read(items);
            if index >= items.len() {
                return Err(NodeError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                    path: self.path().clone(),
                }
                .into());
            }
            items[index + 1..].to_vec()
        };

        let rebound: Vec<Json> = shifted
            .iter()
            .enumerate()
            .map(|(offset, child)| {
                child
                    .copy_under(&self.path().index(index + offset), self.codec(), Some(self.path()))
                    .attach()
            })
            .collect();

        let mut items = write(items);
        if index >= items.len() {
            return Err(NodeError::IndexOutOfBounds {
                index,
                len: items.len(),
                path: self.path().clone(),
            }
            .into());
        }
        items.truncate(index);
        items.extend(rebound);
        Ok(())
    }
}
