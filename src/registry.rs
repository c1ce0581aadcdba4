use crate::classify::TypeClassifier;
use crate::node::{node_key, NodeHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

/// Id of the synthetic root aggregating all observed external roots.
pub const ROOT_ID: u64 = 1;

/// Per-node identity record. `id` and `kind` never change after attachment;
/// `collapsed` is mutable for the node's whole lifetime in the mirror.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeMetadata {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub collapsed: bool,
}

struct RegistryEntry {
    // Keeping the handle alive pins the allocation, so an address is never
    // recycled for a different node while the mirror lives. Entries are never
    // reclaimed, matching the mirror's accepted unbounded-growth behavior.
    _node: NodeHandle,
    meta: NodeMetadata,
}

/// Allocates and stores identity metadata for externally-owned nodes, keyed
/// by allocation address. The only place node identity is ever mutated.
pub struct IdentityRegistry {
    entries: HashMap<usize, RegistryEntry>,
    next_id: u64,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), next_id: ROOT_ID + 1 }
    }

    /// Ensures `node` carries metadata and returns it. Idempotent: a second
    /// attach returns the original record regardless of collapse changes in
    /// between. New nodes start collapsed.
    pub fn attach(&mut self, node: &NodeHandle, classifier: &TypeClassifier) -> NodeMetadata {
        let key = node_key(node);
        if let Some(entry) = self.entries.get(&key) {
            return entry.meta.clone();
        }
        let meta = NodeMetadata {
            id: self.allocate_id(),
            kind: classifier.classify(node.as_ref()),
            collapsed: true,
        };
        self.entries.insert(key, RegistryEntry { _node: Rc::clone(node), meta: meta.clone() });
        meta
    }

    /// Seeds the synthetic root's fixed metadata (id 1, never collapsed).
    pub(crate) fn attach_root(&mut self, root: &NodeHandle) {
        let meta = NodeMetadata { id: ROOT_ID, kind: "root".to_string(), collapsed: false };
        self.entries.insert(node_key(root), RegistryEntry { _node: Rc::clone(root), meta });
    }

    pub fn metadata(&self, node: &NodeHandle) -> Option<NodeMetadata> {
        self.entries.get(&node_key(node)).map(|entry| entry.meta.clone())
    }

    /// Pre-order depth-first search by id from `search_root`. A node without
    /// metadata can never match, but its children are still searched. Ids are
    /// unique, so the first match is the only match.
    pub fn find(&self, id: u64, search_root: &NodeHandle) -> Option<NodeHandle> {
        if let Some(entry) = self.entries.get(&node_key(search_root)) {
            if entry.meta.id == id {
                return Some(Rc::clone(search_root));
            }
        }
        for child in search_root.children() {
            if let Some(found) = self.find(id, &child) {
                return Some(found);
            }
        }
        None
    }

    pub fn expand(&mut self, id: u64, search_root: &NodeHandle) {
        self.set_collapsed(id, search_root, false);
    }

    pub fn collapse(&mut self, id: u64, search_root: &NodeHandle) {
        self.set_collapsed(id, search_root, true);
    }

    // Unknown ids are a silent no-op, not an error.
    fn set_collapsed(&mut self, id: u64, search_root: &NodeHandle, collapsed: bool) {
        if let Some(node) = self.find(id, search_root) {
            if let Some(entry) = self.entries.get_mut(&node_key(&node)) {
                entry.meta.collapsed = collapsed;
            }
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
