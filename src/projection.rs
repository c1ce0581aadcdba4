use crate::classify::TypeClassifier;
use crate::node::NodeHandle;
use crate::registry::IdentityRegistry;
use serde::{Deserialize, Serialize};

/// Serializable, collapse-aware snapshot of one node. `children` is present
/// only for an expanded non-leaf; omission (never an empty array) is what
/// distinguishes a collapsed subtree from a leaf on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionNode {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub leaf: bool,
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ProjectionNode>>,
}

impl ProjectionNode {
    /// An expanded non-leaf contributes its children to the projection;
    /// everything below a collapsed or leaf node is invisible.
    pub fn is_expanded(&self) -> bool {
        !self.leaf && !self.collapsed
    }

    pub(crate) fn visible_children(&self) -> Option<&[ProjectionNode]> {
        if self.is_expanded() {
            self.children.as_deref()
        } else {
            None
        }
    }
}

/// Walks the live tree and produces the projection, attaching metadata to any
/// node seen for the first time. Cost is bounded by the visible frontier, not
/// the full external tree.
pub struct TreeProjector<'a> {
    registry: &'a mut IdentityRegistry,
    classifier: &'a TypeClassifier,
}

impl<'a> TreeProjector<'a> {
    pub fn new(registry: &'a mut IdentityRegistry, classifier: &'a TypeClassifier) -> Self {
        Self { registry, classifier }
    }

    pub fn project(&mut self, node: &NodeHandle) -> ProjectionNode {
        let meta = self.registry.attach(node, self.classifier);
        let children = node.children();
        let leaf = children.is_empty();
        // A leaf has nothing to collapse; it always projects as open even
        // though attachment starts every node collapsed.
        let mut projected = ProjectionNode {
            id: meta.id,
            kind: meta.kind,
            leaf,
            collapsed: !leaf && meta.collapsed,
            children: None,
        };
        if projected.is_expanded() {
            projected.children =
                Some(children.iter().map(|child| self.project(child)).collect());
        }
        projected
    }
}
