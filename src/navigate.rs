use crate::projection::ProjectionNode;
use crate::registry::ROOT_ID;
use serde::{Deserialize, Serialize};

/// Neighboring visible nodes of a target, for tree keyboard navigation:
/// the parent (absent for top-level roots), the previous visible node at or
/// above the target's level, and the next node in depth-first visible order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NavContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
}

/// Computes the navigation context of `id` within a projection, in one pass
/// and without stored back-references. Returns `None` when `id` is not
/// visible in `tree` — collapsed and leaf subtrees are never searched,
/// mirroring the projection's own visibility rule.
///
/// `next` resolves to the target's first child when the target is expanded,
/// otherwise to the following sibling of the target or of whichever ancestor
/// has one; it stays absent for the last visible node. `prev` tracking starts
/// at the parent itself, so a first child reports its parent as the previous
/// visible node (correct for depth-first order) unless that parent is the
/// synthetic root.
pub fn context(id: u64, tree: &ProjectionNode) -> Option<NavContext> {
    if tree.id == id {
        let mut ctx = NavContext::default();
        if let Some(children) = tree.visible_children() {
            ctx.next = children.first().map(|child| child.id);
        }
        return Some(ctx);
    }
    let children = tree.visible_children()?;
    let mut pending: Option<NavContext> = None;
    let mut prev = tree;
    for child in children {
        // The target was found in an earlier sibling's subtree with no `next`
        // of its own; this sibling is the next visible node.
        if let Some(mut ctx) = pending.take() {
            ctx.next = Some(child.id);
            return Some(ctx);
        }
        if let Some(mut ctx) = context(id, child) {
            if ctx.parent.is_none() && tree.id != ROOT_ID {
                ctx.parent = Some(tree.id);
            }
            if ctx.prev.is_none() && prev.id != ROOT_ID {
                ctx.prev = Some(prev.id);
            }
            if ctx.next.is_some() {
                return Some(ctx);
            }
            pending = Some(ctx);
        }
        prev = child;
    }
    // Target found in the last child with no next sibling: `next` stays
    // absent, meaning "last visible node". `None` means not found at all.
    pending
}
