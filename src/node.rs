use crate::properties::PropertyValue;
use std::any::Any;
use std::rc::Rc;

/// Shared handle to an externally-owned scene node.
///
/// The inspector never constructs or destroys nodes; it only walks them and
/// attaches metadata on the side. The mirror is single-threaded (one render
/// loop driving it, UI queries interleaved between passes), so `Rc` is the
/// right ownership model.
pub type NodeHandle = Rc<dyn InspectNode>;

/// Capability surface the host engine implements for each node kind.
pub trait InspectNode: Any {
    /// Ordered child list. Leaf nodes return an empty vec.
    fn children(&self) -> Vec<NodeHandle>;

    /// Displayable fields and their kind tags. Structural fields
    /// (`children`, `parent`) and private `_`-prefixed fields are filtered
    /// out again by the formatter, so descriptors do not need to be careful.
    fn properties(&self) -> Vec<(String, PropertyValue)>;

    /// Axis-aligned bounds in stage coordinates, used to draw the selection
    /// highlight. Nodes without a screen presence return `None`.
    fn bounds(&self) -> Option<Bounds> {
        None
    }

    /// Concrete-type access for classifier predicates.
    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Identity key for a node: the data half of the fat pointer. Vtable pointers
/// for the same allocation can differ across codegen units, so only the data
/// address is compared.
pub(crate) fn node_key(node: &NodeHandle) -> usize {
    Rc::as_ptr(node) as *const () as usize
}
