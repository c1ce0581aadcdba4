use crate::classify::TypeClassifier;
use crate::config::{HighlightConfig, InspectorConfig};
use crate::navigate::{self, NavContext};
use crate::node::{node_key, Bounds, InspectNode, NodeHandle};
use crate::projection::{ProjectionNode, TreeProjector};
use crate::properties::{format_properties, PropertyValue, SelectionRecord};
use crate::registry::IdentityRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Host-implemented selection highlight. `show` is called inside the render
/// bracket when a selected node has bounds; `hide` is called when the bracket
/// closes, on every path.
pub trait SelectionOverlay {
    fn show(&mut self, bounds: Bounds, style: &HighlightConfig);
    fn hide(&mut self);
}

/// Everything a UI panel needs for one refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshReport {
    pub tree: ProjectionNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectionRecord>,
    #[serde(default)]
    pub context: NavContext,
}

impl RefreshReport {
    /// Wire form handed to whatever transports the report to the panel.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Serializing inspector refresh report")
    }
}

/// Well-known container aggregating every external root observed so far.
/// Fixed id 1, type "root", never collapsed. The child set only grows.
struct SyntheticRoot {
    children: RefCell<Vec<NodeHandle>>,
}

impl InspectNode for SyntheticRoot {
    fn children(&self) -> Vec<NodeHandle> {
        self.children.borrow().clone()
    }

    fn properties(&self) -> Vec<(String, PropertyValue)> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One mirror session: owns the identity registry, the synthetic root's child
/// set, the classifier and the current selection. Single-threaded: the render
/// loop drives `before_render`/`after_render`, UI queries run between passes.
pub struct Inspector {
    registry: IdentityRegistry,
    classifier: TypeClassifier,
    root: Rc<SyntheticRoot>,
    selected: Option<NodeHandle>,
    overlay: Option<Box<dyn SelectionOverlay>>,
    overlay_armed: bool,
    config: InspectorConfig,
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        let root = Rc::new(SyntheticRoot { children: RefCell::new(Vec::new()) });
        let mut registry = IdentityRegistry::new();
        let handle: NodeHandle = root.clone();
        registry.attach_root(&handle);
        Self {
            registry,
            classifier: TypeClassifier::new(),
            root,
            selected: None,
            overlay: None,
            overlay_armed: false,
            config,
        }
    }

    pub fn classifier_mut(&mut self) -> &mut TypeClassifier {
        &mut self.classifier
    }

    pub fn set_overlay(&mut self, overlay: Box<dyn SelectionOverlay>) {
        self.overlay = Some(overlay);
    }

    fn root_handle(&self) -> NodeHandle {
        self.root.clone()
    }

    /// Records a root the render loop has surfaced. Deduplicated by node
    /// identity, insertion order preserved. Roots are attached immediately;
    /// interior nodes are attached lazily during projection.
    pub fn register_root(&mut self, stage: &NodeHandle) {
        {
            let mut roots = self.root.children.borrow_mut();
            if roots.iter().any(|existing| node_key(existing) == node_key(stage)) {
                return;
            }
            roots.push(Rc::clone(stage));
        }
        self.registry.attach(stage, &self.classifier);
        if self.config.auto_select_first_root && self.selected.is_none() {
            self.selected = Some(Rc::clone(stage));
        }
    }

    /// Called by the host before each render pass. Discovers new roots and
    /// shows the highlight for the current selection when it has bounds,
    /// arming the matching `after_render` release.
    pub fn before_render(&mut self, stage: &NodeHandle) {
        self.register_root(stage);
        if let (Some(overlay), Some(node)) = (self.overlay.as_mut(), self.selected.as_ref()) {
            if let Some(bounds) = node.bounds() {
                overlay.show(bounds, &self.config.highlight);
                self.overlay_armed = true;
            }
        }
    }

    /// Called by the host after each render pass. Releases the highlight iff
    /// it was armed; safe to call unconditionally.
    pub fn after_render(&mut self) {
        if self.overlay_armed {
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.hide();
            }
            self.overlay_armed = false;
        }
    }

    /// Decorator form of the render bracket: `before_render`, the wrapped
    /// render, then `after_render` on every path. The guard runs the release
    /// even when `render` panics, so the overlay never leaks into later
    /// frames.
    pub fn intercept<R>(&mut self, stage: &NodeHandle, render: impl FnOnce() -> R) -> R {
        self.before_render(stage);
        let guard = RenderScope { inspector: self };
        let result = render();
        drop(guard);
        result
    }

    /// Projection of the whole mirror, rooted at the synthetic root.
    pub fn tree(&mut self) -> ProjectionNode {
        let handle = self.root_handle();
        TreeProjector::new(&mut self.registry, &self.classifier).project(&handle)
    }

    /// Aggregates everything a panel refresh needs. No selection is a valid
    /// state: null selection, empty context. A selection hidden under a
    /// collapsed ancestor also yields an empty context.
    pub fn refresh(&mut self) -> RefreshReport {
        let tree = self.tree();
        let selected = self.selection();
        let context = selected
            .as_ref()
            .and_then(|record| navigate::context(record.id, &tree))
            .unwrap_or_default();
        RefreshReport { tree, selected, context }
    }

    pub fn expand(&mut self, id: u64) {
        let handle = self.root_handle();
        self.registry.expand(id, &handle);
    }

    pub fn collapse(&mut self, id: u64) {
        let handle = self.root_handle();
        self.registry.collapse(id, &handle);
    }

    /// Sets the current selection by id. An unknown id leaves the existing
    /// selection untouched and returns `None`.
    pub fn select(&mut self, id: u64) -> Option<SelectionRecord> {
        let handle = self.root_handle();
        let node = self.registry.find(id, &handle)?;
        self.selected = Some(node);
        self.selection()
    }

    pub fn selection(&self) -> Option<SelectionRecord> {
        let node = self.selected.as_ref()?;
        let meta = self.registry.metadata(node)?;
        Some(SelectionRecord { id: meta.id, properties: format_properties(node.as_ref(), &meta) })
    }

    pub fn find(&self, id: u64) -> Option<NodeHandle> {
        self.registry.find(id, &self.root_handle())
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

struct RenderScope<'a> {
    inspector: &'a mut Inspector,
}

impl Drop for RenderScope<'_> {
    fn drop(&mut self) {
        self.inspector.after_render();
    }
}
