use crate::node::InspectNode;

pub const UNKNOWN_TYPE: &str = "Unknown";

type Predicate = Box<dyn Fn(&dyn InspectNode) -> bool>;

struct ClassifierRule {
    label: String,
    predicate: Predicate,
}

/// Maps opaque nodes to human-readable type labels via an ordered rule list.
/// Rules are checked in registration order; the first match wins and
/// unrecognized nodes always classify as `"Unknown"`. Total: never fails.
pub struct TypeClassifier {
    rules: Vec<ClassifierRule>,
}

impl TypeClassifier {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registers a label for an arbitrary predicate.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        predicate: impl Fn(&dyn InspectNode) -> bool + 'static,
    ) {
        self.rules.push(ClassifierRule { label: label.into(), predicate: Box::new(predicate) });
    }

    /// Registers a label for a concrete node type. This is the usual way a
    /// host integration builds its type table.
    pub fn register_type<T: InspectNode>(&mut self, label: impl Into<String>) {
        self.register(label, |node| node.as_any().is::<T>());
    }

    pub fn classify(&self, node: &dyn InspectNode) -> String {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(node))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
