pub mod classify;
pub mod config;
pub mod inspector;
pub mod navigate;
pub mod node;
pub mod projection;
pub mod properties;
pub mod registry;

pub use classify::TypeClassifier;
pub use config::{HighlightConfig, InspectorConfig};
pub use inspector::{Inspector, RefreshReport, SelectionOverlay};
pub use navigate::NavContext;
pub use node::{Bounds, InspectNode, NodeHandle};
pub use projection::ProjectionNode;
pub use properties::{PropertyValue, SelectionRecord};
pub use registry::{IdentityRegistry, NodeMetadata, ROOT_ID};
