use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree structure through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: List of child node handles
///
/// Prefer [`Scene::attach`](crate::scene::Scene::attach) and
/// [`Scene::detach`](crate::scene::Scene::detach) over touching these
/// fields directly; they keep both sides of the relationship in sync.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name, the currency for animation-track targeting and bone maps
    pub name: String,

    // === Core Hierarchy ===
    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Components ===
    pub mesh: Option<MeshKey>,

    // === Core State ===
    /// Visibility flag; serializers may skip invisible nodes
    pub visible: bool,
}

impl Node {
    /// Creates a named node with default transform and visibility.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
