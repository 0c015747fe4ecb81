//! Scene graph module
//!
//! Manages the scene hierarchy and components:
//! - Node: scene node (parent/child relationships and transform)
//! - Transform: TRS component (position, rotation, scale)
//! - Scene: scene container
//! - Mesh: mesh component (geometry/material/skin live with the model
//!   pipeline; the export core only needs the binding)
//! - Skeleton: ordered bone list with a rest pose

pub mod mesh;
pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;

pub use mesh::Mesh;
pub use node::Node;
pub use scene::Scene;
pub use skeleton::Skeleton;
pub use transform::Transform;

slotmap::new_key_type! {
    /// Handle to a [`Node`] in a [`Scene`] arena.
    pub struct NodeHandle;
    /// Handle to a [`Mesh`] component.
    pub struct MeshKey;
    /// Handle to a [`Skeleton`].
    pub struct SkeletonKey;
}
