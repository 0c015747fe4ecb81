//! Scoped re-parenting of mesh nodes around the export boundary.

use crate::errors::RigkitError;
use crate::scene::{Node, NodeHandle, Scene};

/// A transient export root holding meshes for the duration of one export
/// call, with enough bookkeeping to restore original ownership afterward.
///
/// [`ExportStage::begin`] and [`ExportStage::end`] are paired exactly once
/// per export; `end` consumes the stage, so a stage cannot restore twice.
/// The orchestrator runs `end` on every exit path, including serializer
/// failures.
pub struct ExportStage {
    root: NodeHandle,
    original_parents: Vec<(NodeHandle, Option<NodeHandle>)>,
}

impl ExportStage {
    /// Creates a fresh export root and moves `meshes` under it, recording
    /// each mesh's current parent in the ownership map.
    pub fn begin(scene: &mut Scene, meshes: &[NodeHandle]) -> Self {
        let root = scene.add_node(Node::new("ExportStage"));

        let mut original_parents: Vec<(NodeHandle, Option<NodeHandle>)> =
            Vec::with_capacity(meshes.len());
        for &mesh in meshes {
            // A duplicate handle would re-record the export root as its
            // original parent and lose the real one; keep the first record.
            if original_parents.iter().any(|&(m, _)| m == mesh) {
                continue;
            }
            let parent = scene.get_node(mesh).and_then(Node::parent);
            original_parents.push((mesh, parent));
            scene.attach(mesh, root);
        }

        Self {
            root,
            original_parents,
        }
    }

    /// The transient export root; serializers run over its subtree.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Moves every mesh back under its recorded parent and removes the
    /// export root.
    ///
    /// A mesh whose recorded parent is missing (should not normally occur)
    /// is detached from the export root into the scene's root set — data
    /// is not silently dropped — and the failure is logged and returned.
    pub fn end(self, scene: &mut Scene) -> Vec<RigkitError> {
        let mut failures = Vec::new();

        for (mesh, parent) in self.original_parents {
            match parent {
                Some(p) if scene.get_node(p).is_some() => scene.attach(mesh, p),
                _ => {
                    scene.detach(mesh);
                    let name = scene.get_name(mesh).unwrap_or("<unknown>").to_string();
                    log::error!(
                        "No original parent found for mesh '{name}' when re-parenting after export"
                    );
                    failures.push(RigkitError::ReparentFailed(name));
                }
            }
        }

        scene.remove_node(self.root);
        failures
    }
}
