use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::SlotMap;

use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::{MeshKey, NodeHandle, SkeletonKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Pure data layer: node arena plus component pools. Nodes without a
/// parent are tracked in `root_nodes`.
pub struct Scene {
    pub id: u32,

    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub skins: SlotMap<SkeletonKey, Skeleton>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),

            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            skins: SlotMap::with_key(),
        }
    }

    /// Adds a node to the scene (as a root node).
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Creates an unnamed root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::default())
    }

    /// Creates a named root node.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Inserts `child` directly under `parent_handle`.
    pub fn add_to_parent(&mut self, child: Node, parent_handle: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent_handle) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent_handle);
        }

        handle
    }

    /// Creates a node carrying a mesh component.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skins.insert(skeleton)
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        // Take the children list first to avoid a borrow conflict
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        let parent_opt = self.nodes.get(handle).and_then(|n| n.parent);

        if let Some(parent_handle) = parent_opt {
            if let Some(parent) = self.nodes.get_mut(parent_handle)
                && let Some(pos) = parent.children.iter().position(|&x| x == handle)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        // Clean up components
        if let Some(node) = self.nodes.get(handle)
            && let Some(mesh_key) = node.mesh
        {
            self.meshes.remove(mesh_key);
        }

        self.nodes.remove(handle);
    }

    /// Establishes a parent-child relationship.
    ///
    /// Detaches `child_handle` from its previous parent (or the root set)
    /// first. If `parent_handle` does not exist, the child is returned to
    /// the root set instead of being lost.
    pub fn attach(&mut self, child_handle: NodeHandle, parent_handle: NodeHandle) {
        if child_handle == parent_handle {
            log::warn!("Cannot attach node to itself!");
            return;
        }

        // 1. Detach from old
        self.unlink(child_handle);

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent_handle) {
            p.children.push(child_handle);
        } else {
            log::error!("Parent node not found during attach!");
            self.root_nodes.push(child_handle);
            if let Some(c) = self.nodes.get_mut(child_handle) {
                c.parent = None;
            }
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child_handle) {
            c.parent = Some(parent_handle);
        }
    }

    /// Detaches a node from its parent, returning it to the root set.
    pub fn detach(&mut self, handle: NodeHandle) {
        self.unlink(handle);
        if self.nodes.contains_key(handle) {
            self.root_nodes.push(handle);
            if let Some(n) = self.nodes.get_mut(handle) {
                n.parent = None;
            }
        }
    }

    /// Removes a node from its parent's child list or from the root set,
    /// leaving its own `parent` field untouched.
    fn unlink(&mut self, handle: NodeHandle) {
        let old_parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == handle)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
    }

    /// Gets a read-only node reference.
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Gets a mutable node reference (for TRS edits).
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(n) = self.nodes.get_mut(handle) {
            n.name = name.to_string();
        }
    }

    /// Depth-first search for a node by name under `current`.
    #[must_use]
    pub fn find_node_by_name(&self, current: NodeHandle, name: &str) -> Option<NodeHandle> {
        let node = self.nodes.get(current)?;
        if node.name == name {
            return Some(current);
        }
        for &child in &node.children {
            if let Some(found) = self.find_node_by_name(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Searches every root subtree for a node by name.
    #[must_use]
    pub fn find_node_by_name_global(&self, name: &str) -> Option<NodeHandle> {
        let roots: Vec<NodeHandle> = self.root_nodes.clone();
        roots
            .into_iter()
            .find_map(|root| self.find_node_by_name(root, name))
    }

    /// Collects a subtree's handles in depth-first order, `root` included.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                out.push(handle);
                // Reverse so children pop in declaration order
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }
}
