//! Scene Graph & Export Stage Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach/detach hierarchy
//! - Node query: names, root_nodes, subtree collection
//! - ExportStage: begin/end reparent round trip and failure handling

use rigkit::export::stage::ExportStage;
use rigkit::scene::{Mesh, Node, Scene};

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node() {
    let mut scene = Scene::new();
    let handle = scene.create_node();
    assert!(scene.get_node(handle).is_some());
}

#[test]
fn scene_create_node_with_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name("TestNode");
    assert_eq!(scene.get_name(handle), Some("TestNode"));
}

#[test]
fn scene_set_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node();
    scene.set_name(handle, "Renamed");
    assert_eq!(scene.get_name(handle), Some("Renamed"));
}

#[test]
fn scene_add_node_to_root() {
    let mut scene = Scene::new();
    let handle = scene.add_node(Node::new("n"));
    assert!(scene.root_nodes.contains(&handle));
}

#[test]
fn scene_remove_node_removes_from_root() {
    let mut scene = Scene::new();
    let handle = scene.add_node(Node::new("n"));
    assert!(scene.root_nodes.contains(&handle));

    scene.remove_node(handle);
    assert!(!scene.root_nodes.contains(&handle));
    assert!(scene.get_node(handle).is_none());
}

#[test]
fn scene_remove_node_removes_subtree() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.create_node();
    let grandchild = scene.create_node();

    scene.attach(child, parent);
    scene.attach(grandchild, child);

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
}

#[test]
fn scene_remove_mesh_node_frees_component() {
    let mut scene = Scene::new();
    let handle = scene.add_mesh(Mesh::new("Body"));
    let mesh_key = scene.get_node(handle).unwrap().mesh.unwrap();
    assert!(scene.meshes.contains_key(mesh_key));

    scene.remove_node(handle);
    assert!(!scene.meshes.contains_key(mesh_key));
}

// ============================================================================
// Hierarchy: Attach / Detach
// ============================================================================

#[test]
fn scene_attach_sets_parent_child() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_attach_removes_from_old_parent() {
    let mut scene = Scene::new();
    let parent1 = scene.create_node();
    let parent2 = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, parent1);
    assert!(scene.get_node(parent1).unwrap().children().contains(&child));

    // Re-attach to parent2
    scene.attach(child, parent2);
    assert!(
        !scene.get_node(parent1).unwrap().children().contains(&child),
        "Child should be removed from old parent"
    );
    assert!(
        scene.get_node(parent2).unwrap().children().contains(&child),
        "Child should be in new parent"
    );
}

#[test]
fn scene_attach_to_self_is_noop() {
    let mut scene = Scene::new();
    let node = scene.create_node();

    scene.attach(node, node);

    assert_eq!(scene.get_node(node).unwrap().parent(), None);
    assert!(scene.root_nodes.contains(&node));
}

#[test]
fn scene_detach_returns_to_root_set() {
    let mut scene = Scene::new();
    let parent = scene.create_node();
    let child = scene.create_node();
    scene.attach(child, parent);

    scene.detach(child);

    assert_eq!(scene.get_node(child).unwrap().parent(), None);
    assert!(scene.root_nodes.contains(&child));
    assert!(!scene.get_node(parent).unwrap().children().contains(&child));
}

#[test]
fn scene_add_to_parent() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("p"));
    let child = scene.add_to_parent(Node::new("c"), parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
}

// ============================================================================
// Node Query
// ============================================================================

#[test]
fn scene_find_node_by_name() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("Armature");
    let spine = scene.add_to_parent(Node::new("Spine"), root);
    let head = scene.add_to_parent(Node::new("Head"), spine);

    assert_eq!(scene.find_node_by_name(root, "Head"), Some(head));
    assert_eq!(scene.find_node_by_name(root, "Tail"), None);
    assert_eq!(scene.find_node_by_name_global("Spine"), Some(spine));
}

#[test]
fn scene_collect_subtree_depth_first() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("root");
    let a = scene.add_to_parent(Node::new("a"), root);
    let b = scene.add_to_parent(Node::new("b"), root);
    let a1 = scene.add_to_parent(Node::new("a1"), a);

    let order = scene.collect_subtree(root);
    assert_eq!(order, vec![root, a, a1, b]);
}

#[test]
fn scene_skeleton_registration() {
    let mut scene = Scene::new();
    let hips = scene.create_node_with_name("J_Bip_C_Hips");
    let spine = scene.add_to_parent(Node::new("J_Bip_C_Spine"), hips);

    let skeleton = rigkit::Skeleton::new("Humanoid", vec![hips, spine], 0);
    assert_eq!(skeleton.root_bone(), Some(hips));

    let key = scene.add_skeleton(skeleton);
    let mesh = scene.add_mesh(Mesh::with_skeleton("Body", key));

    let mesh_key = scene.get_node(mesh).unwrap().mesh.unwrap();
    assert_eq!(scene.meshes[mesh_key].skeleton, Some(key));
    assert_eq!(scene.skins[key].bones.len(), 2);
}

#[test]
fn scene_unique_ids() {
    let s1 = Scene::new();
    let s2 = Scene::new();
    assert_ne!(s1.id, s2.id, "Each scene should have a unique ID");
}

// ============================================================================
// ExportStage: Reparent Round Trip
// ============================================================================

#[test]
fn stage_moves_meshes_under_export_root() {
    let mut scene = Scene::new();
    let armature = scene.create_node_with_name("Armature");
    let mesh = scene.add_mesh(Mesh::new("Body"));
    scene.attach(mesh, armature);

    let stage = ExportStage::begin(&mut scene, &[mesh]);

    assert_eq!(scene.get_node(mesh).unwrap().parent(), Some(stage.root()));
    assert!(scene.get_node(stage.root()).unwrap().children().contains(&mesh));

    stage.end(&mut scene);
}

#[test]
fn stage_round_trip_restores_distinct_parents() {
    let mut scene = Scene::new();
    let parent_a = scene.create_node_with_name("ParentA");
    let parent_b = scene.create_node_with_name("ParentB");
    let mesh_a = scene.add_mesh(Mesh::new("MeshA"));
    let mesh_b = scene.add_mesh(Mesh::new("MeshB"));
    scene.attach(mesh_a, parent_a);
    scene.attach(mesh_b, parent_b);

    let node_count_before = scene.nodes.len();

    let stage = ExportStage::begin(&mut scene, &[mesh_a, mesh_b]);
    let failures = stage.end(&mut scene);

    assert!(failures.is_empty(), "Round trip should not fail: {failures:?}");
    assert_eq!(scene.get_node(mesh_a).unwrap().parent(), Some(parent_a));
    assert_eq!(scene.get_node(mesh_b).unwrap().parent(), Some(parent_b));
    assert_eq!(
        scene.nodes.len(),
        node_count_before,
        "Transient export root should be removed"
    );
}

#[test]
fn stage_end_reports_missing_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("Doomed");
    let mesh = scene.add_mesh(Mesh::new("Body"));
    scene.attach(mesh, parent);

    let stage = ExportStage::begin(&mut scene, &[mesh]);

    // The recorded parent disappears mid-export
    scene.remove_node(parent);

    let failures = stage.end(&mut scene);

    assert_eq!(failures.len(), 1, "Missing parent must be reported");
    // The mesh is not silently dropped: it survives in the root set
    assert!(scene.get_node(mesh).is_some());
    assert!(scene.root_nodes.contains(&mesh));
    assert_eq!(scene.get_node(mesh).unwrap().parent(), None);
}

#[test]
fn stage_end_reports_root_level_mesh() {
    let mut scene = Scene::new();
    // A mesh that was already a root node has no recorded parent
    let mesh = scene.add_mesh(Mesh::new("Loose"));

    let stage = ExportStage::begin(&mut scene, &[mesh]);
    let failures = stage.end(&mut scene);

    assert_eq!(failures.len(), 1);
    assert!(scene.root_nodes.contains(&mesh), "Mesh must stay reachable");
}

#[test]
fn stage_duplicate_mesh_handles_restore_once() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("Parent");
    let mesh = scene.add_mesh(Mesh::new("Body"));
    scene.attach(mesh, parent);

    let stage = ExportStage::begin(&mut scene, &[mesh, mesh]);
    let failures = stage.end(&mut scene);

    assert!(failures.is_empty());
    assert_eq!(scene.get_node(mesh).unwrap().parent(), Some(parent));
}
