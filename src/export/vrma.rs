//! Humanoid-animation (VRMA) export: track remapping, placeholder-scene
//! serialization and `VRMC_vrm_animation` extension injection.
//!
//! A VRMA file is a GLB container whose JSON carries humanoid-bone-keyed
//! animation: generic node tracks are remapped onto canonical humanoid
//! bone names, baked through the model's rig back into scene-node space,
//! serialized against a synthetic placeholder scene, and tagged with the
//! `VRMC_vrm_animation` extension.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::animation::{AnimationClip, TargetPath, TrackData};
use crate::errors::{Result, RigkitError};
use crate::export::glb;
use crate::export::rig::{HumanoidAnimation, HumanoidRig};
use crate::export::serializer::{SceneSerializer, SerializeOptions};
use crate::scene::{Node, NodeHandle, Scene};

/// Extension name registered in `extensionsUsed`/`extensionsRequired`.
pub const VRM_ANIMATION_EXTENSION: &str = "VRMC_vrm_animation";
/// Extension spec version emitted by this writer.
pub const VRM_ANIMATION_SPEC_VERSION: &str = "1.0";
/// The one humanoid bone allowed to carry translation.
pub const HIPS_BONE: &str = "hips";

/// Remaps a clip's generic node tracks onto canonical humanoid bone names.
///
/// Each track's node name is resolved through `bone_name_map`
/// (scene-node name → canonical bone name); unmapped names pass through
/// unchanged. A track survives iff it is a quaternion rotation track, or a
/// vector translation track whose resolved bone is `"hips"` — the target
/// schema only lets the root bone translate. Everything else is dropped.
#[must_use]
pub fn remap_tracks(
    clip: &AnimationClip,
    bone_name_map: &HashMap<String, String>,
) -> HumanoidAnimation {
    let mut animation = HumanoidAnimation::new(clip.duration);

    for track in &clip.tracks {
        let raw_target = track.meta.node_name.as_str();
        let canonical = bone_name_map
            .get(raw_target)
            .map_or(raw_target, String::as_str);

        match (&track.data, track.meta.target) {
            (TrackData::Quaternion(t), TargetPath::Rotation) => {
                animation.set_rotation(canonical, t.clone());
            }
            (TrackData::Vector3(t), TargetPath::Translation) if canonical == HIPS_BONE => {
                animation.set_hips_translation(t.clone());
            }
            _ => {}
        }
    }

    animation
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_` and appends
/// the `.vrma` suffix.
#[must_use]
pub fn sanitize_clip_filename(clip_name: &str) -> String {
    let stem: String = clip_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.vrma")
}

/// Builds a synthetic scene with one placeholder node per distinct target
/// name in the baked clip, in first-seen order. Returns the scene, its
/// export root and the `node name -> document index` map; placeholder
/// creation order matches the serializer's node-array order, so the
/// indices line up with the produced document.
fn build_placeholder_scene(baked: &AnimationClip) -> (Scene, NodeHandle, HashMap<String, usize>) {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("VrmaStage"));
    let mut node_indices = HashMap::new();

    for track in &baked.tracks {
        let name = &track.meta.node_name;
        if !node_indices.contains_key(name) {
            node_indices.insert(name.clone(), node_indices.len());
            scene.add_to_parent(Node::new(name), root);
        }
    }

    (scene, root, node_indices)
}

/// Attaches the `VRMC_vrm_animation` extension block and registers the
/// extension name in `extensionsUsed` and `extensionsRequired`,
/// deduplicated against existing entries.
fn inject_animation_extension(
    document: &mut Value,
    bone_name_map: &HashMap<String, String>,
    node_indices: &HashMap<String, usize>,
) {
    let mut human_bones = serde_json::Map::new();
    for (node_name, bone_name) in bone_name_map {
        if let Some(&index) = node_indices.get(node_name) {
            human_bones.insert(bone_name.clone(), json!({"node": index}));
        }
    }

    let Some(root) = document.as_object_mut() else {
        return;
    };

    let extensions = root
        .entry("extensions".to_string())
        .or_insert_with(|| json!({}));
    extensions[VRM_ANIMATION_EXTENSION] = json!({
        "specVersion": VRM_ANIMATION_SPEC_VERSION,
        "humanoid": {"humanBones": Value::Object(human_bones)},
    });

    register_extension(root, "extensionsUsed");
    register_extension(root, "extensionsRequired");
}

fn register_extension(root: &mut serde_json::Map<String, Value>, key: &str) {
    let entry = root.entry(key.to_string()).or_insert_with(|| json!([]));
    if let Some(list) = entry.as_array_mut()
        && !list
            .iter()
            .any(|v| v.as_str() == Some(VRM_ANIMATION_EXTENSION))
    {
        list.push(Value::from(VRM_ANIMATION_EXTENSION));
    }
}

/// Produces one `.vrma` file for a single cloned clip.
///
/// Returns the sanitized output filename and the packed container bytes.
pub async fn export_clip<S: SceneSerializer>(
    clip: &AnimationClip,
    bone_name_map: &HashMap<String, String>,
    rig: &dyn HumanoidRig,
    serializer: &S,
) -> Result<(String, Vec<u8>)> {
    let humanoid = remap_tracks(clip, bone_name_map);
    let baked = rig.bake(&humanoid, &clip.name)?;

    let (scene, root, node_indices) = build_placeholder_scene(&baked);

    let options = SerializeOptions {
        binary: false,
        only_visible: false,
    };
    let mut document = serializer
        .serialize(&scene, root, std::slice::from_ref(&baked), &options)
        .await
        .map_err(|e| RigkitError::SerializationFailed(e.to_string()))?;

    inject_animation_extension(&mut document, bone_name_map, &node_indices);

    let bytes = glb::pack(document)?;
    Ok((sanitize_clip_filename(&clip.name), bytes))
}
