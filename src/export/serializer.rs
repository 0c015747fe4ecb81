//! The generic scene-serializer boundary.
//!
//! Converting a scene subtree plus animation clips into a glTF JSON
//! document is the job of an external exporter; the orchestrator only
//! depends on the [`SceneSerializer`] trait. [`JsonSceneSerializer`] is a
//! compact reference implementation covering what the export core itself
//! needs end to end: node hierarchy and keyframe animation with an
//! embedded binary buffer. Geometry, material and skin encoding remain
//! with the production exporter.

use serde_json::{Value, json};

use crate::animation::{AnimationClip, KeyframeTrack, TrackData};
use crate::scene::{NodeHandle, Scene};
use crate::utils::data_url;

/// `FLOAT` component type in glTF accessor JSON.
const COMPONENT_FLOAT: u32 = 5126;

/// Options passed through to the serializer.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Request a GLB-ready document: all binary data coalesced into
    /// `buffers[0]` with an embedded payload. `JsonSceneSerializer`
    /// embeds the payload in both modes; external serializers may emit
    /// other `uri` forms when this is `false`.
    pub binary: bool,
    /// Skip invisible nodes (and their subtrees).
    pub only_visible: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            binary: true,
            only_visible: false,
        }
    }
}

/// Converts a scene subtree plus clips into a glTF JSON document.
pub trait SceneSerializer: Send + Sync {
    /// Serializes the children of `root` (the transient export root
    /// itself is not part of the document) together with `clips`.
    fn serialize(
        &self,
        scene: &Scene,
        root: NodeHandle,
        clips: &[AnimationClip],
        options: &SerializeOptions,
    ) -> impl std::future::Future<Output = anyhow::Result<Value>> + Send;
}

/// Reference serializer: hierarchy + animation tracks, single embedded
/// buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSceneSerializer;

impl JsonSceneSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SceneSerializer for JsonSceneSerializer {
    async fn serialize(
        &self,
        scene: &Scene,
        root: NodeHandle,
        clips: &[AnimationClip],
        options: &SerializeOptions,
    ) -> anyhow::Result<Value> {
        if scene.get_node(root).is_none() {
            anyhow::bail!("export root is not part of the scene");
        }

        // ====================================================================
        // Nodes: pre-order over the export subtree, root excluded
        // ====================================================================

        let mut order: Vec<NodeHandle> = Vec::new();
        let mut index_of_handle = std::collections::HashMap::new();
        let mut stack: Vec<NodeHandle> = scene
            .get_node(root)
            .map(|n| n.children().iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(handle) = stack.pop() {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            if options.only_visible && !node.visible {
                continue;
            }
            index_of_handle.insert(handle, order.len());
            order.push(handle);
            for &child in node.children().iter().rev() {
                stack.push(child);
            }
        }

        let mut index_of_name: std::collections::HashMap<&str, usize> =
            std::collections::HashMap::new();
        for (i, &handle) in order.iter().enumerate() {
            if let Some(name) = scene.get_name(handle) {
                index_of_name.entry(name).or_insert(i);
            }
        }

        let mut nodes = Vec::with_capacity(order.len());
        for &handle in &order {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            let mut entry = serde_json::Map::new();
            entry.insert("name".to_string(), Value::from(node.name.clone()));

            let t = &node.transform;
            if !t.is_identity() {
                entry.insert("translation".to_string(), json!(t.position.to_array()));
                entry.insert("rotation".to_string(), json!(t.rotation.to_array()));
                entry.insert("scale".to_string(), json!(t.scale.to_array()));
            }

            let children: Vec<usize> = node
                .children()
                .iter()
                .filter_map(|c| index_of_handle.get(c).copied())
                .collect();
            if !children.is_empty() {
                entry.insert("children".to_string(), json!(children));
            }

            nodes.push(Value::Object(entry));
        }

        let scene_roots: Vec<usize> = scene
            .get_node(root)
            .map(|n| {
                n.children()
                    .iter()
                    .filter_map(|c| index_of_handle.get(c).copied())
                    .collect()
            })
            .unwrap_or_default();

        // ====================================================================
        // Animations: one glTF animation per clip, all data in one buffer
        // ====================================================================

        let mut buffer = BufferBuilder::default();
        let mut animations = Vec::new();

        for clip in clips {
            let mut samplers = Vec::new();
            let mut channels = Vec::new();

            for track in &clip.tracks {
                let Some(&node_index) = index_of_name.get(track.meta.node_name.as_str()) else {
                    log::warn!(
                        "Skipping track '{}': target node not in export subtree",
                        track.target_name()
                    );
                    continue;
                };

                let (input, output, interpolation) = match &track.data {
                    TrackData::Vector3(t) => (
                        buffer.push_times(&t.times),
                        buffer.push_vec3_values(t),
                        t.interpolation,
                    ),
                    TrackData::Quaternion(t) => (
                        buffer.push_times(&t.times),
                        buffer.push_quat_values(t),
                        t.interpolation,
                    ),
                };

                let sampler_index = samplers.len();
                samplers.push(json!({
                    "input": input,
                    "output": output,
                    "interpolation": interpolation.gltf_name(),
                }));
                channels.push(json!({
                    "sampler": sampler_index,
                    "target": {
                        "node": node_index,
                        "path": track.meta.target.gltf_path(),
                    },
                }));
            }

            if channels.is_empty() {
                log::warn!("Clip '{}' produced no serializable channels", clip.name);
                continue;
            }

            animations.push(json!({
                "name": clip.name,
                "samplers": samplers,
                "channels": channels,
            }));
        }

        // ====================================================================
        // Document assembly
        // ====================================================================

        let mut document = serde_json::Map::new();
        document.insert(
            "asset".to_string(),
            json!({"version": "2.0", "generator": "rigkit"}),
        );
        document.insert("scene".to_string(), Value::from(0));
        document.insert("scenes".to_string(), json!([{"nodes": scene_roots}]));
        document.insert("nodes".to_string(), Value::Array(nodes));

        if !animations.is_empty() {
            document.insert("animations".to_string(), Value::Array(animations));
        }
        if !buffer.data.is_empty() {
            document.insert(
                "buffers".to_string(),
                json!([{
                    "uri": data_url::encode_data_url(&buffer.data, "application/octet-stream"),
                    "byteLength": buffer.data.len(),
                }]),
            );
            document.insert("bufferViews".to_string(), Value::Array(buffer.views));
            document.insert("accessors".to_string(), Value::Array(buffer.accessors));
        }

        Ok(Value::Object(document))
    }
}

/// Accumulates keyframe data into buffer 0, tracking views and accessors.
#[derive(Default)]
struct BufferBuilder {
    data: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
}

impl BufferBuilder {
    /// Appends raw f32 data as one buffer view + accessor; returns the
    /// accessor index.
    fn push_floats(
        &mut self,
        floats: impl Iterator<Item = f32>,
        type_name: &str,
        count: usize,
        min_max: Option<(f32, f32)>,
    ) -> usize {
        let byte_offset = self.data.len();
        for f in floats {
            self.data.extend_from_slice(&f.to_le_bytes());
        }

        let view_index = self.views.len();
        self.views.push(json!({
            "buffer": 0,
            "byteOffset": byte_offset,
            "byteLength": self.data.len() - byte_offset,
        }));

        let mut accessor = serde_json::Map::new();
        accessor.insert("bufferView".to_string(), Value::from(view_index));
        accessor.insert("componentType".to_string(), Value::from(COMPONENT_FLOAT));
        accessor.insert("count".to_string(), Value::from(count));
        accessor.insert("type".to_string(), Value::from(type_name));
        if let Some((min, max)) = min_max {
            accessor.insert("min".to_string(), json!([min]));
            accessor.insert("max".to_string(), json!([max]));
        }

        let accessor_index = self.accessors.len();
        self.accessors.push(Value::Object(accessor));
        accessor_index
    }

    fn push_times(&mut self, times: &[f32]) -> usize {
        let min = times.first().copied().unwrap_or(0.0);
        let max = times.last().copied().unwrap_or(0.0);
        self.push_floats(
            times.iter().copied(),
            "SCALAR",
            times.len(),
            Some((min, max)),
        )
    }

    fn push_vec3_values(&mut self, track: &KeyframeTrack<glam::Vec3>) -> usize {
        self.push_floats(
            track.values.iter().flat_map(|v| v.to_array()),
            "VEC3",
            track.values.len(),
            None,
        )
    }

    fn push_quat_values(&mut self, track: &KeyframeTrack<glam::Quat>) -> usize {
        self.push_floats(
            track.values.iter().flat_map(|q| q.to_array()),
            "VEC4",
            track.values.len(),
            None,
        )
    }
}
