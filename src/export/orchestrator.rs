//! Clip selection, format branching and file delivery sequencing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::errors::RigkitError;
use crate::export::rig::HumanoidRig;
use crate::export::serializer::{SceneSerializer, SerializeOptions};
use crate::export::sink::FileSink;
use crate::export::stage::ExportStage;
use crate::export::{glb, vrma};
use crate::scene::{NodeHandle, Scene};
use crate::utils::data_url;

/// Per-model context captured at load time, consumed by the VRM branch.
#[derive(Clone, Default)]
pub struct VrmContext {
    /// Whether the loaded model was a VRM avatar.
    pub is_vrm: bool,
    /// The originally uploaded bytes, verbatim, as a data URL.
    pub source_data_url: Option<String>,
    /// The originally uploaded filename.
    pub original_filename: Option<String>,
    /// Scene-node name → canonical humanoid bone name.
    pub bone_name_map: Option<HashMap<String, String>>,
    /// The model's humanoid rig, used only to bake remapped tracks into
    /// scene-node space.
    pub rig: Option<Arc<dyn HumanoidRig>>,
}

/// What happened to one requested output file.
#[derive(Debug)]
pub struct FileOutcome {
    pub filename: String,
    pub result: Result<(), RigkitError>,
}

impl FileOutcome {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Owns the export-side clip selection and the VRM context, and drives
/// format-specific export branches.
#[derive(Default)]
pub struct ExportOrchestrator {
    selected_clips: Vec<AnimationClip>,
    vrm_context: VrmContext,
}

impl ExportOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection with deep clones of
    /// `all_clips[index]` for each index, in the given order.
    ///
    /// An empty `indices` produces an empty selection (and a subsequent
    /// `export` is a logged no-op).
    ///
    /// # Panics
    ///
    /// An out-of-range index is a caller contract violation and panics.
    pub fn select_clips(&mut self, all_clips: &[AnimationClip], indices: &[usize]) {
        self.selected_clips.clear();
        for &index in indices {
            self.selected_clips.push(all_clips[index].clone());
        }
    }

    #[must_use]
    pub fn selected_clips(&self) -> &[AnimationClip] {
        &self.selected_clips
    }

    /// Replaces the stored VRM context atomically.
    pub fn set_vrm_context(&mut self, context: VrmContext) {
        self.vrm_context = context;
    }

    /// Exports the selected clips plus `meshes` as `format`, delivering
    /// each produced file through `sink`.
    ///
    /// Branches:
    /// - `"glb"`: serialize the export subtree and pack one
    ///   `<filename_base>.glb`.
    /// - `"vrm"`: re-emit the original avatar bytes verbatim plus one
    ///   `.vrma` per selected clip; without VRM context data this falls
    ///   back to the `"glb"` branch in its entirety.
    /// - anything else (including `"fbx"`): warn and fall back to the
    ///   `"glb"` branch in its entirety.
    ///
    /// Meshes are re-parented into a transient export stage for the
    /// duration of the call and restored afterward on every path. No
    /// failure propagates out of this method; the returned list carries
    /// one outcome per attempted file.
    pub async fn export<S: SceneSerializer, D: FileSink>(
        &self,
        scene: &mut Scene,
        meshes: &[NodeHandle],
        filename_base: &str,
        format: &str,
        serializer: &S,
        sink: &mut D,
    ) -> Vec<FileOutcome> {
        if self.selected_clips.is_empty() {
            log::warn!("No animation clips selected; nothing to export");
            return Vec::new();
        }

        let stage = ExportStage::begin(scene, meshes);
        let root = stage.root();

        let mut outcomes = Vec::new();
        match format {
            "glb" => {
                outcomes.push(
                    self.export_glb_branch(scene, root, filename_base, serializer, sink)
                        .await,
                );
            }
            "vrm" => {
                if let (true, Some(source)) = (
                    self.vrm_context.is_vrm,
                    self.vrm_context.source_data_url.clone(),
                ) {
                    self.export_vrm_branch(&source, filename_base, serializer, sink, &mut outcomes)
                        .await;
                } else {
                    log::warn!("No VRM context detected. Exporting GLB instead.");
                    outcomes.push(
                        self.export_glb_branch(scene, root, filename_base, serializer, sink)
                            .await,
                    );
                }
            }
            other => {
                log::warn!("Export format '{other}' is not supported natively. Exporting GLB instead.");
                outcomes.push(
                    self.export_glb_branch(scene, root, filename_base, serializer, sink)
                        .await,
                );
            }
        }

        // Restore original parenting on every path; failures are logged
        // inside end() and the meshes stay reachable from the root set.
        let _restore_failures = stage.end(scene);

        outcomes
    }

    async fn export_glb_branch<S: SceneSerializer, D: FileSink>(
        &self,
        scene: &Scene,
        root: NodeHandle,
        filename_base: &str,
        serializer: &S,
        sink: &mut D,
    ) -> FileOutcome {
        let filename = format!("{filename_base}.glb");
        let options = SerializeOptions {
            binary: true,
            only_visible: false,
        };

        let document = match serializer
            .serialize(scene, root, &self.selected_clips, &options)
            .await
        {
            Ok(document) => document,
            Err(e) => {
                let err = RigkitError::SerializationFailed(e.to_string());
                log::error!("Error exporting GLB: {err}");
                return FileOutcome {
                    filename,
                    result: Err(err),
                };
            }
        };

        match glb::pack(document) {
            Ok(bytes) => deliver_file(sink, &bytes, filename).await,
            Err(e) => {
                log::error!("Error exporting GLB: {e}");
                FileOutcome {
                    filename,
                    result: Err(e),
                }
            }
        }
    }

    async fn export_vrm_branch<S: SceneSerializer, D: FileSink>(
        &self,
        source_data_url: &str,
        filename_base: &str,
        serializer: &S,
        sink: &mut D,
        outcomes: &mut Vec<FileOutcome>,
    ) {
        // (a) The original avatar is never re-serialized; re-emitting the
        // stored upload preserves full material fidelity.
        let filename = self.vrm_output_filename(filename_base);
        let outcome = match data_url::decode_data_url(source_data_url) {
            Ok(bytes) => deliver_file(sink, &bytes, filename).await,
            Err(e) => {
                log::warn!("Failed to export original VRM avatar from source data URL: {e}");
                FileOutcome {
                    filename,
                    result: Err(e),
                }
            }
        };
        outcomes.push(outcome);

        // (b) One .vrma per selected clip; a failing clip does not block
        // the remaining clips.
        let empty_map = HashMap::new();
        let bone_map = self.vrm_context.bone_name_map.as_ref().unwrap_or(&empty_map);

        for clip in &self.selected_clips {
            let outcome = match self.vrm_context.rig.as_deref() {
                None => FileOutcome {
                    filename: vrma::sanitize_clip_filename(&clip.name),
                    result: Err(RigkitError::BakeFailed {
                        clip: clip.name.clone(),
                        reason: "no humanoid rig available".to_string(),
                    }),
                },
                Some(rig) => match vrma::export_clip(clip, bone_map, rig, serializer).await {
                    Ok((filename, bytes)) => deliver_file(sink, &bytes, filename).await,
                    Err(e) => FileOutcome {
                        filename: vrma::sanitize_clip_filename(&clip.name),
                        result: Err(e),
                    },
                },
            };

            if let Err(e) = &outcome.result {
                log::warn!("VRMA export failed for clip '{}': {e}", clip.name);
            }
            outcomes.push(outcome);
        }
    }

    /// Output name for the re-emitted avatar: the original filename with a
    /// `.vrm` suffix ensured, falling back to `<filename_base>.vrm`.
    fn vrm_output_filename(&self, filename_base: &str) -> String {
        match self.vrm_context.original_filename.as_deref() {
            Some(name) if name.to_lowercase().ends_with(".vrm") => name.to_string(),
            Some(name) => format!("{name}.vrm"),
            None => format!("{filename_base}.vrm"),
        }
    }
}

async fn deliver_file<D: FileSink>(sink: &mut D, bytes: &[u8], filename: String) -> FileOutcome {
    match sink.deliver(bytes, &filename).await {
        Ok(()) => FileOutcome {
            filename,
            result: Ok(()),
        },
        Err(e) => {
            let err = RigkitError::DeliveryFailed {
                filename: filename.clone(),
                reason: e.to_string(),
            };
            log::error!("{err}");
            FileOutcome {
                filename,
                result: Err(err),
            }
        }
    }
}
