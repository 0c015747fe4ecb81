//! Humanoid rig capability and the rest-pose retargeting adapter.

use std::collections::HashMap;

use glam::Quat;

use crate::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use crate::errors::Result;
use crate::export::vrma::HIPS_BONE;
use crate::scene::Scene;

/// A humanoid-bone-keyed track set, the intermediate form between generic
/// node tracks and a retargeted clip.
///
/// Insertion order of rotation tracks is preserved; setting a bone that is
/// already present replaces its track in place. Translation is only
/// carried by the root bone, so at most one translation track exists and
/// it is always keyed `"hips"`.
#[derive(Debug, Clone)]
pub struct HumanoidAnimation {
    pub duration: f32,
    rotation_tracks: Vec<(String, KeyframeTrack<Quat>)>,
    translation_track: Option<KeyframeTrack<glam::Vec3>>,
}

impl HumanoidAnimation {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            rotation_tracks: Vec::new(),
            translation_track: None,
        }
    }

    /// Stores a rotation track under a canonical bone name, replacing any
    /// earlier track for the same bone.
    pub fn set_rotation(&mut self, bone: &str, track: KeyframeTrack<Quat>) {
        if let Some(slot) = self
            .rotation_tracks
            .iter_mut()
            .find(|(name, _)| name == bone)
        {
            slot.1 = track;
        } else {
            self.rotation_tracks.push((bone.to_string(), track));
        }
    }

    /// Stores the hips translation track.
    pub fn set_hips_translation(&mut self, track: KeyframeTrack<glam::Vec3>) {
        self.translation_track = Some(track);
    }

    #[must_use]
    pub fn rotation(&self, bone: &str) -> Option<&KeyframeTrack<Quat>> {
        self.rotation_tracks
            .iter()
            .find(|(name, _)| name == bone)
            .map(|(_, track)| track)
    }

    pub fn rotations(&self) -> impl Iterator<Item = (&str, &KeyframeTrack<Quat>)> {
        self.rotation_tracks
            .iter()
            .map(|(name, track)| (name.as_str(), track))
    }

    #[must_use]
    pub fn hips_translation(&self) -> Option<&KeyframeTrack<glam::Vec3>> {
        self.translation_track.as_ref()
    }

    #[must_use]
    pub fn rotation_count(&self) -> usize {
        self.rotation_tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotation_tracks.is_empty() && self.translation_track.is_none()
    }
}

/// Narrow capability interface over a loaded model's humanoid rig.
///
/// `resolve_node` maps a canonical humanoid bone name to the scene-node
/// name that drives it; `bake` retargets a humanoid-keyed animation into a
/// standard clip expressed in scene-node space.
pub trait HumanoidRig: Send + Sync {
    fn resolve_node(&self, bone: &str) -> Option<&str>;

    fn bake(&self, animation: &HumanoidAnimation, clip_name: &str) -> Result<AnimationClip>;
}

struct RigBone {
    node_name: String,
    rest_rotation: Quat,
}

/// Retargeting adapter built from a skeleton's rest pose.
///
/// Baking composes each humanoid rotation sample with the target bone's
/// rest rotation (`rest * sample`), the standard normalized-to-raw
/// conversion; hips translation samples are scaled by
/// `translation_scale`. Tracks are resampled at their own keyframe times,
/// so cubic input flattens to linear output.
pub struct RestPoseRig {
    bones: HashMap<String, RigBone>,
    pub translation_scale: f32,
}

impl RestPoseRig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bones: HashMap::new(),
            translation_scale: 1.0,
        }
    }

    /// Builds a rig from a scene and a `node name -> canonical bone name`
    /// map, snapshotting each mapped node's current rotation as its rest
    /// rotation. Node names that resolve to no scene node are skipped.
    #[must_use]
    pub fn from_bone_map(scene: &Scene, bone_name_map: &HashMap<String, String>) -> Self {
        let mut rig = Self::new();
        for (node_name, bone_name) in bone_name_map {
            let Some(handle) = scene.find_node_by_name_global(node_name) else {
                log::debug!("Rig bone '{bone_name}' references unknown node '{node_name}'");
                continue;
            };
            let rest_rotation = scene
                .get_node(handle)
                .map_or(Quat::IDENTITY, |n| n.transform.rotation);
            rig.insert_bone(bone_name, node_name, rest_rotation);
        }
        rig
    }

    pub fn insert_bone(&mut self, bone: &str, node_name: &str, rest_rotation: Quat) {
        self.bones.insert(
            bone.to_string(),
            RigBone {
                node_name: node_name.to_string(),
                rest_rotation,
            },
        );
    }

    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

impl Default for RestPoseRig {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanoidRig for RestPoseRig {
    fn resolve_node(&self, bone: &str) -> Option<&str> {
        self.bones.get(bone).map(|b| b.node_name.as_str())
    }

    fn bake(&self, animation: &HumanoidAnimation, clip_name: &str) -> Result<AnimationClip> {
        let mut tracks = Vec::new();

        for (bone, track) in animation.rotations() {
            let Some(rig_bone) = self.bones.get(bone) else {
                log::debug!("Dropping rotation track for unresolvable bone '{bone}'");
                continue;
            };

            let values: Vec<Quat> = track
                .times
                .iter()
                .map(|&t| (rig_bone.rest_rotation * track.sample(t)).normalize())
                .collect();

            tracks.push(Track {
                meta: TrackMeta {
                    node_name: rig_bone.node_name.clone(),
                    target: TargetPath::Rotation,
                },
                data: TrackData::Quaternion(KeyframeTrack::new(
                    track.times.clone(),
                    values,
                    InterpolationMode::Linear,
                )),
            });
        }

        if let Some(track) = animation.hips_translation() {
            if let Some(rig_bone) = self.bones.get(HIPS_BONE) {
                let values: Vec<glam::Vec3> = track
                    .times
                    .iter()
                    .map(|&t| track.sample(t) * self.translation_scale)
                    .collect();

                tracks.push(Track {
                    meta: TrackMeta {
                        node_name: rig_bone.node_name.clone(),
                        target: TargetPath::Translation,
                    },
                    data: TrackData::Vector3(KeyframeTrack::new(
                        track.times.clone(),
                        values,
                        InterpolationMode::Linear,
                    )),
                });
            } else {
                log::debug!("Dropping hips translation: rig has no hips bone");
            }
        }

        Ok(AnimationClip::with_duration(
            clip_name.to_string(),
            animation.duration,
            tracks,
        ))
    }
}
