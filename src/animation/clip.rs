use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

/// A complete track: target metadata plus keyframe data.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    /// The wire-form track name, `"<node>.<property>"`.
    #[must_use]
    pub fn target_name(&self) -> String {
        format!("{}.{}", self.meta.node_name, self.meta.target.property_name())
    }

    /// Last keyframe time of the track, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match &self.data {
            TrackData::Vector3(t) => t.times.last().copied().unwrap_or(0.0),
            TrackData::Quaternion(t) => t.times.last().copied().unwrap_or(0.0),
        }
    }
}

/// A named, fixed-duration collection of keyframe tracks.
///
/// `Clone` deep-copies every track's keyframe vectors; a cloned clip never
/// aliases the storage of the clip it was cloned from.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip whose duration is the latest keyframe time across
    /// all tracks.
    #[must_use]
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(Track::end_time)
            .fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            tracks,
        }
    }

    /// Creates a clip with an explicit duration, which may exceed the last
    /// keyframe time (trailing hold).
    #[must_use]
    pub fn with_duration(name: String, duration: f32, tracks: Vec<Track>) -> Self {
        Self {
            name,
            duration,
            tracks,
        }
    }
}
