#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;
pub mod export;
pub mod scene;
pub mod utils;

pub use animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
pub use errors::{Result, RigkitError};
pub use export::glb;
pub use export::orchestrator::{ExportOrchestrator, FileOutcome, VrmContext};
pub use export::rig::{HumanoidAnimation, HumanoidRig, RestPoseRig};
pub use export::serializer::{JsonSceneSerializer, SceneSerializer, SerializeOptions};
pub use export::sink::{DirectorySink, FileSink};
pub use export::stage::ExportStage;
pub use scene::{Mesh, Node, NodeHandle, Scene, Skeleton, Transform};
