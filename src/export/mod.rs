//! Export pipeline module
//!
//! Turns selected animation clips plus a set of skinned mesh nodes into
//! downloadable container files:
//! - `glb`: manual GLB (binary glTF) container assembly
//! - `stage`: scoped re-parenting of meshes around the export boundary
//! - `vrma` / `rig`: humanoid track remapping and retargeting
//! - `serializer`: the generic scene-serializer boundary
//! - `sink`: the file-delivery boundary
//! - `orchestrator`: clip selection and format branching

pub mod glb;
pub mod orchestrator;
pub mod rig;
pub mod serializer;
pub mod sink;
pub mod stage;
pub mod vrma;

pub use orchestrator::{ExportOrchestrator, FileOutcome, VrmContext};
pub use rig::{HumanoidAnimation, HumanoidRig, RestPoseRig};
pub use serializer::{JsonSceneSerializer, SceneSerializer, SerializeOptions};
pub use sink::{DirectorySink, FileSink};
pub use stage::ExportStage;
