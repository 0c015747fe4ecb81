use crate::scene::SkeletonKey;

/// Mesh component.
///
/// Geometry, material and skin-weight data are owned by the model
/// pipeline; the export core only needs the mesh's identity and its skin
/// binding so the serializer and the humanoid rig can reach the skeleton.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub skeleton: Option<SkeletonKey>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            skeleton: None,
        }
    }

    #[must_use]
    pub fn with_skeleton(name: &str, skeleton: SkeletonKey) -> Self {
        Self {
            name: name.to_string(),
            skeleton: Some(skeleton),
        }
    }
}
