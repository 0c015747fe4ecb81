use uuid::Uuid;

use crate::scene::NodeHandle;

/// An ordered bone list.
///
/// `bones[i]` corresponds to joint `i` of the skinned mesh. The nodes
/// referenced here live in the owning [`Scene`](crate::scene::Scene); their
/// transforms at load time are the rest pose the humanoid rig retargets
/// against.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    /// Bone list: ordered array, corresponds to joint index in the skin
    pub bones: Vec<NodeHandle>,

    /// Root bone index (usually 0)
    pub(crate) root_bone_index: usize,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: Vec<NodeHandle>, root_bone_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            root_bone_index,
        }
    }

    /// Gets the root bone node handle.
    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<NodeHandle> {
        self.bones.get(self.root_bone_index).copied()
    }
}
