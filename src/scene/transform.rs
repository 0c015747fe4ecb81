use glam::{Affine3A, EulerRot, Quat, Vec3};

/// TRS transform component.
///
/// Holds the node's local position, rotation and scale. The export core
/// serializes transforms in local space, so no world-matrix cache is kept
/// here; [`Transform::local_matrix`] composes the affine on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Composes the local affine matrix from TRS.
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// True when the transform still carries the identity TRS.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation == Quat::IDENTITY && self.scale == Vec3::ONE
    }

    /// Helper: set rotation from XYZ euler angles.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
