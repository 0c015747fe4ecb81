/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
    Scale,       // Maps to transform.scale
}

impl TargetPath {
    /// The property suffix used in wire-form track names
    /// (`"Hips.position"`, `"Spine.quaternion"`).
    #[must_use]
    pub fn property_name(self) -> &'static str {
        match self {
            TargetPath::Translation => "position",
            TargetPath::Rotation => "quaternion",
            TargetPath::Scale => "scale",
        }
    }

    /// The channel target path used in glTF animation JSON.
    #[must_use]
    pub fn gltf_path(self) -> &'static str {
        match self {
            TargetPath::Translation => "translation",
            TargetPath::Rotation => "rotation",
            TargetPath::Scale => "scale",
        }
    }

    /// Parses a wire-form track name of the shape `"<node>.<property>"`.
    ///
    /// Returns `None` for names with fewer than two `.`-separated parts,
    /// an empty node part, or an unrecognized property. Extra parts after
    /// the property are ignored, matching the lenient split of typical
    /// exporters.
    #[must_use]
    pub fn parse_track_name(name: &str) -> Option<(&str, TargetPath)> {
        let mut parts = name.split('.');
        let node = parts.next()?;
        let property = parts.next()?;
        if node.is_empty() || property.is_empty() {
            return None;
        }

        let target = match property {
            "position" | "translation" => TargetPath::Translation,
            "quaternion" | "rotation" => TargetPath::Rotation,
            "scale" => TargetPath::Scale,
            _ => return None,
        };
        Some((node, target))
    }
}
