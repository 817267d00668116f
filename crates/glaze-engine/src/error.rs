//! Error taxonomy shared by the composition and scene layers.
//!
//! Per-node failures (`ResourceError`, `GeometryError`) are non-fatal: the node is
//! skipped and reported through the scene sink. `LinkError` aborts the renderer.

use std::fmt;

/// A named external resource (texture) could not be provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    NotFound(String),
    Decode { name: String, reason: String },
    /// The image exceeds the device's 2D texture limit.
    TooLarge { name: String, width: u32, height: u32, max: u32 },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(name) => write!(f, "resource not found: {name}"),
            ResourceError::Decode { name, reason } => {
                write!(f, "failed to decode resource {name}: {reason}")
            }
            ResourceError::TooLarge { name, width, height, max } => {
                write!(f, "texture {name} is {width}x{height}, the device allows {max}x{max}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Geometry could not be produced or is unusable as tessellation patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    NotFound(String),
    Malformed(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NotFound(key) => write!(f, "geometry not found: {key}"),
            GeometryError::Malformed(reason) => write!(f, "malformed geometry: {reason}"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// The composed set of shading functions was rejected.
#[derive(Debug)]
pub struct LinkError {
    pub functions: Vec<String>,
    pub reason: String,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to link material functions [{}]: {}",
            self.functions.join(", "),
            self.reason
        )
    }
}

impl std::error::Error for LinkError {}

/// Why a render node could not be set up or updated.
///
/// `Link` is not per-node: the registry turns it into `SceneError::PipelineLink`.
#[derive(Debug)]
pub enum SetupError {
    Resource(ResourceError),
    Geometry(GeometryError),
    Link(LinkError),
    /// An update supplied a material list whose functions differ from the composed ones.
    CompositionChanged { expected: Vec<String>, found: Vec<String> },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Resource(e) => write!(f, "{e}"),
            SetupError::Geometry(e) => write!(f, "{e}"),
            SetupError::Link(e) => write!(f, "{e}"),
            SetupError::CompositionChanged { expected, found } => write!(
                f,
                "material functions changed from [{}] to [{}]",
                expected.join(", "),
                found.join(", ")
            ),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Resource(e) => Some(e),
            SetupError::Geometry(e) => Some(e),
            SetupError::Link(e) => Some(e),
            SetupError::CompositionChanged { .. } => None,
        }
    }
}

impl From<ResourceError> for SetupError {
    fn from(e: ResourceError) -> Self {
        SetupError::Resource(e)
    }
}

impl From<GeometryError> for SetupError {
    fn from(e: GeometryError) -> Self {
        SetupError::Geometry(e)
    }
}

impl From<LinkError> for SetupError {
    fn from(e: LinkError) -> Self {
        SetupError::Link(e)
    }
}

/// Failure of a whole scene update tick.
#[derive(Debug)]
pub enum SceneError {
    /// Two descriptors in one tick share an identity. Nothing was applied.
    DuplicateIdentity(String),
    /// A node's composition failed to link. The renderer cannot continue.
    PipelineLink { id: String, source: LinkError },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DuplicateIdentity(id) => write!(f, "duplicate mesh identity: {id}"),
            SceneError::PipelineLink { id, source } => {
                write!(f, "mesh {id}: {source}")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::DuplicateIdentity(_) => None,
            SceneError::PipelineLink { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_error_names_functions() {
        let e = LinkError {
            functions: vec!["color_material".into(), "fresnel_material".into()],
            reason: "bad".into(),
        };
        assert_eq!(
            e.to_string(),
            "failed to link material functions [color_material, fresnel_material]: bad"
        );
    }

    #[test]
    fn pipeline_link_names_the_mesh() {
        let e = SceneError::PipelineLink {
            id: "card".into(),
            source: LinkError {
                functions: vec!["normal_material".into()],
                reason: "bad".into(),
            },
        };
        assert_eq!(e.to_string(), "mesh card: failed to link material functions [normal_material]: bad");
        let source = std::error::Error::source(&e).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("failed to link material functions [normal_material]: bad"));
    }

    #[test]
    fn oversized_texture_reports_the_limit() {
        let e = SetupError::from(ResourceError::TooLarge {
            name: "wood".into(),
            width: 9000,
            height: 512,
            max: 8192,
        });
        assert_eq!(e.to_string(), "texture wood is 9000x512, the device allows 8192x8192");
        assert!(std::error::Error::source(&e).is_some());
    }
}
