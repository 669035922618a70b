use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier of a mesh owned by the rendering engine
pub type MeshId = String;

/// Mouse button discriminator delivered with pointer-down events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// Successful pick query result: the mesh under the cursor and the picked
/// point on its surface, in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickHit {
    pub mesh: MeshId,
    pub point: Vec3,
}

/// Value snapshot of a mesh's surface appearance
///
/// Selection keeps the pre-selection snapshot and writes it back on
/// deselect, so no back-reference into engine-owned material state is
/// needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub color: [f32; 3],
    pub alpha: f32,
}

impl Appearance {
    /// Default appearance of extruded bodies
    pub const fn body() -> Self {
        Self {
            color: [0.5, 0.5, 1.0],
            alpha: 1.0,
        }
    }

    /// Highlight applied to the selected mesh
    pub const fn highlight() -> Self {
        Self {
            color: [0.5, 0.5, 0.5],
            alpha: 0.8,
        }
    }

    /// Guide polyline drawn while a footprint is being captured
    pub const fn guide() -> Self {
        Self {
            color: [0.0, 1.0, 0.0],
            alpha: 1.0,
        }
    }

    /// Vertex drag markers
    pub const fn marker() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
        }
    }

    /// Ground plane
    pub const fn ground() -> Self {
        Self {
            color: [0.4, 0.4, 0.4],
            alpha: 1.0,
        }
    }
}
