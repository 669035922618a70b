//! Contract consumed from the rendering/picking engine.
//!
//! The editor core never draws anything itself: it asks a [`SceneEngine`]
//! implementation to create and mutate meshes, project the cursor into the
//! scene, and suspend camera control while a drag interaction owns the
//! pointer. `ScriptedEngine` (crate::scripted) is the headless
//! implementation used by tests and the command-line driver.

use glam::{Mat4, Vec3};
use shared::{Appearance, MeshId, PickHit};

/// CPU-side mesh payload: flat position triples plus a triangle index list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 3 floats per vertex
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `index`.
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.positions[index * 3],
            self.positions[index * 3 + 1],
            self.positions[index * 3 + 2],
        )
    }

    pub fn set_position(&mut self, index: usize, p: Vec3) {
        self.positions[index * 3] = p.x;
        self.positions[index * 3 + 1] = p.y;
        self.positions[index * 3 + 2] = p.z;
    }
}

/// Rendering/picking collaborator the editor is constructed around.
pub trait SceneEngine {
    /// Id of the ground plane mesh. Always present.
    fn ground(&self) -> MeshId;

    /// Project screen coordinates into the scene.
    fn pick(&mut self, screen_x: f32, screen_y: f32) -> Option<PickHit>;

    /// Register a pickable body mesh and return its id.
    fn create_mesh(&mut self, data: MeshData, appearance: Appearance) -> MeshId;

    /// Create a non-pickable guide polyline through `points`.
    fn create_guide(&mut self, points: &[Vec3]) -> MeshId;

    /// Create a small pickable marker centred on `position`.
    fn create_marker(&mut self, position: Vec3) -> MeshId;

    /// Remove a mesh, guide, or marker from the scene.
    fn dispose(&mut self, id: &MeshId);

    /// Position channel of a mesh's vertex buffer.
    fn positions(&self, id: &MeshId) -> Option<Vec<f32>>;

    /// Replace the position channel; the change must be visible immediately.
    fn set_positions(&mut self, id: &MeshId, positions: Vec<f32>);

    fn origin(&self, id: &MeshId) -> Option<Vec3>;

    fn set_origin(&mut self, id: &MeshId, origin: Vec3);

    /// Local-to-world transform of a mesh.
    fn world_transform(&self, id: &MeshId) -> Mat4;

    fn appearance(&self, id: &MeshId) -> Option<Appearance>;

    fn set_appearance(&mut self, id: &MeshId, appearance: Appearance);

    /// Attach or detach user camera control.
    fn set_camera_control(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_data_counts() {
        let mesh = MeshData {
            positions: vec![0.0; 9],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_mesh_data_position_roundtrip() {
        let mut mesh = MeshData {
            positions: vec![0.0; 6],
            indices: vec![],
        };
        mesh.set_position(1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.position(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.position(0), Vec3::ZERO);
    }
}
