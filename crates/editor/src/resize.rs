//! Per-vertex drag handles for reshaping an extruded prism.
//!
//! One marker is spawned per mesh vertex, in vertex-buffer order, so a
//! marker's position in `markers` doubles as the vertex index it edits. A
//! single armed index feeds the one persistent pointer-move path; arming a
//! marker replaces whatever was armed before it.

use glam::Vec3;
use shared::MeshId;
use tracing::debug;

use crate::editor::Mode;
use crate::engine::SceneEngine;
use crate::select::Selection;

/// y level written to odd (bottom) vertices while dragging, keeping the
/// body above the ground surface.
pub const BOTTOM_OFFSET: f32 = 0.1;

#[derive(Default)]
pub struct ResizeController {
    markers: Vec<MeshId>,
    armed: Option<usize>,
}

impl ResizeController {
    /// Marker ids in vertex-buffer order.
    pub fn markers(&self) -> &[MeshId] {
        &self.markers
    }

    /// The vertex index currently receiving drags, if any.
    pub fn armed(&self) -> Option<usize> {
        self.armed
    }

    /// Spawn one marker per vertex of `mesh` at its world-space position.
    /// Any previous markers are disposed first.
    pub fn spawn_markers<E: SceneEngine>(&mut self, engine: &mut E, mesh: &MeshId) {
        self.dispose_markers(engine);
        let Some(positions) = engine.positions(mesh) else { return };
        let world = engine.world_transform(mesh);
        for triple in positions.chunks_exact(3) {
            let local = Vec3::new(triple[0], triple[1], triple[2]);
            let marker = engine.create_marker(world.transform_point3(local));
            self.markers.push(marker);
        }
        debug!(count = self.markers.len(), "spawned vertex markers");
    }

    /// Arm the picked marker, or (re-)select the picked body.
    pub fn pointer_down<E: SceneEngine>(
        &mut self,
        engine: &mut E,
        selection: &mut Selection,
        mode: Mode,
        x: f32,
        y: f32,
    ) {
        let Some(hit) = engine.pick(x, y) else { return };
        if let Some(index) = self.marker_index(&hit.mesh) {
            // A new marker click replaces the previously armed vertex.
            self.armed = Some(index);
            return;
        }
        let previous = selection.selected().cloned();
        if selection.select(engine, mode, &hit.mesh) && previous.as_ref() != Some(&hit.mesh) {
            self.armed = None;
            self.spawn_markers(engine, &hit.mesh);
        }
    }

    /// Drag the armed vertex: follow ground hits, pin y by top/bottom
    /// parity, and push the edit into the mesh immediately.
    pub fn pointer_move<E: SceneEngine>(
        &mut self,
        engine: &mut E,
        selection: &Selection,
        height: f32,
        x: f32,
        y: f32,
    ) {
        let Some(index) = self.armed else { return };
        let Some(mesh) = selection.selected().cloned() else { return };
        let Some(marker) = self.markers.get(index).cloned() else { return };
        let Some(hit) = engine.pick(x, y) else { return };
        if hit.mesh != engine.ground() {
            return;
        }
        // Even offsets are top vertices, odd offsets their bottom pair.
        let level = if index % 2 == 0 { height } else { BOTTOM_OFFSET };
        let point = Vec3::new(hit.point.x, level, hit.point.z);
        engine.set_origin(&marker, point);
        if let Some(mut positions) = engine.positions(&mesh) {
            if positions.len() >= index * 3 + 3 {
                positions[index * 3] = point.x;
                positions[index * 3 + 1] = point.y;
                positions[index * 3 + 2] = point.z;
                engine.set_positions(&mesh, positions);
            }
        }
    }

    /// Disarm the dragged vertex.
    pub fn pointer_up(&mut self) {
        self.armed = None;
    }

    /// Mode exit: markers go away, nothing stays armed, selection is
    /// released.
    pub fn exit<E: SceneEngine>(&mut self, engine: &mut E, selection: &mut Selection) {
        self.dispose_markers(engine);
        self.armed = None;
        selection.deselect(engine);
    }

    fn marker_index(&self, id: &MeshId) -> Option<usize> {
        self.markers.iter().position(|m| m == id)
    }

    fn dispose_markers<E: SceneEngine>(&mut self, engine: &mut E) {
        for marker in self.markers.drain(..) {
            engine.dispose(&marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MeshData, SceneEngine};
    use crate::extrude::{extrude_footprint, GROUND_OFFSET};
    use crate::scripted::ScriptedEngine;
    use crate::triangulate::EarcutTriangulator;
    use shared::{Appearance, PickHit};

    fn engine_with_selected_body() -> (ScriptedEngine, Selection, MeshId) {
        let ring = vec![
            Vec3::new(0.0, GROUND_OFFSET, 0.0),
            Vec3::new(1.0, GROUND_OFFSET, 0.0),
            Vec3::new(1.0, GROUND_OFFSET, 1.0),
            Vec3::new(0.0, GROUND_OFFSET, 1.0),
        ];
        let data: MeshData = extrude_footprint(&ring, 1.0, &EarcutTriangulator).unwrap();
        let mut engine = ScriptedEngine::new();
        let id = engine.create_mesh(data, Appearance::body());
        let mut selection = Selection::default();
        assert!(selection.select(&mut engine, Mode::Resizing, &id));
        (engine, selection, id)
    }

    fn arm(
        resize: &mut ResizeController,
        engine: &mut ScriptedEngine,
        selection: &mut Selection,
        index: usize,
    ) {
        let id = resize.markers()[index].clone();
        let point = engine.origin(&id).unwrap_or(Vec3::ZERO);
        engine.push_pick(Some(PickHit { mesh: id, point }));
        resize.pointer_down(engine, selection, Mode::Resizing, point.x, point.z);
    }

    #[test]
    fn test_one_marker_per_vertex() {
        let (mut engine, _selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        assert_eq!(resize.markers().len(), 8);
        assert_eq!(engine.marker_count(), 8);
    }

    #[test]
    fn test_markers_at_world_positions() {
        let (mut engine, _selection, id) = engine_with_selected_body();
        engine.set_origin(&id, Vec3::new(2.0, 0.0, 0.0));
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        // Vertex 0 is the top of ring point (0, 0): world x shifted by 2.
        let marker0 = engine.origin(&resize.markers()[0]).unwrap();
        assert_eq!(marker0, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_drag_updates_single_vertex_and_marker() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        let before = engine.positions(&id).unwrap();

        arm(&mut resize, &mut engine, &mut selection, 3);
        assert_eq!(resize.armed(), Some(3));
        resize.pointer_move(&mut engine, &selection, 1.0, -1.0, -1.0);

        let after = engine.positions(&id).unwrap();
        // Odd index: dragged to the near-ground level.
        assert_eq!(&after[9..12], &[-1.0, BOTTOM_OFFSET, -1.0]);
        for i in 0..before.len() {
            if !(9..12).contains(&i) {
                assert_eq!(after[i], before[i], "vertex data at {i} changed");
            }
        }
        let marker = engine.origin(&resize.markers()[3]).unwrap();
        assert_eq!(marker, Vec3::new(-1.0, BOTTOM_OFFSET, -1.0));
    }

    #[test]
    fn test_drag_even_vertex_pins_to_height() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        arm(&mut resize, &mut engine, &mut selection, 2);
        resize.pointer_move(&mut engine, &selection, 1.0, 2.0, -1.5);
        let positions = engine.positions(&id).unwrap();
        assert_eq!(&positions[6..9], &[2.0, 1.0, -1.5]);
    }

    #[test]
    fn test_arming_is_exclusive() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        arm(&mut resize, &mut engine, &mut selection, 2);
        arm(&mut resize, &mut engine, &mut selection, 5);
        assert_eq!(resize.armed(), Some(5));
    }

    #[test]
    fn test_pointer_up_disarms() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        arm(&mut resize, &mut engine, &mut selection, 1);
        resize.pointer_up();
        let before = engine.positions(&id).unwrap();
        resize.pointer_move(&mut engine, &selection, 1.0, -1.0, -1.0);
        assert_eq!(engine.positions(&id).unwrap(), before);
    }

    #[test]
    fn test_drag_ignores_non_ground_hits() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        arm(&mut resize, &mut engine, &mut selection, 3);
        let before = engine.positions(&id).unwrap();
        // Cursor over the body itself, not the ground.
        resize.pointer_move(&mut engine, &selection, 1.0, 0.5, 0.5);
        assert_eq!(engine.positions(&id).unwrap(), before);
    }

    #[test]
    fn test_exit_disposes_markers_and_selection() {
        let (mut engine, mut selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        arm(&mut resize, &mut engine, &mut selection, 0);
        resize.exit(&mut engine, &mut selection);
        assert!(resize.markers().is_empty());
        assert!(resize.armed().is_none());
        assert_eq!(engine.marker_count(), 0);
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_respawn_replaces_markers() {
        let (mut engine, _selection, id) = engine_with_selected_body();
        let mut resize = ResizeController::default();
        resize.spawn_markers(&mut engine, &id);
        let first = resize.markers().to_vec();
        resize.spawn_markers(&mut engine, &id);
        assert_eq!(engine.marker_count(), 8);
        for old in &first {
            assert!(!engine.contains(old), "stale marker survived respawn");
        }
    }
}
