//! Headless harness driving the editor against the scripted engine.
//!
//! Used by the integration tests and the command-line driver to exercise
//! complete interaction flows without a rendering engine.

use glam::Vec3;
use shared::{MeshId, PickHit, PointerButton};

use crate::editor::{Editor, Mode};
use crate::engine::SceneEngine;
use crate::scripted::ScriptedEngine;

/// Convenience wrapper around `Editor<ScriptedEngine>`.
pub struct EditorHarness {
    pub editor: Editor<ScriptedEngine>,
}

impl EditorHarness {
    pub fn new() -> Self {
        Self {
            editor: Editor::new(ScriptedEngine::new()),
        }
    }

    // ── Drawing ──────────────────────────────────────────────

    /// Enter drawing mode (no-op if already drawing).
    pub fn start_drawing(&mut self) {
        if self.editor.mode() != Mode::Drawing {
            self.editor.toggle_draw();
        }
    }

    /// Left-click at ground coordinates (x, z).
    pub fn click(&mut self, x: f32, z: f32) {
        self.editor.pointer_down(x, z, PointerButton::Primary);
    }

    /// Right-click: closes or discards the in-progress footprint.
    pub fn right_click(&mut self) {
        self.editor.pointer_down(0.0, 0.0, PointerButton::Secondary);
    }

    /// Trace a footprint and close it.
    pub fn draw_footprint(&mut self, points: &[(f32, f32)]) {
        self.start_drawing();
        for &(x, z) in points {
            self.click(x, z);
        }
        self.right_click();
    }

    /// Extrude the current footprint, returning the new mesh id.
    pub fn extrude(&mut self) -> Option<MeshId> {
        self.editor.extrude()
    }

    // ── Editing ──────────────────────────────────────────────

    pub fn enter_move(&mut self) {
        if self.editor.mode() != Mode::Moving {
            self.editor.toggle_move();
        }
    }

    pub fn enter_resize(&mut self) {
        if self.editor.mode() != Mode::Resizing {
            self.editor.toggle_resize();
        }
    }

    pub fn press(&mut self, x: f32, z: f32) {
        self.editor.pointer_down(x, z, PointerButton::Primary);
    }

    pub fn drag_to(&mut self, x: f32, z: f32) {
        self.editor.pointer_move(x, z);
    }

    pub fn release(&mut self) {
        self.editor.pointer_up();
    }

    /// Press the marker for `vertex_index`, forcing the pick so overlapping
    /// top/bottom handles cannot shadow it.
    pub fn press_marker(&mut self, vertex_index: usize) {
        let id = match self.editor.vertex_markers().get(vertex_index) {
            Some(marker) => marker.clone(),
            None => return,
        };
        let point = self.editor.engine().origin(&id).unwrap_or(Vec3::ZERO);
        self.editor.engine_mut().push_pick(Some(PickHit {
            mesh: id,
            point,
        }));
        self.press(point.x, point.z);
    }

    // ── Inspection ───────────────────────────────────────────

    pub fn mesh_positions(&self, id: &MeshId) -> Option<Vec<f32>> {
        self.editor.engine().positions(id)
    }

    pub fn mesh_origin(&self, id: &MeshId) -> Option<Vec3> {
        self.editor.engine().origin(id)
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_idle_and_empty() {
        let harness = EditorHarness::new();
        assert_eq!(harness.editor.mode(), Mode::Idle);
        assert!(harness.editor.meshes().is_empty());
    }

    #[test]
    fn test_draw_footprint_closes_ring() {
        let mut harness = EditorHarness::new();
        harness.draw_footprint(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(harness.editor.capture().is_closed());
        assert_eq!(harness.editor.capture().unique_point_count(), 3);
    }

    #[test]
    fn test_draw_and_extrude() {
        let mut harness = EditorHarness::new();
        harness.draw_footprint(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let id = harness.extrude().unwrap();
        assert_eq!(harness.editor.meshes(), &[id]);
        assert_eq!(harness.editor.mode(), Mode::Idle);
    }
}
