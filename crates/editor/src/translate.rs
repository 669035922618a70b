//! Ground-plane relocation of the selected mesh.

use crate::editor::Mode;
use crate::engine::SceneEngine;
use crate::extrude::pin_to_ground;
use crate::select::Selection;

/// Drag state for Moving mode. The selected mesh itself lives in
/// [`Selection`]; this controller only owns the armed flag.
#[derive(Default)]
pub struct TranslateController {
    dragging: bool,
}

impl TranslateController {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Select under the cursor; on success snap the mesh to the pick point
    /// and start dragging.
    pub fn pointer_down<E: SceneEngine>(
        &mut self,
        engine: &mut E,
        selection: &mut Selection,
        mode: Mode,
        x: f32,
        y: f32,
    ) {
        let Some(hit) = engine.pick(x, y) else { return };
        if selection.select(engine, mode, &hit.mesh) {
            engine.set_origin(&hit.mesh, pin_to_ground(hit.point));
            self.dragging = true;
        }
    }

    /// Follow the cursor while dragging. Only ground hits move the mesh;
    /// anything else keeps the last valid position.
    pub fn pointer_move<E: SceneEngine>(
        &mut self,
        engine: &mut E,
        selection: &Selection,
        x: f32,
        y: f32,
    ) {
        if !self.dragging {
            return;
        }
        let Some(mesh) = selection.selected().cloned() else { return };
        let Some(hit) = engine.pick(x, y) else { return };
        if hit.mesh == engine.ground() {
            engine.set_origin(&mesh, pin_to_ground(hit.point));
        }
    }

    /// Stop dragging; the selection persists until mode exit.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Mode exit: release the drag state and the selection.
    pub fn exit<E: SceneEngine>(&mut self, engine: &mut E, selection: &mut Selection) {
        self.dragging = false;
        selection.deselect(engine);
    }
}
