//! Interaction orchestration: the mode state machine and event dispatch.
//!
//! The host event loop feeds pointer and key events into [`Editor`]; the
//! active mode decides which controller handles them. Mode enter/exit side
//! effects (guide cleanup, marker disposal, camera suspension) run exactly
//! once per transition.

use shared::{Appearance, MeshId, PointerButton};
use tracing::{debug, info, warn};

use crate::capture::FootprintCapture;
use crate::engine::SceneEngine;
use crate::extrude::{extrude_footprint, pin_to_ground, EXTRUDE_HEIGHT};
use crate::resize::ResizeController;
use crate::select::Selection;
use crate::translate::TranslateController;
use crate::triangulate::{EarcutTriangulator, Triangulator};

/// Mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
}

impl Mode {
    /// Textual readout for the UI shell.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "None",
            Mode::Drawing => "Drawing",
            Mode::Moving => "Moving",
            Mode::Resizing => "Resizing",
        }
    }
}

/// The editor core: owns the engine handle, the mode machine, and the
/// per-mode controllers.
pub struct Editor<E: SceneEngine> {
    engine: E,
    triangulator: Box<dyn Triangulator>,
    mode: Mode,
    capture: FootprintCapture,
    selection: Selection,
    translate: TranslateController,
    resize: ResizeController,
    meshes: Vec<MeshId>,
    extrude_height: f32,
}

impl<E: SceneEngine> Editor<E> {
    pub fn new(engine: E) -> Self {
        Self::with_triangulator(engine, Box::new(EarcutTriangulator))
    }

    pub fn with_triangulator(engine: E, triangulator: Box<dyn Triangulator>) -> Self {
        Self {
            engine,
            triangulator,
            mode: Mode::Idle,
            capture: FootprintCapture::default(),
            selection: Selection::default(),
            translate: TranslateController::default(),
            resize: ResizeController::default(),
            meshes: Vec::new(),
            extrude_height: EXTRUDE_HEIGHT,
        }
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn capture(&self) -> &FootprintCapture {
        &self.capture
    }

    pub fn selected_mesh(&self) -> Option<&MeshId> {
        self.selection.selected()
    }

    /// Vertex marker ids while resizing, in vertex-buffer order.
    pub fn vertex_markers(&self) -> &[MeshId] {
        self.resize.markers()
    }

    pub fn armed_vertex(&self) -> Option<usize> {
        self.resize.armed()
    }

    pub fn is_dragging(&self) -> bool {
        self.translate.is_dragging()
    }

    /// Ids of all extruded bodies, oldest first.
    pub fn meshes(&self) -> &[MeshId] {
        &self.meshes
    }

    /// Extrude is available only while drawing with at least 3 points.
    pub fn can_extrude(&self) -> bool {
        self.mode == Mode::Drawing && self.capture.unique_point_count() >= 3
    }

    // ── Mode commands ────────────────────────────────────────

    pub fn toggle_draw(&mut self) {
        if self.mode == Mode::Drawing {
            self.transition(Mode::Idle);
        } else {
            self.transition(Mode::Drawing);
        }
    }

    pub fn toggle_move(&mut self) {
        if self.mode == Mode::Moving {
            self.transition(Mode::Idle);
        } else {
            self.transition(Mode::Moving);
        }
    }

    pub fn toggle_resize(&mut self) {
        if self.mode == Mode::Resizing {
            self.transition(Mode::Idle);
        } else {
            self.transition(Mode::Resizing);
        }
    }

    /// Exit whatever mode is active. No-op when idle.
    pub fn cancel(&mut self) {
        self.transition(Mode::Idle);
    }

    fn transition(&mut self, next: Mode) {
        if self.mode == next {
            return;
        }
        // Exit side effects run exactly once for the mode being left.
        match self.mode {
            Mode::Idle => {}
            Mode::Drawing => self.capture.discard(&mut self.engine),
            Mode::Moving => {
                self.translate.exit(&mut self.engine, &mut self.selection);
                self.engine.set_camera_control(true);
            }
            Mode::Resizing => {
                self.resize.exit(&mut self.engine, &mut self.selection);
                self.engine.set_camera_control(true);
            }
        }
        debug!(from = self.mode.label(), to = next.label(), "mode transition");
        self.mode = next;
        match next {
            Mode::Idle | Mode::Drawing => {}
            Mode::Moving | Mode::Resizing => self.engine.set_camera_control(false),
        }
        // Entering Resizing with a selection already in place puts handles
        // on it right away.
        if next == Mode::Resizing {
            if let Some(mesh) = self.selection.selected().cloned() {
                self.resize.spawn_markers(&mut self.engine, &mesh);
            }
        }
    }

    // ── Pointer / key events ─────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        match self.mode {
            Mode::Idle => {}
            Mode::Drawing => self.drawing_pointer_down(x, y, button),
            Mode::Moving => self.translate.pointer_down(
                &mut self.engine,
                &mut self.selection,
                self.mode,
                x,
                y,
            ),
            Mode::Resizing => self.resize.pointer_down(
                &mut self.engine,
                &mut self.selection,
                self.mode,
                x,
                y,
            ),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        match self.mode {
            Mode::Moving => {
                self.translate
                    .pointer_move(&mut self.engine, &self.selection, x, y)
            }
            Mode::Resizing => self.resize.pointer_move(
                &mut self.engine,
                &self.selection,
                self.extrude_height,
                x,
                y,
            ),
            _ => {}
        }
    }

    pub fn pointer_up(&mut self) {
        match self.mode {
            Mode::Moving => self.translate.pointer_up(),
            Mode::Resizing => self.resize.pointer_up(),
            _ => {}
        }
    }

    /// Ctrl+Z / Ctrl+Y undo/redo chords.
    pub fn key_down(&mut self, key: &str, ctrl: bool) {
        if !ctrl {
            return;
        }
        match key {
            "z" => self.undo(),
            "y" => self.redo(),
            _ => {}
        }
    }

    fn drawing_pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        match button {
            PointerButton::Primary => {
                let Some(hit) = self.engine.pick(x, y) else { return };
                self.capture
                    .add_point(&mut self.engine, pin_to_ground(hit.point));
            }
            PointerButton::Secondary => {
                if !self.capture.close_loop(&mut self.engine) {
                    debug!("footprint discarded: fewer than 3 points at close");
                }
            }
        }
    }

    // ── Footprint commands ───────────────────────────────────

    pub fn undo(&mut self) {
        self.capture.undo(&mut self.engine);
    }

    pub fn redo(&mut self) {
        self.capture.redo(&mut self.engine);
    }

    /// Extrude the captured footprint into a prism body.
    ///
    /// Ignored unless drawing with at least 3 points. On success the guide
    /// is disposed, the capture cleared, and the editor returns to idle.
    pub fn extrude(&mut self) -> Option<MeshId> {
        if !self.can_extrude() {
            return None;
        }
        match extrude_footprint(
            self.capture.points(),
            self.extrude_height,
            self.triangulator.as_ref(),
        ) {
            Ok(data) => {
                let id = self.engine.create_mesh(data, Appearance::body());
                info!(
                    mesh = %id,
                    points = self.capture.unique_point_count(),
                    "extruded footprint"
                );
                self.meshes.push(id.clone());
                self.transition(Mode::Idle);
                Some(id)
            }
            Err(e) => {
                warn!("extrusion failed: {e}");
                None
            }
        }
    }
}
