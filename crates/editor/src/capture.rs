//! Incremental footprint capture with per-point undo/redo.

use glam::Vec3;
use shared::MeshId;

use crate::engine::SceneEngine;

/// Ordered point sequence being traced on the ground plane, together with
/// the redo stack and the disposable guide polyline.
///
/// Closing is an explicit append of the first point, so a closed ring
/// carries a duplicate last point.
#[derive(Default)]
pub struct FootprintCapture {
    points: Vec<Vec3>,
    redo_stack: Vec<Vec3>,
    guide: Option<MeshId>,
}

impl FootprintCapture {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of distinct ring points (closing duplicate not counted).
    pub fn unique_point_count(&self) -> usize {
        if self.is_closed() {
            self.points.len() - 1
        } else {
            self.points.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Append a directly drawn point.
    ///
    /// A direct draw invalidates whatever was undone before it, so the redo
    /// stack is cleared.
    pub fn add_point<E: SceneEngine>(&mut self, engine: &mut E, point: Vec3) {
        self.points.push(point);
        self.redo_stack.clear();
        self.rebuild_guide(engine);
    }

    /// Close the ring by appending a copy of the first point.
    ///
    /// With fewer than 3 points the in-progress footprint is discarded
    /// instead and false is returned.
    pub fn close_loop<E: SceneEngine>(&mut self, engine: &mut E) -> bool {
        if self.points.len() > 2 {
            let first = self.points[0];
            self.points.push(first);
            self.rebuild_guide(engine);
            true
        } else {
            self.discard(engine);
            false
        }
    }

    /// Move the last point onto the redo stack. No-op when empty.
    pub fn undo<E: SceneEngine>(&mut self, engine: &mut E) {
        if let Some(point) = self.points.pop() {
            self.redo_stack.push(point);
            self.rebuild_guide(engine);
        }
    }

    /// Re-append the most recently undone point. No-op when the redo stack
    /// is empty.
    pub fn redo<E: SceneEngine>(&mut self, engine: &mut E) {
        if let Some(point) = self.redo_stack.pop() {
            self.points.push(point);
            self.rebuild_guide(engine);
        }
    }

    /// Drop the in-progress footprint, both stacks, and the guide.
    pub fn discard<E: SceneEngine>(&mut self, engine: &mut E) {
        self.points.clear();
        self.redo_stack.clear();
        if let Some(guide) = self.guide.take() {
            engine.dispose(&guide);
        }
    }

    /// Replace the guide polyline with one through the current sequence.
    /// A single point has no polyline, so the guide only exists from the
    /// second point on.
    fn rebuild_guide<E: SceneEngine>(&mut self, engine: &mut E) {
        if let Some(guide) = self.guide.take() {
            engine.dispose(&guide);
        }
        if self.points.len() >= 2 {
            self.guide = Some(engine.create_guide(&self.points));
        }
    }
}
