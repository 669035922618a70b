//! Selected-mesh tracking with appearance restore.

use shared::{Appearance, MeshId};
use tracing::debug;

use crate::editor::Mode;
use crate::engine::SceneEngine;

/// At most one mesh is selected at a time; its pre-selection appearance is
/// kept as a value snapshot and written back on deselect.
#[derive(Default)]
pub struct Selection {
    selected: Option<MeshId>,
    restore: Option<Appearance>,
}

impl Selection {
    pub fn selected(&self) -> Option<&MeshId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &MeshId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Try to select `candidate`.
    ///
    /// Ground picks and requests outside Moving/Resizing are rejected with
    /// no state change. A previously selected mesh gets its appearance back
    /// before the highlight moves on, so only one mesh ever carries it.
    pub fn select<E: SceneEngine>(
        &mut self,
        engine: &mut E,
        mode: Mode,
        candidate: &MeshId,
    ) -> bool {
        if !matches!(mode, Mode::Moving | Mode::Resizing) {
            return false;
        }
        if *candidate == engine.ground() {
            return false;
        }
        if engine.appearance(candidate).is_none() {
            return false;
        }
        self.deselect(engine);
        let Some(original) = engine.appearance(candidate) else {
            return false;
        };
        self.restore = Some(original);
        engine.set_appearance(candidate, Appearance::highlight());
        self.selected = Some(candidate.clone());
        debug!(mesh = %candidate, "mesh selected");
        true
    }

    /// Restore the selected mesh's appearance and clear the selection.
    /// No-op when nothing is selected.
    pub fn deselect<E: SceneEngine>(&mut self, engine: &mut E) {
        if let (Some(id), Some(appearance)) = (self.selected.take(), self.restore.take()) {
            engine.set_appearance(&id, appearance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MeshData, SceneEngine};
    use crate::scripted::ScriptedEngine;

    fn engine_with_mesh() -> (ScriptedEngine, MeshId) {
        let mut engine = ScriptedEngine::new();
        let id = engine.create_mesh(
            MeshData {
                positions: vec![0.0; 9],
                indices: vec![0, 1, 2],
            },
            Appearance::body(),
        );
        (engine, id)
    }

    #[test]
    fn test_select_applies_highlight() {
        let (mut engine, id) = engine_with_mesh();
        let mut selection = Selection::default();
        assert!(selection.select(&mut engine, Mode::Moving, &id));
        assert!(selection.is_selected(&id));
        assert_eq!(engine.appearance(&id), Some(Appearance::highlight()));
    }

    #[test]
    fn test_deselect_restores_appearance() {
        let (mut engine, id) = engine_with_mesh();
        let mut selection = Selection::default();
        selection.select(&mut engine, Mode::Resizing, &id);
        selection.deselect(&mut engine);
        assert!(selection.selected().is_none());
        assert_eq!(engine.appearance(&id), Some(Appearance::body()));
    }

    #[test]
    fn test_deselect_on_empty_noop() {
        let mut engine = ScriptedEngine::new();
        let mut selection = Selection::default();
        selection.deselect(&mut engine);
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_rejects_outside_move_and_resize() {
        let (mut engine, id) = engine_with_mesh();
        let mut selection = Selection::default();
        assert!(!selection.select(&mut engine, Mode::Idle, &id));
        assert!(!selection.select(&mut engine, Mode::Drawing, &id));
        assert!(selection.selected().is_none());
        assert_eq!(engine.appearance(&id), Some(Appearance::body()));
    }

    #[test]
    fn test_rejects_ground() {
        let mut engine = ScriptedEngine::new();
        let mut selection = Selection::default();
        let ground = engine.ground();
        assert!(!selection.select(&mut engine, Mode::Moving, &ground));
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_rejects_unknown_mesh() {
        let mut engine = ScriptedEngine::new();
        let mut selection = Selection::default();
        assert!(!selection.select(&mut engine, Mode::Moving, &"missing".to_string()));
    }

    #[test]
    fn test_switching_restores_previous() {
        let (mut engine, a) = engine_with_mesh();
        let b = engine.create_mesh(
            MeshData {
                positions: vec![0.0; 9],
                indices: vec![0, 1, 2],
            },
            Appearance::body(),
        );
        let mut selection = Selection::default();
        selection.select(&mut engine, Mode::Moving, &a);
        selection.select(&mut engine, Mode::Moving, &b);
        // Only one highlight at a time.
        assert_eq!(engine.appearance(&a), Some(Appearance::body()));
        assert_eq!(engine.appearance(&b), Some(Appearance::highlight()));
        assert!(selection.is_selected(&b));
    }

    #[test]
    fn test_reselecting_same_mesh_keeps_snapshot() {
        let (mut engine, id) = engine_with_mesh();
        let mut selection = Selection::default();
        selection.select(&mut engine, Mode::Moving, &id);
        // The restore token must stay the original appearance, not the
        // highlight applied in between.
        selection.select(&mut engine, Mode::Moving, &id);
        selection.deselect(&mut engine);
        assert_eq!(engine.appearance(&id), Some(Appearance::body()));
    }
}
