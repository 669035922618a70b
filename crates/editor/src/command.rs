//! JSON command protocol for driving the editor headlessly.

use serde::{Deserialize, Serialize};
use shared::PointerButton;

use crate::editor::Editor;
use crate::engine::SceneEngine;

/// A command the driver can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Toggle drawing mode.
    ToggleDraw,
    /// Toggle moving mode.
    ToggleMove,
    /// Toggle resizing mode.
    ToggleResize,
    /// Extrude the captured footprint.
    Extrude,
    /// Undo the last captured point.
    Undo,
    /// Redo the last undone point.
    Redo,
    /// Exit the active mode.
    Cancel,
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
    },
    /// Report mode, capture, and scene state.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command against the editor.
pub fn execute_command<E: SceneEngine>(
    editor: &mut Editor<E>,
    cmd: EditorCommand,
) -> CommandResponse {
    match cmd {
        EditorCommand::ToggleDraw => {
            editor.toggle_draw();
            mode_response(editor)
        }

        EditorCommand::ToggleMove => {
            editor.toggle_move();
            mode_response(editor)
        }

        EditorCommand::ToggleResize => {
            editor.toggle_resize();
            mode_response(editor)
        }

        EditorCommand::Extrude => {
            let mesh = editor.extrude();
            CommandResponse::ok_with_data(serde_json::json!({ "extruded": mesh }))
        }

        EditorCommand::Undo => {
            editor.undo();
            points_response(editor)
        }

        EditorCommand::Redo => {
            editor.redo();
            points_response(editor)
        }

        EditorCommand::Cancel => {
            editor.cancel();
            mode_response(editor)
        }

        EditorCommand::PointerDown { x, y, button } => {
            editor.pointer_down(x, y, button);
            CommandResponse::ok()
        }

        EditorCommand::PointerMove { x, y } => {
            editor.pointer_move(x, y);
            CommandResponse::ok()
        }

        EditorCommand::PointerUp => {
            editor.pointer_up();
            CommandResponse::ok()
        }

        EditorCommand::KeyDown { key, ctrl } => {
            editor.key_down(&key, ctrl);
            CommandResponse::ok()
        }

        EditorCommand::Inspect => CommandResponse::ok_with_data(serde_json::json!({
            "mode": editor.mode_label(),
            "points": editor.capture().points().len(),
            "can_extrude": editor.can_extrude(),
            "meshes": editor.meshes(),
            "selected": editor.selected_mesh(),
        })),
    }
}

fn mode_response<E: SceneEngine>(editor: &Editor<E>) -> CommandResponse {
    CommandResponse::ok_with_data(serde_json::json!({ "mode": editor.mode_label() }))
}

fn points_response<E: SceneEngine>(editor: &Editor<E>) -> CommandResponse {
    CommandResponse::ok_with_data(serde_json::json!({
        "points": editor.capture().points().len()
    }))
}
