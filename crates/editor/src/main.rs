use std::io::{self, BufRead, Write};

use massing_editor_lib::command::{execute_command, CommandResponse, EditorCommand};
use massing_editor_lib::editor::Editor;
use massing_editor_lib::scripted::ScriptedEngine;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "massing_editor=info".into()),
        )
        .init();

    let mut editor = Editor::new(ScriptedEngine::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in command_source().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("failed to read command line: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<EditorCommand>(line) {
            Ok(cmd) => execute_command(&mut editor, cmd),
            Err(e) => CommandResponse::err(format!("parse error: {e}")),
        };
        match serde_json::to_string(&response) {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
            }
            Err(e) => tracing::error!("failed to encode response: {e}"),
        }
    }
}

/// One JSON command per line, from the file named on the command line or
/// from stdin.
fn command_source() -> Box<dyn BufRead> {
    match std::env::args().nth(1) {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => Box::new(io::BufReader::new(file)),
            Err(e) => {
                tracing::error!("failed to open {path}: {e}");
                Box::new(io::BufReader::new(io::empty()))
            }
        },
        None => Box::new(io::BufReader::new(io::stdin())),
    }
}
