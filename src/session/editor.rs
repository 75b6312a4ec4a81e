use std::{
    env,
    fs,
    io::{self, Read, Write},
    process::Command,
};

use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_EDITOR: &str = "vim";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("couldn't prepare the description buffer: {0}")]
    Buffer(#[from] io::Error),

    #[error("couldn't start editor {editor:?}: {source}")]
    Launch {
        editor: String,
        #[source]
        source: io::Error,
    },
}

/// Lets the user write a free-form text, starting from `initial`.
#[cfg_attr(test, mockall::automock)]
pub trait TextEditor {
    fn edit_text(&mut self, initial: &str) -> Result<String, EditorError>;
}

/// Opens a temporary markdown file in an external editor and reads it back once the editor is
/// closed. The file is removed afterwards no matter how the editor exited.
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// `command` may carry arguments, e.g. `code --wait`. The file path is appended last.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Uses `$VISUAL`, then `$EDITOR`, then vim.
    pub fn from_env() -> Self {
        let command = ["VISUAL", "EDITOR"]
            .into_iter()
            .filter_map(|v| env::var(v).ok())
            .find(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        Self::new(command)
    }
}

impl TextEditor for ExternalEditor {
    fn edit_text(&mut self, initial: &str) -> Result<String, EditorError> {
        let mut buffer = tempfile::Builder::new()
            .prefix("task-")
            .suffix(".md")
            .tempfile()?;
        buffer.write_all(initial.as_bytes())?;
        buffer.flush()?;

        let mut parts = self.command.split_whitespace();
        let program = parts.next().unwrap_or(DEFAULT_EDITOR);
        debug!("Opening {:?} with {}", buffer.path(), self.command);
        let status = Command::new(program)
            .args(parts)
            .arg(buffer.path())
            .status()
            .map_err(|source| EditorError::Launch {
                editor: self.command.clone(),
                source,
            })?;
        if !status.success() {
            warn!("Editor {} exited with {status}, keeping what was written", self.command);
        }

        // Editors often save by replacing the file, so it's read again by path.
        Ok(fs::read_to_string(buffer.path())?)
    }
}

/// Reads the text from an input stream until it ends. Stands in for [ExternalEditor] when stdin
/// isn't a terminal.
pub struct StreamEditor<R> {
    input: R,
}

impl<R: Read> StreamEditor<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> TextEditor for StreamEditor<R> {
    fn edit_text(&mut self, initial: &str) -> Result<String, EditorError> {
        let mut text = initial.to_string();
        self.input.read_to_string(&mut text)?;
        Ok(text)
    }
}
