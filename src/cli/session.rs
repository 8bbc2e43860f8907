//! Load-modify-commit helper shared by editing commands

use anyhow::Result;

use super::output::Output;
use crate::domain::{EditorState, LayerStack, ShadowLayer};
use crate::storage::{EditorStore, FileStore, Workspace};

/// The current workspace's editor store with its state loaded
pub struct Session {
    pub editor: EditorStore<FileStore>,
    pub stack: LayerStack,
    pub state: EditorState,
}

impl Session {
    pub fn open(output: &Output) -> Result<Self> {
        let workspace = Workspace::open_current()?;
        output.verbose_ctx(
            "session",
            &format!("Workspace at: {}", workspace.root().display()),
        );

        let editor = workspace.editor();
        let (stack, state) = editor.load_stack()?;
        output.verbose_ctx("session", &format!("Loaded {} layer(s)", stack.len()));

        Ok(Self {
            editor,
            stack,
            state,
        })
    }

    pub fn layers(&self) -> &[ShadowLayer] {
        self.stack.layers()
    }

    /// Commits the stack after a manual edit, which clears the active preset
    pub fn commit_edit(&self) -> Result<()> {
        self.editor.commit(&self.stack.to_state(None))
    }

    /// Commits the stack, keeping the active preset
    pub fn commit_keep_preset(&self) -> Result<()> {
        self.editor
            .commit(&self.stack.to_state(self.state.active_preset.clone()))
    }

    /// Replaces every layer and commits, recording `preset` as active
    pub fn commit_replace(&mut self, layers: Vec<ShadowLayer>, preset: Option<String>) -> Result<()> {
        self.stack.replace(layers);
        self.editor.commit(&self.stack.to_state(preset))
    }
}
