use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::model::AccountId;
use crate::App;

impl App {
    /// Copy an account's current code; placeholder and error cells copy nothing
    pub fn copy_code(&mut self, id: AccountId) -> bool {
        let Some(code) = self.model.view.code(id).copyable().map(str::to_string) else {
            tracing::debug!(%id, "no code to copy");
            return false;
        };

        match self.write_clipboard(&code) {
            Ok(()) => {
                tracing::debug!(%id, "code copied");
                self.model.ui.mark_copied(id);
                self.model.show_toast("Copied to clipboard");
                true
            }
            Err(e) => {
                tracing::warn!("clipboard failed: {:#}", e);
                self.model.show_toast(format!("Error: {}", e));
                false
            }
        }
    }

    /// Pipe text into the configured clipboard command
    fn write_clipboard(&self, text: &str) -> Result<()> {
        let Some(command) = self.config.clipboard_command.as_deref() else {
            bail!("clipboard_command not configured");
        };

        // "wl-copy" or "xclip -selection clipboard": program plus arguments
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("clipboard_command is empty");
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to copy with '{}'", command))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to copy with '{}'", command))?;
            // Close stdin to signal EOF
        }
        Ok(())
    }
}
