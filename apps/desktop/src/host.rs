//! Terminal implementations of the controller's host ports.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use arboard::Clipboard;
use client_core::{ClipboardSink, FileSaver, Notice, Notifier, SaveOutcome, Severity};

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Normal => "ok",
            Severity::Destructive => "error",
        };
        eprintln!("[{marker}] {} {}", notice.title, notice.description);
    }
}

/// System clipboard, opened on first write.
///
/// On X11 the selection is owned by this process, so copied text only outlives the
/// command when a clipboard manager picks it up.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for ArboardClipboard {
    fn write_text(&mut self, text: &str) {
        if self.inner.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(err) => {
                    tracing::warn!("clipboard unavailable: {err}");
                    return;
                }
            }
        }
        if let Some(clipboard) = self.inner.as_mut() {
            if let Err(err) = clipboard.set_text(text.to_string()) {
                tracing::warn!("failed to write clipboard: {err}");
            }
        }
    }
}

/// Writes exported artifacts into a fixed directory.
pub struct DiskFileSaver {
    dir: PathBuf,
}

impl DiskFileSaver {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FileSaver for DiskFileSaver {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SaveOutcome> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory {}", self.dir.display()))?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(SaveOutcome::Saved)
    }
}
