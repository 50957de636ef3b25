//! Desktop implementations of the controller's host ports.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use arboard::Clipboard;
use client_core::{ClipboardSink, FileSaver, Notice, Notifier, SaveOutcome};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 4;

pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Toast queue shared between the notifier handed to the controller and the app.
#[derive(Clone, Default)]
pub struct Toasts {
    queue: Rc<RefCell<VecDeque<Toast>>>,
}

impl Toasts {
    pub fn push(&self, notice: Notice) {
        let mut queue = self.queue.borrow_mut();
        queue.push_back(Toast {
            notice,
            shown_at: Instant::now(),
        });
        while queue.len() > MAX_TOASTS {
            queue.pop_front();
        }
    }

    pub fn prune(&self, now: Instant) {
        self.queue
            .borrow_mut()
            .retain(|toast| now.duration_since(toast.shown_at) < TOAST_LIFETIME);
    }

    pub fn visible(&self) -> Vec<Notice> {
        self.queue
            .borrow()
            .iter()
            .map(|toast| toast.notice.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

pub struct ToastNotifier(pub Toasts);

impl Notifier for ToastNotifier {
    fn notify(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, "toast");
        self.0.push(notice);
    }
}

/// System clipboard, kept open for the app's lifetime so copied text survives on X11.
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

type PathPicker = Box<dyn FnMut(&Path, &str) -> Option<PathBuf>>;

/// Asks the user where to save each export, starting in the downloads folder.
pub struct DialogFileSaver {
    start_dir: PathBuf,
    pick_path: PathPicker,
}

impl DialogFileSaver {
    pub fn new(fallback_dir: PathBuf) -> Self {
        let start_dir = default_save_dir().unwrap_or(fallback_dir);
        Self::with_picker(start_dir, ask_for_save_path)
    }

    pub fn with_picker(
        start_dir: PathBuf,
        pick_path: impl FnMut(&Path, &str) -> Option<PathBuf> + 'static,
    ) -> Self {
        Self {
            start_dir,
            pick_path: Box::new(pick_path),
        }
    }
}

fn default_save_dir() -> Option<PathBuf> {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .or_else(dirs::home_dir)
}

fn ask_for_save_path(start_dir: &Path, filename: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_directory(start_dir)
        .set_file_name(filename)
        .add_filter("PDF", &["pdf"])
        .save_file()
}

impl FileSaver for DialogFileSaver {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<SaveOutcome> {
        let Some(path) = (self.pick_path)(&self.start_dir, filename) else {
            return Ok(SaveOutcome::Cancelled);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved export");
        if let Some(dir) = path.parent() {
            self.start_dir = dir.to_path_buf();
        }
        Ok(SaveOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use client_core::{Notice, Notifier};

    use super::*;

    #[test]
    fn dialog_saver_writes_to_chosen_path_and_remembers_directory() {
        let root = tempfile::tempdir().expect("temp dir");
        let chosen = root.path().join("lectures").join("week1.pdf");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let picker_seen = Rc::clone(&seen);
        let picker_target = chosen.clone();
        let mut saver = DialogFileSaver::with_picker(
            root.path().to_path_buf(),
            move |start_dir: &Path, filename: &str| {
                picker_seen
                    .borrow_mut()
                    .push((start_dir.to_path_buf(), filename.to_string()));
                Some(picker_target.clone())
            },
        );

        assert_eq!(saver.save("notes.pdf", b"first").expect("save"), SaveOutcome::Saved);
        saver.save("notes.pdf", b"second").expect("save");

        assert_eq!(fs::read(&chosen).expect("read"), b"second");
        assert_eq!(
            *seen.borrow(),
            vec![
                (root.path().to_path_buf(), "notes.pdf".to_string()),
                (root.path().join("lectures"), "notes.pdf".to_string()),
            ]
        );
    }

    #[test]
    fn dismissed_dialog_is_cancelled_and_writes_nothing() {
        let root = tempfile::tempdir().expect("temp dir");
        let mut saver =
            DialogFileSaver::with_picker(root.path().to_path_buf(), |_: &Path, _: &str| None);

        assert_eq!(
            saver.save("notes.pdf", b"%PDF").expect("cancel is not an error"),
            SaveOutcome::Cancelled
        );
        assert_eq!(fs::read_dir(root.path()).expect("read dir").count(), 0);
    }

    #[test]
    fn toasts_expire_and_cap_queue_length() {
        let toasts = Toasts::default();
        let mut notifier = ToastNotifier(toasts.clone());
        for _ in 0..6 {
            notifier.notify(Notice::copied());
        }
        assert_eq!(toasts.visible().len(), MAX_TOASTS);

        toasts.prune(Instant::now() + TOAST_LIFETIME);
        assert!(toasts.is_empty());
    }
}
