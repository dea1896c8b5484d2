//! Platform primitives used directly by row actions.
//!
//! The clipboard is written locally rather than through the invocation
//! boundary.

use elf_core::ClipboardError;
use parking_lot::Mutex;

/// Text clipboard.
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A clipboard handle that can take text.
trait TextSink: Sized {
    fn open() -> Result<Self, ClipboardError>;
    fn put(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl TextSink for arboard::Clipboard {
    fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))
    }

    fn put(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

/// Opens the handle on first use and keeps it for later writes.
///
/// On X11/Wayland the owning handle serves the copied text, so it must
/// outlive the write. A failed write drops the handle and the next call
/// reopens it.
struct HeldClipboard<C> {
    slot: Mutex<Option<C>>,
}

impl<C> Default for HeldClipboard<C> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<C: TextSink> HeldClipboard<C> {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.slot.lock();
        let mut clipboard = match slot.take() {
            Some(clipboard) => clipboard,
            None => C::open()?,
        };
        let result = clipboard.put(text);
        if result.is_ok() {
            *slot = Some(clipboard);
        }
        result
    }
}

/// System clipboard via `arboard`.
#[derive(Default)]
pub struct SystemClipboard {
    held: HeldClipboard<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.held.set_text(text)
    }
}

/// In-memory clipboard for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Mutex<Vec<String>>,
    pub fail: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("no display".to_string()));
        }
        self.contents.lock().push(text.to_string());
        Ok(())
    }
}
