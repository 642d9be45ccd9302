//! Scoped ownership of backend windows.

use std::fmt;

use crate::backend::{Backend, WindowId};
use crate::interface::Interface;

/// Owns at most one backend window and cleans it up when dropped.
///
/// Cleanup erases the window, refreshes it so the cleared area reaches the
/// display, and deletes it. It runs exactly once per window: on drop
/// (including panic unwinding) or on an earlier [`reset`](Self::reset).
/// [`release`](Self::release) gives the raw id back without cleaning up.
///
/// ```
/// use tui_console_term::{init_interface, RecordingBackend};
/// use tui_console_types::{InterfaceConfig, Rect};
///
/// let backend = RecordingBackend::new();
/// let log = backend.log();
/// let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
///
/// let id = {
///     let win = iface.new_window(Rect::new(0, 0, 20, 4)).unwrap();
///     win.get().unwrap()
/// };
/// assert_eq!(log.deletes(id), 1);
/// ```
pub struct ScopedWindow<'i, B: Backend> {
    iface: &'i Interface<B>,
    id: Option<WindowId>,
}

impl<'i, B: Backend> ScopedWindow<'i, B> {
    /// Take ownership of `id`. The id is trusted as-is.
    pub fn new(iface: &'i Interface<B>, id: WindowId) -> Self {
        Self {
            iface,
            id: Some(id),
        }
    }

    pub fn empty(iface: &'i Interface<B>) -> Self {
        Self { iface, id: None }
    }

    pub fn get(&self) -> Option<WindowId> {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// Clean up now. No-op when already empty.
    ///
    /// If the backend is borrowed (inside [`Interface::with_backend`]) the
    /// cleanup is queued and runs as soon as that borrow ends.
    pub fn reset(&mut self) {
        if let Some(id) = self.id.take() {
            self.iface.destroy_window(id);
        }
    }

    /// Give up ownership without cleaning up.
    ///
    /// The caller becomes responsible for the returned window.
    #[must_use = "the released window is no longer cleaned up"]
    pub fn release(&mut self) -> Option<WindowId> {
        self.id.take()
    }

    /// Move ownership into a new wrapper, leaving this one empty.
    pub fn take(&mut self) -> ScopedWindow<'i, B> {
        ScopedWindow {
            iface: self.iface,
            id: self.id.take(),
        }
    }

    /// Run `f` against the backend with this window's id.
    ///
    /// Returns `None` if the wrapper is empty.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B, WindowId) -> R) -> Option<R> {
        let id = self.id?;
        Some(self.iface.with_backend(|b| f(b, id)))
    }
}

impl<B: Backend> Drop for ScopedWindow<'_, B> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<B: Backend> fmt::Debug for ScopedWindow<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedWindow").field("id", &self.id).finish()
    }
}
