//! The seam between the interface layer and whatever owns the terminal.
//!
//! The interface never touches the terminal directly. Everything goes through
//! a [`Backend`], which owns the windows, their cells and the color pair
//! table. [`crate::CrosstermBackend`] drives a real terminal and
//! [`crate::RecordingBackend`] records calls for tests.

use std::io;

use slotmap::new_key_type;
use thiserror::Error;

use crate::types::{BaseColor, ColorPair, InterfaceConfig, PairIndex, Rect};

new_key_type! {
    /// Opaque handle to a backend window.
    ///
    /// Only meaningful to the backend that issued it.
    pub struct WindowId;
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("output is not a terminal")]
    NotATerminal,
    #[error("backend is not initialized")]
    NotInitialized,
    #[error("backend is already initialized")]
    AlreadyInitialized,
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),
    #[error("{rect:?} does not fit in a {width}x{height} area")]
    OutOfBounds { rect: Rect, width: u16, height: u16 },
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

/// Character-grid rendering backend.
///
/// Implementations are single-threaded and hold process-wide terminal state.
pub trait Backend {
    /// Bring the terminal into a usable state.
    fn init(&mut self, config: &InterfaceConfig) -> Result<(), BackendError>;

    /// Restore the terminal. Calling this when not initialized is a no-op.
    fn shutdown(&mut self) -> Result<(), BackendError>;

    /// Create a window. A zero width or height extends it to the screen edge.
    fn new_window(&mut self, rect: Rect) -> Result<WindowId, BackendError>;

    /// Write `text` into a window starting at (`x`, `y`), truncated at its
    /// right edge.
    fn put_str(
        &mut self,
        win: WindowId,
        x: u16,
        y: u16,
        text: &str,
        pair: PairIndex,
    ) -> Result<(), BackendError>;

    /// Blank every cell of a window.
    fn erase(&mut self, win: WindowId) -> Result<(), BackendError>;

    /// Push a window's contents to the display.
    fn refresh(&mut self, win: WindowId) -> Result<(), BackendError>;

    /// Free a window. The id is invalid afterwards.
    fn delete_window(&mut self, win: WindowId) -> Result<(), BackendError>;

    /// Bind `pair` to a foreground/background combination.
    ///
    /// Range handling is up to the backend; nothing is reported back.
    fn init_pair(&mut self, pair: PairIndex, fg: BaseColor, bg: BaseColor);

    /// Current binding of `pair`, if any.
    fn pair_content(&self, pair: PairIndex) -> Option<ColorPair>;

    /// Size of the pair table, reserved pair 0 included.
    fn color_pairs(&self) -> i16;
}
