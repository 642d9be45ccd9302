//! Terminal interface layer.
//!
//! A thin adapter between a character-grid terminal and the rest of the
//! engine:
//!
//! - [`init_interface`] brings the terminal up and returns the [`Interface`]
//!   context that owns it.
//! - [`ScopedWindow`] owns a window and cleans it up on every exit path.
//! - [`init_pair`] binds a color pair index to two [`types::BaseColor`]s.
//!
//! Drawing goes through a [`Backend`]. [`CrosstermBackend`] drives a real
//! terminal; [`RecordingBackend`] records calls for tests.

pub mod backend;
pub mod crossterm_backend;
pub mod fb;
pub mod interface;
pub mod palette;
pub mod recording;
pub mod renderer;
pub mod window;

pub use tui_console_types as types;

pub use backend::{Backend, BackendError, WindowId};
pub use crossterm_backend::CrosstermBackend;
pub use fb::{Cell, FrameBuffer};
pub use interface::{init_interface, init_pair, Interface, InterfaceError};
pub use palette::PairTable;
pub use recording::{BackendCall, CallLog, RecordingBackend};
pub use renderer::{encode_diff_into, encode_full_into};
pub use window::ScopedWindow;
