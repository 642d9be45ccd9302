//! TUI console (workspace facade crate).
//!
//! Re-exports the member crates as `tui_console::{term,types}` so the engine
//! depends on a single package.

pub use tui_console_term as term;
pub use tui_console_types as types;
