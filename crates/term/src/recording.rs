//! In-memory backend that records every call.
//!
//! Stands in for a terminal in tests. The call log is shared, so it can be
//! inspected after the backend itself has been dropped along with its
//! `Interface`.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::backend::{Backend, BackendError, WindowId};
use crate::palette::PairTable;
use crate::types::{BaseColor, ColorPair, InterfaceConfig, PairIndex, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Init,
    Shutdown,
    NewWindow(WindowId),
    PutStr(WindowId, String),
    Erase(WindowId),
    Refresh(WindowId),
    DeleteWindow(WindowId),
    InitPair(PairIndex, BaseColor, BaseColor),
}

/// Shared, append-only list of backend calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<BackendCall>>>);

impl CallLog {
    fn push(&self, call: BackendCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &BackendCall) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    /// How many times `win` was handed to `delete_window`.
    pub fn deletes(&self, win: WindowId) -> usize {
        self.count(&BackendCall::DeleteWindow(win))
    }

    /// Calls that touched `win`, in order.
    pub fn calls_for(&self, win: WindowId) -> Vec<BackendCall> {
        self.0
            .borrow()
            .iter()
            .filter(|c| match c {
                BackendCall::NewWindow(id)
                | BackendCall::PutStr(id, _)
                | BackendCall::Erase(id)
                | BackendCall::Refresh(id)
                | BackendCall::DeleteWindow(id) => *id == win,
                _ => false,
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
pub struct RecordingBackend {
    log: CallLog,
    initialized: bool,
    windows: SlotMap<WindowId, Rect>,
    pairs: PairTable,
    fail_init: bool,
    fail_refresh: bool,
    fail_shutdown: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            initialized: false,
            windows: SlotMap::with_key(),
            pairs: PairTable::new(1),
            fail_init: false,
            fail_refresh: false,
            fail_shutdown: false,
        }
    }

    /// Make `init` fail as if no terminal were available.
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make every `refresh` fail with an I/O error.
    pub fn failing_refresh(mut self) -> Self {
        self.fail_refresh = true;
        self
    }

    /// Make `shutdown` fail with an I/O error.
    pub fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn is_live(&self, win: WindowId) -> bool {
        self.windows.contains_key(win)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn known(&self, win: WindowId) -> Result<(), BackendError> {
        if self.windows.contains_key(win) {
            Ok(())
        } else {
            Err(BackendError::UnknownWindow(win))
        }
    }
}

impl Backend for RecordingBackend {
    fn init(&mut self, config: &InterfaceConfig) -> Result<(), BackendError> {
        self.log.push(BackendCall::Init);
        if self.fail_init {
            return Err(BackendError::NotATerminal);
        }
        if self.initialized {
            return Err(BackendError::AlreadyInitialized);
        }
        self.pairs = PairTable::new(config.color_pairs);
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), BackendError> {
        self.log.push(BackendCall::Shutdown);
        self.initialized = false;
        if self.fail_shutdown {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away").into());
        }
        Ok(())
    }

    fn new_window(&mut self, rect: Rect) -> Result<WindowId, BackendError> {
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        let id = self.windows.insert(rect);
        self.log.push(BackendCall::NewWindow(id));
        Ok(id)
    }

    fn put_str(
        &mut self,
        win: WindowId,
        _x: u16,
        _y: u16,
        text: &str,
        _pair: PairIndex,
    ) -> Result<(), BackendError> {
        self.log.push(BackendCall::PutStr(win, text.to_string()));
        self.known(win)
    }

    fn erase(&mut self, win: WindowId) -> Result<(), BackendError> {
        self.log.push(BackendCall::Erase(win));
        self.known(win)
    }

    fn refresh(&mut self, win: WindowId) -> Result<(), BackendError> {
        self.log.push(BackendCall::Refresh(win));
        if self.fail_refresh {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away").into());
        }
        self.known(win)
    }

    fn delete_window(&mut self, win: WindowId) -> Result<(), BackendError> {
        self.log.push(BackendCall::DeleteWindow(win));
        self.windows
            .remove(win)
            .map(|_| ())
            .ok_or(BackendError::UnknownWindow(win))
    }

    fn init_pair(&mut self, pair: PairIndex, fg: BaseColor, bg: BaseColor) {
        self.log.push(BackendCall::InitPair(pair, fg, bg));
        self.pairs.set(pair, ColorPair::new(fg, bg));
    }

    fn pair_content(&self, pair: PairIndex) -> Option<ColorPair> {
        self.pairs.get(pair)
    }

    fn color_pairs(&self) -> i16 {
        self.pairs.len()
    }
}
