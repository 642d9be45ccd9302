//! Interface bootstrap and color pair registry.
//!
//! [`Interface`] is the context object for the terminal: it owns the backend
//! for the lifetime of the UI. Windows borrow it, so none can outlive it.

use std::cell::RefCell;
use std::mem;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::backend::{Backend, BackendError, WindowId};
use crate::types::{BaseColor, ColorPair, InterfaceConfig, PairIndex, Rect};
use crate::window::ScopedWindow;

#[derive(Debug, Error)]
pub enum InterfaceError {
    /// The terminal could not be brought up. Not recoverable: report it and
    /// exit.
    #[error("failed to initialize the terminal interface")]
    Init(#[source] BackendError),
    #[error("failed to create a window at {rect:?}")]
    Window {
        rect: Rect,
        #[source]
        source: BackendError,
    },
    #[error("failed to restore the terminal")]
    Shutdown(#[source] BackendError),
}

pub struct Interface<B: Backend> {
    backend: RefCell<B>,
    /// Windows released while the backend was borrowed. Cleaned up on the
    /// next borrow, at shutdown, or on drop.
    pending: RefCell<Vec<WindowId>>,
    live: bool,
}

/// Bring the terminal up.
///
/// Call once per process. On error the caller must display the error and
/// stop; there is no degraded mode.
pub fn init_interface<B: Backend>(
    mut backend: B,
    config: &InterfaceConfig,
) -> Result<Interface<B>, InterfaceError> {
    backend.init(config).map_err(InterfaceError::Init)?;
    info!(color_pairs = backend.color_pairs(), "terminal interface up");
    Ok(Interface {
        backend: RefCell::new(backend),
        pending: RefCell::new(Vec::new()),
        live: true,
    })
}

/// Bind `pair` to `fg` on `bg`. See [`Interface::init_pair`].
pub fn init_pair<B: Backend>(
    iface: &Interface<B>,
    pair: PairIndex,
    fg: BaseColor,
    bg: BaseColor,
) {
    iface.init_pair(pair, fg, bg);
}

impl<B: Backend> Interface<B> {
    /// Create a window owned by a [`ScopedWindow`].
    pub fn new_window(&self, rect: Rect) -> Result<ScopedWindow<'_, B>, InterfaceError> {
        self.release_pending();
        let id = self
            .backend
            .borrow_mut()
            .new_window(rect)
            .map_err(|source| InterfaceError::Window { rect, source })?;
        Ok(ScopedWindow::new(self, id))
    }

    /// Bind `pair` to `fg` on `bg`, replacing any earlier binding.
    ///
    /// Passed straight to the backend; range checking is the backend's call.
    pub fn init_pair(&self, pair: PairIndex, fg: BaseColor, bg: BaseColor) {
        self.release_pending();
        self.backend.borrow_mut().init_pair(pair, fg, bg);
    }

    pub fn pair_content(&self, pair: PairIndex) -> Option<ColorPair> {
        self.backend.borrow().pair_content(pair)
    }

    /// Upper bound (exclusive) on pair indices the backend accepts.
    pub fn color_pairs(&self) -> i16 {
        self.backend.borrow().color_pairs()
    }

    /// Run `f` with exclusive access to the backend.
    ///
    /// Windows reset or dropped inside `f` are cleaned up once `f` returns.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside another `with_backend`.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        self.release_pending();
        let out = f(&mut *self.backend.borrow_mut());
        self.release_pending();
        out
    }

    /// Windows waiting for cleanup because the backend was busy when they
    /// were released.
    pub fn pending_releases(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Restore the terminal, reporting failure.
    ///
    /// Dropping the interface does the same but can only log errors.
    pub fn shutdown(mut self) -> Result<(), InterfaceError> {
        self.live = false;
        self.release_pending_mut();
        self.backend
            .get_mut()
            .shutdown()
            .map_err(InterfaceError::Shutdown)?;
        info!("terminal interface down");
        Ok(())
    }

    /// Clean up `id` now, or queue it if the backend is borrowed.
    pub(crate) fn destroy_window(&self, id: WindowId) {
        match self.backend.try_borrow_mut() {
            Ok(mut backend) => cleanup_window(&mut *backend, id),
            Err(_) => {
                debug!(?id, "backend busy; window cleanup deferred");
                self.pending.borrow_mut().push(id);
            }
        }
    }

    fn release_pending(&self) {
        if self.pending.borrow().is_empty() {
            return;
        }
        let Ok(mut backend) = self.backend.try_borrow_mut() else {
            return;
        };
        let ids = mem::take(&mut *self.pending.borrow_mut());
        for id in ids {
            cleanup_window(&mut *backend, id);
        }
    }

    fn release_pending_mut(&mut self) {
        let backend = self.backend.get_mut();
        for id in self.pending.get_mut().drain(..) {
            cleanup_window(backend, id);
        }
    }
}

/// Erase, refresh, then delete `id`. Every step runs even if an earlier one
/// fails; failures are logged.
fn cleanup_window<B: Backend>(backend: &mut B, id: WindowId) {
    if let Err(err) = backend.erase(id) {
        warn!(?id, error = %err, "erase failed during window cleanup");
    }
    if let Err(err) = backend.refresh(id) {
        warn!(?id, error = %err, "refresh failed during window cleanup");
    }
    match backend.delete_window(id) {
        Ok(()) => debug!(?id, "window released"),
        Err(err) => warn!(?id, error = %err, "delete failed during window cleanup"),
    }
}

impl<B: Backend> Drop for Interface<B> {
    fn drop(&mut self) {
        if !self.live {
            return;
        }
        self.release_pending_mut();
        if let Err(err) = self.backend.get_mut().shutdown() {
            error!(error = %err, "failed to restore the terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{BackendCall, RecordingBackend};

    #[test]
    fn failed_init_is_reported() {
        let backend = RecordingBackend::new().failing_init();
        let err = init_interface(backend, &InterfaceConfig::default())
            .err()
            .expect("init should fail");
        assert!(matches!(err, InterfaceError::Init(BackendError::NotATerminal)));
    }

    #[test]
    fn drop_restores_terminal_once() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        {
            let _iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        }
        assert_eq!(log.count(&BackendCall::Shutdown), 1);
    }

    #[test]
    fn explicit_shutdown_skips_drop_teardown() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        iface.shutdown().unwrap();
        assert_eq!(log.count(&BackendCall::Shutdown), 1);
    }

    #[test]
    fn cleanup_runs_erase_refresh_delete_in_order() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        let win = iface.new_window(Rect::new(0, 0, 10, 3)).unwrap();
        let id = win.get().unwrap();
        drop(win);

        assert_eq!(
            log.calls_for(id),
            vec![
                BackendCall::NewWindow(id),
                BackendCall::Erase(id),
                BackendCall::Refresh(id),
                BackendCall::DeleteWindow(id),
            ]
        );
    }

    #[test]
    fn failing_refresh_still_deletes() {
        let backend = RecordingBackend::new().failing_refresh();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        let win = iface.new_window(Rect::new(0, 0, 10, 3)).unwrap();
        let id = win.get().unwrap();
        drop(win);

        assert_eq!(log.deletes(id), 1);
        assert!(!iface.with_backend(|b| b.is_live(id)));
    }

    #[test]
    fn window_creation_error_carries_rect() {
        let mut backend = RecordingBackend::new();
        backend.init(&InterfaceConfig::default()).unwrap();
        backend.shutdown().unwrap();
        let iface = Interface {
            backend: RefCell::new(backend),
            pending: RefCell::new(Vec::new()),
            live: false,
        };
        let rect = Rect::new(1, 2, 3, 4);
        match iface.new_window(rect) {
            Err(InterfaceError::Window { rect: r, source }) => {
                assert_eq!(r, rect);
                assert!(matches!(source, BackendError::NotInitialized));
            }
            other => panic!("expected window error, got {:?}", other.map(|w| w.get())),
        };
    }

    #[test]
    fn busy_backend_defers_cleanup_until_borrow_ends() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        let win = iface.new_window(Rect::new(0, 0, 10, 3)).unwrap();
        let id = win.get().unwrap();

        iface.with_backend(|_b| drop(win));

        assert_eq!(iface.pending_releases(), 0);
        assert_eq!(
            log.calls_for(id),
            vec![
                BackendCall::NewWindow(id),
                BackendCall::Erase(id),
                BackendCall::Refresh(id),
                BackendCall::DeleteWindow(id),
            ]
        );
    }

    #[test]
    fn pending_cleanup_runs_before_shutdown() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
        let id = iface.with_backend(|b| b.new_window(Rect::new(0, 0, 4, 4))).unwrap();

        let guard = iface.backend.borrow_mut();
        iface.destroy_window(id);
        drop(guard);
        assert_eq!(iface.pending_releases(), 1);
        assert_eq!(log.deletes(id), 0);

        iface.shutdown().unwrap();
        let calls = log.calls();
        assert_eq!(log.deletes(id), 1);
        assert_eq!(
            &calls[calls.len() - 2..],
            &[BackendCall::DeleteWindow(id), BackendCall::Shutdown]
        );
    }

    #[test]
    fn pending_cleanup_runs_on_drop() {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let id = {
            let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();
            let id = iface.with_backend(|b| b.new_window(Rect::new(0, 0, 4, 4))).unwrap();
            let guard = iface.backend.borrow_mut();
            iface.destroy_window(id);
            drop(guard);
            id
        };
        assert_eq!(log.deletes(id), 1);
        assert_eq!(log.count(&BackendCall::Shutdown), 1);
    }

    #[test]
    fn failed_shutdown_is_not_retried_on_drop() {
        let backend = RecordingBackend::new().failing_shutdown();
        let log = backend.log();
        let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();

        let err = iface.shutdown().unwrap_err();
        assert!(matches!(err, InterfaceError::Shutdown(BackendError::Io(_))));
        assert_eq!(log.count(&BackendCall::Shutdown), 1);
    }
}
