//! Backend driving a real terminal through crossterm.
//!
//! Each window owns a framebuffer. `refresh` composites a window onto a
//! virtual screen and flushes only the cells that changed since the last
//! flush.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal,
    tty::IsTty,
    QueueableCommand,
};
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::backend::{Backend, BackendError, WindowId};
use crate::fb::FrameBuffer;
use crate::palette::PairTable;
use crate::renderer::{encode_diff_into, encode_full_into};
use crate::types::{BaseColor, ColorPair, InterfaceConfig, PairIndex, Rect};

#[derive(Debug)]
struct Window {
    rect: Rect,
    fb: FrameBuffer,
}

pub struct CrosstermBackend<W: Write> {
    out: W,
    /// When false the terminal's modes are left alone and the screen size is
    /// fixed at construction.
    tty: bool,
    config: Option<InterfaceConfig>,
    windows: SlotMap<WindowId, Window>,
    screen: FrameBuffer,
    last: Option<FrameBuffer>,
    last_generation: u64,
    pairs: PairTable,
    buf: Vec<u8>,
}

impl CrosstermBackend<io::Stdout> {
    /// Backend for the process's controlling terminal.
    pub fn stdout() -> Self {
        Self::with_output(io::stdout(), true, 0, 0)
    }
}

impl<W: Write> CrosstermBackend<W> {
    /// Backend writing to an arbitrary sink with a fixed screen size.
    ///
    /// Terminal modes are never touched. Useful for tests and for capturing
    /// output.
    pub fn headless(out: W, width: u16, height: u16) -> Self {
        Self::with_output(out, false, width, height)
    }

    fn with_output(out: W, tty: bool, width: u16, height: u16) -> Self {
        Self {
            out,
            tty,
            config: None,
            windows: SlotMap::with_key(),
            screen: FrameBuffer::new(width, height),
            last: None,
            last_generation: 0,
            pairs: PairTable::new(1),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Screen size in cells.
    pub fn size(&self) -> (u16, u16) {
        (self.screen.width(), self.screen.height())
    }

    /// What the terminal currently shows, as of the last refresh.
    pub fn screen(&self) -> &FrameBuffer {
        &self.screen
    }

    /// Number of live windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Contents of a window that may not have been refreshed yet.
    pub fn window_buffer(&self, win: WindowId) -> Option<&FrameBuffer> {
        self.windows.get(win).map(|w| &w.fb)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn ensure_initialized(&self) -> Result<(), BackendError> {
        if self.config.is_none() {
            return Err(BackendError::NotInitialized);
        }
        Ok(())
    }

    fn window_mut(&mut self, win: WindowId) -> Result<&mut Window, BackendError> {
        self.windows
            .get_mut(win)
            .ok_or(BackendError::UnknownWindow(win))
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Resolve zero width/height to "up to the screen edge" and check the
    /// result fits.
    fn place(&self, rect: Rect) -> Result<Rect, BackendError> {
        let (sw, sh) = self.size();
        let width = if rect.width == 0 {
            sw.saturating_sub(rect.x)
        } else {
            rect.width
        };
        let height = if rect.height == 0 {
            sh.saturating_sub(rect.y)
        } else {
            rect.height
        };
        let placed = Rect::new(rect.x, rect.y, width, height);

        let fits = !placed.is_empty()
            && u32::from(placed.x) + u32::from(width) <= u32::from(sw)
            && u32::from(placed.y) + u32::from(height) <= u32::from(sh);
        if !fits {
            return Err(BackendError::OutOfBounds {
                rect,
                width: sw,
                height: sh,
            });
        }
        Ok(placed)
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn init(&mut self, config: &InterfaceConfig) -> Result<(), BackendError> {
        if self.config.is_some() {
            return Err(BackendError::AlreadyInitialized);
        }

        if self.tty {
            if !io::stdout().is_tty() {
                return Err(BackendError::NotATerminal);
            }
            let (w, h) = terminal::size()?;
            self.screen = FrameBuffer::new(w, h);

            if config.raw_mode {
                terminal::enable_raw_mode()?;
            }
            self.buf.clear();
            if config.alternate_screen {
                self.buf.queue(terminal::EnterAlternateScreen)?;
            }
            if config.hide_cursor {
                self.buf.queue(cursor::Hide)?;
            }
            self.buf.queue(terminal::DisableLineWrap)?;
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            if let Err(err) = self.flush_buf() {
                if config.raw_mode {
                    let _ = terminal::disable_raw_mode();
                }
                return Err(err.into());
            }
        }

        self.pairs = PairTable::new(config.color_pairs);
        self.last = None;
        self.last_generation = self.pairs.generation();
        self.config = Some(config.clone());
        debug!(
            width = self.screen.width(),
            height = self.screen.height(),
            color_pairs = self.pairs.len(),
            "crossterm backend initialized"
        );
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), BackendError> {
        let Some(config) = self.config.take() else {
            return Ok(());
        };
        if !self.windows.is_empty() {
            debug!(count = self.windows.len(), "dropping windows left open at shutdown");
        }
        self.windows.clear();
        self.last = None;

        if self.tty {
            self.buf.clear();
            self.buf.queue(ResetColor)?;
            self.buf.queue(SetAttribute(Attribute::Reset))?;
            self.buf.queue(terminal::EnableLineWrap)?;
            self.buf.queue(cursor::Show)?;
            if config.alternate_screen {
                self.buf.queue(terminal::LeaveAlternateScreen)?;
            }
            let flushed = self.flush_buf();
            if config.raw_mode {
                terminal::disable_raw_mode()?;
            }
            flushed?;
        }
        debug!("crossterm backend shut down");
        Ok(())
    }

    fn new_window(&mut self, rect: Rect) -> Result<WindowId, BackendError> {
        self.ensure_initialized()?;
        let rect = self.place(rect)?;
        let id = self.windows.insert(Window {
            rect,
            fb: FrameBuffer::new(rect.width, rect.height),
        });
        debug!(?id, ?rect, "window created");
        Ok(id)
    }

    fn put_str(
        &mut self,
        win: WindowId,
        x: u16,
        y: u16,
        text: &str,
        pair: PairIndex,
    ) -> Result<(), BackendError> {
        let window = self.window_mut(win)?;
        if x >= window.rect.width || y >= window.rect.height {
            return Err(BackendError::OutOfBounds {
                rect: Rect::new(x, y, 1, 1),
                width: window.rect.width,
                height: window.rect.height,
            });
        }
        window.fb.put_str(x, y, text, pair);
        Ok(())
    }

    fn erase(&mut self, win: WindowId) -> Result<(), BackendError> {
        self.window_mut(win)?.fb.clear();
        Ok(())
    }

    fn refresh(&mut self, win: WindowId) -> Result<(), BackendError> {
        let window = self
            .windows
            .get(win)
            .ok_or(BackendError::UnknownWindow(win))?;
        self.screen.blit(window.rect.x, window.rect.y, &window.fb);

        self.buf.clear();
        // Rebinding a pair changes how already-drawn cells look.
        let repaint = self.last_generation != self.pairs.generation();
        if repaint || self.last.is_none() {
            encode_full_into(&self.screen, &self.pairs, &mut self.buf)?;
            self.last = Some(self.screen.clone());
            self.last_generation = self.pairs.generation();
        } else if let Some(prev) = self.last.as_mut() {
            encode_diff_into(prev, &self.screen, &self.pairs, &mut self.buf)?;
            prev.clone_from(&self.screen);
        }
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }
        Ok(())
    }

    fn delete_window(&mut self, win: WindowId) -> Result<(), BackendError> {
        self.windows
            .remove(win)
            .ok_or(BackendError::UnknownWindow(win))?;
        debug!(id = ?win, "window deleted");
        Ok(())
    }

    fn init_pair(&mut self, pair: PairIndex, fg: BaseColor, bg: BaseColor) {
        if self.config.is_none() {
            warn!(pair, "color pair bound before initialization; ignored");
            return;
        }
        if !self.pairs.set(pair, ColorPair::new(fg, bg)) {
            warn!(
                pair,
                limit = self.pairs.len(),
                "color pair index out of range; ignored"
            );
        }
    }

    fn pair_content(&self, pair: PairIndex) -> Option<ColorPair> {
        self.pairs.get(pair)
    }

    fn color_pairs(&self) -> i16 {
        self.pairs.len()
    }
}
