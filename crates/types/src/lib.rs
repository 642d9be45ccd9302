//! Shared types for the terminal interface layer.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the engine, the terminal backend and tests alike.
//!
//! # Base colors
//!
//! The palette is fixed at eight colors whose integer codes match the
//! terminal's native ANSI color indices:
//!
//! | Color | Code | Reference RGB |
//! |-------|------|---------------|
//! | `Black` | 0 | (0, 0, 0) |
//! | `Red` | 1 | (196, 0, 0) |
//! | `Green` | 2 | (0, 196, 0) |
//! | `Yellow` | 3 | (196, 180, 30) |
//! | `Blue` | 4 | (0, 0, 196) |
//! | `Magenta` | 5 | (196, 0, 180) |
//! | `Cyan` | 6 | (0, 170, 200) |
//! | `White` | 7 | (196, 196, 196) |
//!
//! The code is what gets sent to the backend. The RGB triple is reference
//! only.
//!
//! # Examples
//!
//! ```
//! use tui_console_types::{BaseColor, ColorPair};
//!
//! let parsed = BaseColor::from_str("Cyan").unwrap();
//! assert_eq!(parsed, BaseColor::Cyan);
//! assert_eq!(parsed.code(), 6);
//!
//! let pair = ColorPair::new(BaseColor::White, BaseColor::Blue);
//! assert_eq!(pair.fg, BaseColor::White);
//! ```

/// Index of a color pair in the backend's pair table.
///
/// Pair 0 is reserved by the backend for its default colors.
pub type PairIndex = i16;

/// The pair every cell uses unless drawn with another one.
pub const DEFAULT_PAIR: PairIndex = 0;

/// Default size of the backend's color pair table.
pub const DEFAULT_COLOR_PAIRS: i16 = 256;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The eight base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum BaseColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl BaseColor {
    /// All colors, in code order.
    pub const ALL: [BaseColor; 8] = [
        BaseColor::Black,
        BaseColor::Red,
        BaseColor::Green,
        BaseColor::Yellow,
        BaseColor::Blue,
        BaseColor::Magenta,
        BaseColor::Cyan,
        BaseColor::White,
    ];

    /// Backend color code (0-7).
    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Look a color up by its backend code.
    ///
    /// ```
    /// use tui_console_types::BaseColor;
    ///
    /// assert_eq!(BaseColor::from_code(4), Some(BaseColor::Blue));
    /// assert_eq!(BaseColor::from_code(8), None);
    /// assert_eq!(BaseColor::from_code(-1), None);
    /// ```
    pub fn from_code(code: i16) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Reference RGB value. Not used for rendering.
    pub const fn rgb(self) -> Rgb {
        match self {
            BaseColor::Black => Rgb::new(0, 0, 0),
            BaseColor::Red => Rgb::new(196, 0, 0),
            BaseColor::Green => Rgb::new(0, 196, 0),
            BaseColor::Yellow => Rgb::new(196, 180, 30),
            BaseColor::Blue => Rgb::new(0, 0, 196),
            BaseColor::Magenta => Rgb::new(196, 0, 180),
            BaseColor::Cyan => Rgb::new(0, 170, 200),
            BaseColor::White => Rgb::new(196, 196, 196),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BaseColor::Black => "black",
            BaseColor::Red => "red",
            BaseColor::Green => "green",
            BaseColor::Yellow => "yellow",
            BaseColor::Blue => "blue",
            BaseColor::Magenta => "magenta",
            BaseColor::Cyan => "cyan",
            BaseColor::White => "white",
        }
    }

    /// Parse a color name (case-insensitive)
    ///
    /// ```
    /// use tui_console_types::BaseColor;
    ///
    /// assert_eq!(BaseColor::from_str("RED"), Some(BaseColor::Red));
    /// assert_eq!(BaseColor::from_str("orange"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == lower)
    }
}

/// Foreground/background combination bound to a pair index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fg: BaseColor,
    pub bg: BaseColor,
}

impl ColorPair {
    pub const fn new(fg: BaseColor, bg: BaseColor) -> Self {
        Self { fg, bg }
    }
}

impl Default for ColorPair {
    /// What pair 0 renders as.
    fn default() -> Self {
        Self::new(BaseColor::White, BaseColor::Black)
    }
}

/// Position and size of a window on screen, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Options applied when the interface is brought up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceConfig {
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Hide the hardware cursor while the interface is up.
    pub hide_cursor: bool,
    /// Put the terminal in raw (cbreak, no echo) mode.
    pub raw_mode: bool,
    /// Size of the color pair table, including the reserved pair 0.
    pub color_pairs: i16,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            hide_cursor: true,
            raw_mode: true,
            color_pairs: DEFAULT_COLOR_PAIRS,
        }
    }
}

impl InterfaceConfig {
    pub fn with_alternate_screen(mut self, on: bool) -> Self {
        self.alternate_screen = on;
        self
    }

    pub fn with_hide_cursor(mut self, on: bool) -> Self {
        self.hide_cursor = on;
        self
    }

    pub fn with_raw_mode(mut self, on: bool) -> Self {
        self.raw_mode = on;
        self
    }

    pub fn with_color_pairs(mut self, n: i16) -> Self {
        self.color_pairs = n;
        self
    }
}
