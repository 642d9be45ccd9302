//! Color pair table.

use crossterm::style::Color;

use crate::types::{BaseColor, ColorPair, PairIndex, DEFAULT_PAIR};

/// Fixed-size table of color pair bindings.
///
/// Slot 0 always holds [`ColorPair::default`] and cannot be rebound.
#[derive(Debug, Clone)]
pub struct PairTable {
    slots: Vec<Option<ColorPair>>,
    generation: u64,
}

impl PairTable {
    pub fn new(len: i16) -> Self {
        let len = usize::try_from(len).unwrap_or(0).max(1);
        let mut slots = vec![None; len];
        slots[0] = Some(ColorPair::default());
        Self {
            slots,
            generation: 0,
        }
    }

    pub fn len(&self) -> i16 {
        i16::try_from(self.slots.len()).unwrap_or(i16::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    /// Bumped on every successful [`PairTable::set`].
    ///
    /// Renderers compare it to decide whether already-drawn cells need
    /// repainting.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn slot(&self, pair: PairIndex) -> Option<usize> {
        let i = usize::try_from(pair).ok()?;
        (i < self.slots.len()).then_some(i)
    }

    pub fn get(&self, pair: PairIndex) -> Option<ColorPair> {
        self.slot(pair).and_then(|i| self.slots[i])
    }

    /// Bind a pair, overwriting any earlier binding.
    ///
    /// Returns `false` (and changes nothing) for the reserved pair or an
    /// index outside the table.
    pub fn set(&mut self, pair: PairIndex, colors: ColorPair) -> bool {
        if pair == DEFAULT_PAIR {
            return false;
        }
        match self.slot(pair) {
            Some(i) => {
                self.slots[i] = Some(colors);
                self.generation += 1;
                true
            }
            None => false,
        }
    }

    /// Colors a cell tagged with `pair` renders with. Unbound pairs fall back
    /// to the default pair.
    pub fn resolve(&self, pair: PairIndex) -> ColorPair {
        self.get(pair).unwrap_or_default()
    }
}

pub(crate) fn to_color(c: BaseColor) -> Color {
    // Codes 0-7 are the terminal's own ANSI indices.
    Color::AnsiValue(c.code() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_zero_is_fixed() {
        let mut t = PairTable::new(8);
        assert_eq!(t.get(0), Some(ColorPair::default()));
        assert!(!t.set(0, ColorPair::new(BaseColor::Red, BaseColor::Red)));
        assert_eq!(t.get(0), Some(ColorPair::default()));
        assert_eq!(t.generation(), 0);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut t = PairTable::new(8);
        assert!(t.set(3, ColorPair::new(BaseColor::Red, BaseColor::Black)));
        assert!(t.set(3, ColorPair::new(BaseColor::Blue, BaseColor::White)));
        assert_eq!(
            t.get(3),
            Some(ColorPair::new(BaseColor::Blue, BaseColor::White))
        );
        assert_eq!(t.generation(), 2);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut t = PairTable::new(8);
        assert!(!t.set(8, ColorPair::default()));
        assert!(!t.set(-1, ColorPair::default()));
        assert_eq!(t.get(8), None);
        assert_eq!(t.get(-1), None);
    }

    #[test]
    fn unbound_pairs_resolve_to_default() {
        let t = PairTable::new(8);
        assert_eq!(t.get(5), None);
        assert_eq!(t.resolve(5), ColorPair::default());
    }

    #[test]
    fn base_colors_map_to_ansi_indices() {
        assert_eq!(to_color(BaseColor::Black), Color::AnsiValue(0));
        assert_eq!(to_color(BaseColor::White), Color::AnsiValue(7));
    }
}
