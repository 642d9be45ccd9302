//! Encodes framebuffers into crossterm command streams.
//!
//! Nothing here writes to the terminal. Callers encode into a byte buffer and
//! flush it in one write.

use std::io;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::FrameBuffer;
use crate::palette::{to_color, PairTable};
use crate::types::PairIndex;

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(
    fb: &FrameBuffer,
    pairs: &PairTable,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current: Option<PairIndex> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some(cell.pair) {
                apply_pair_into(out, pairs, cell.pair)?;
                current = Some(cell.pair);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs only) into `out`.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    pairs: &PairTable,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut current: Option<PairIndex> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current != Some(cell.pair) {
                apply_pair_into(out, pairs, cell.pair)?;
                current = Some(cell.pair);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if current.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_pair_into(out: &mut Vec<u8>, pairs: &PairTable, pair: PairIndex) -> io::Result<()> {
    let colors = pairs.resolve(pair);
    out.queue(SetForegroundColor(to_color(colors.fg)))?;
    out.queue(SetBackgroundColor(to_color(colors.bg)))?;
    Ok(())
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> io::Result<()>,
) -> io::Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
