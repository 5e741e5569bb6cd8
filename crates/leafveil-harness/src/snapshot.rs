#![forbid(unsafe_code)]

//! One-character-per-cell ASCII rendering of a field tick.
//!
//! Snapshot-style assertions read better against a picture than against a
//! table of floats: a freshly constructed field is a wall of `#`/`+`, a
//! finished reveal is a flickering frame around a blank interior.

use leafveil_field::{CellState, FlickerColor, FlickerField};

/// Glyph for one cell: `#`/`+` for the two flicker states, `.` while
/// fading, space once fully revealed.
pub fn glyph(cell: &CellState) -> char {
    if cell.flickering {
        match cell.color {
            FlickerColor::Dark => '#',
            FlickerColor::Light => '+',
        }
    } else if cell.opacity > 0.0 {
        '.'
    } else {
        ' '
    }
}

/// Advance the field to `elapsed_ms` and render the whole grid as ASCII,
/// one row per line.
pub fn ascii_frame(field: &mut FlickerField, elapsed_ms: f64) -> String {
    field.advance(elapsed_ms);
    let (w, h) = (field.width(), field.height());
    let mut out = String::with_capacity((w as usize + 1) * h as usize);
    for y in 0..h {
        for x in 0..w {
            out.push(glyph(field.cell(x, y)));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_one_line_per_row() {
        let mut field = FlickerField::seeded(24, 8, 12.0, 4.0, 3);
        let frame = ascii_frame(&mut field, 0.0);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|line| line.chars().count() == 24));
    }

    #[test]
    fn fresh_field_has_no_revealed_cells() {
        // A cell scheduled at 0 can settle on the very first tick, but its
        // fade has not progressed yet, so nothing renders as blank.
        let mut field = FlickerField::seeded(24, 24, 12.0, 12.0, 5);
        let frame = ascii_frame(&mut field, 0.0);
        assert!(
            frame.chars().all(|c| c == '#' || c == '+' || c == '.' || c == '\n'),
            "unexpected glyph in fresh frame:\n{frame}"
        );
        assert!(!frame.contains(' '), "no cell is revealed at t=0:\n{frame}");
    }
}
