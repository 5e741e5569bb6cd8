#![forbid(unsafe_code)]

//! Fixed-step playback of a flicker field.
//!
//! Drives a field the way a renderer would (one whole-grid tick per frame
//! at a fixed step) and records per-tick counters, so tests can assert on
//! the shape of a whole run instead of individual queries.

use leafveil_field::{CellVisual, FlickerColor, FlickerField};

/// Counters captured for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    /// Elapsed time this tick was evaluated at.
    pub elapsed_ms: f64,
    /// Cells still drawing something (flickering or mid-fade).
    pub active_cells: usize,
    /// Cells that have left the flickering phase.
    pub settled_cells: usize,
    /// Effect progress in `[0, 100]`.
    pub progress: f64,
    /// Whether the wall-clock cutoff has been reached.
    pub complete: bool,
}

/// Fixed-step driver around a [`FlickerField`].
#[derive(Debug)]
pub struct Playback {
    field: FlickerField,
    step_ms: f64,
    elapsed_ms: f64,
    scratch: Vec<CellVisual>,
}

impl Playback {
    /// Wrap a field, ticking every `step_ms` (clamped to at least 1 ms).
    pub fn new(field: FlickerField, step_ms: f64) -> Self {
        let scratch = vec![
            CellVisual {
                color: FlickerColor::Dark,
                opacity: 0.0,
                active: false,
            };
            field.len()
        ];
        Self {
            field,
            step_ms: step_ms.max(1.0),
            elapsed_ms: 0.0,
            scratch,
        }
    }

    /// The driven field.
    pub fn field(&self) -> &FlickerField {
        &self.field
    }

    /// Elapsed time the next tick will be evaluated at.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Evaluate one tick and advance the clock by one step.
    ///
    /// The first tick runs at 0 ms.
    pub fn tick(&mut self) -> TickRecord {
        let t = self.elapsed_ms;
        self.field.render_into(t, &mut self.scratch);

        let active_cells = self.scratch.iter().filter(|v| v.active).count();
        let mut settled_cells = 0;
        for y in 0..self.field.height() {
            for x in 0..self.field.width() {
                if self.field.cell(x, y).settled() {
                    settled_cells += 1;
                }
            }
        }

        let record = TickRecord {
            elapsed_ms: t,
            active_cells,
            settled_cells,
            progress: self.field.progress(t),
            complete: self.field.is_complete(t),
        };
        self.elapsed_ms = t + self.step_ms;
        record
    }

    /// Tick until the effect completes (inclusive), capped at `max_ticks`.
    pub fn run_to_completion(&mut self, max_ticks: usize) -> Vec<TickRecord> {
        let mut records = Vec::new();
        while records.len() < max_ticks {
            let record = self.tick();
            let done = record.complete;
            records.push(record);
            if done {
                break;
            }
        }
        records
    }
}
