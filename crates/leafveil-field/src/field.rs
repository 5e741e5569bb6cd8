#![forbid(unsafe_code)]

//! The flicker field: per-cell stop-time scheduling, contagion, and fade.
//!
//! A [`FlickerField`] owns one [`CellState`] per grid position. Every cell's
//! stop time is fixed at construction (radial distance, bent by a noise term,
//! plus one-shot jitter); at query time, already-settled neighbors can pull a
//! cell's effective stop earlier, which is what makes the reveal spread like
//! a contagion instead of a clean expanding ring.
//!
//! # Tick model
//!
//! Callers drive the field with a monotonic elapsed-time value, one tick per
//! animation frame. Neighbor influence is computed from a snapshot of the
//! settled flags taken when the elapsed time first changes, so the result of
//! a tick does not depend on the order cells are visited in.
//!
//! # Determinism
//!
//! All randomness (flicker periods, initial colors, scheduling jitter) comes
//! from the field's own RNG; construct with [`FlickerField::seeded`] for
//! bit-reproducible runs. The noise term is a pure function of position.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cell::{CellState, CellVisual, FlickerColor};
use crate::noise::noise2;
use crate::params::FieldParams;

/// Grid coordinates are scaled by this before sampling the noise field, so
/// neighboring cells land on nearby (correlated) noise values.
const NOISE_SCALE: f64 = 0.02;

/// The noise term perturbs the radial distance by up to this many cells
/// (times the irregularity weight).
const IRREGULARITY_SPAN: f64 = 100.0;

/// Super-linear decay curve: fast clearing near the center, long tail at
/// the rim.
const DECAY_EXPONENT: f64 = 2.5;

/// Per-cell timing/state model for the dissolve reveal.
///
/// See the [module docs](self) for the tick model. Out-of-range coordinates
/// and decreasing elapsed-time values are caller contract violations
/// (debug-asserted), not reported errors.
#[derive(Debug, Clone)]
pub struct FlickerField {
    width: u32,
    height: u32,
    center: (f64, f64),
    half_diagonal: f64,
    params: FieldParams,
    rng: StdRng,
    cells: Vec<CellState>,
    /// Elapsed time of the tick the settled snapshot was taken for.
    tick_ms: f64,
    /// Settled flags as of the start of the current tick.
    settled_at_tick: Vec<bool>,
}

impl FlickerField {
    /// Create a field with default parameters and an OS-entropy seed.
    pub fn new(width: u32, height: u32, center_x: f64, center_y: f64) -> Self {
        Self::build(
            width,
            height,
            center_x,
            center_y,
            FieldParams::default(),
            StdRng::from_os_rng(),
        )
    }

    /// Create a bit-reproducible field with default parameters.
    pub fn seeded(width: u32, height: u32, center_x: f64, center_y: f64, seed: u64) -> Self {
        Self::build(
            width,
            height,
            center_x,
            center_y,
            FieldParams::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Create a field with explicit parameters and an OS-entropy seed.
    pub fn with_params(
        width: u32,
        height: u32,
        center_x: f64,
        center_y: f64,
        params: FieldParams,
    ) -> Self {
        Self::build(width, height, center_x, center_y, params, StdRng::from_os_rng())
    }

    /// Create a bit-reproducible field with explicit parameters.
    pub fn seeded_with_params(
        width: u32,
        height: u32,
        center_x: f64,
        center_y: f64,
        params: FieldParams,
        seed: u64,
    ) -> Self {
        Self::build(
            width,
            height,
            center_x,
            center_y,
            params,
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(
        width: u32,
        height: u32,
        center_x: f64,
        center_y: f64,
        params: FieldParams,
        mut rng: StdRng,
    ) -> Self {
        let params = params.sanitized();
        let center = (center_x, center_y);
        let half_diagonal = ((width as f64).powi(2) + (height as f64).powi(2))
            .sqrt()
            .max(f64::EPSILON)
            / 2.0;
        let cells = init_cells(width, height, center, half_diagonal, &params, &mut rng);
        let len = cells.len();
        #[cfg(feature = "tracing")]
        tracing::debug!(width, height, center_x, center_y, "flicker field initialized");
        Self {
            width,
            height,
            center,
            half_diagonal,
            params,
            rng,
            cells,
            tick_ms: f64::NEG_INFINITY,
            settled_at_tick: vec![false; len],
        }
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reveal origin in cell coordinates (not necessarily on the grid).
    #[inline]
    pub const fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Effect parameters (sanitized at construction).
    #[inline]
    pub const fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Number of cells (`width × height`).
    #[inline]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True for zero-area grids.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(x, y)` lies in the permanent flicker border.
    #[inline]
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of range");
        is_border_at(self.width, self.height, self.params.border_thickness, x, y)
    }

    /// The stop time assigned to `(x, y)` at init/reset; `+∞` for border
    /// cells. Contagion is not reflected here: it is a query-time
    /// adjustment, never persisted.
    #[inline]
    pub fn scheduled_stop_ms(&self, x: u32, y: u32) -> f64 {
        self.cells[self.index(x, y)].stop_at_ms
    }

    /// Read access to a cell's full state, for diagnostics and tests.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> &CellState {
        &self.cells[self.index(x, y)]
    }

    /// Fraction of `(x, y)`'s up-to-8 neighbors that had settled as of the
    /// start of the current tick. 0 for a cell with no neighbors.
    pub fn neighbor_influence(&self, x: u32, y: u32) -> f64 {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of range");
        let (x, y) = (x as i64, y as i64);
        let (w, h) = (self.width as i64, self.height as i64);
        let mut neighbors = 0u32;
        let mut settled = 0u32;
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                neighbors += 1;
                if self.settled_at_tick[ny as usize * self.width as usize + nx as usize] {
                    settled += 1;
                }
            }
        }
        if neighbors == 0 {
            0.0
        } else {
            f64::from(settled) / f64::from(neighbors)
        }
    }

    /// Advance one cell to `elapsed_ms` and report its visual state.
    ///
    /// This is the per-cell entry point a renderer polls every frame.
    /// Elapsed time must be non-decreasing across calls; repeated queries at
    /// the same time are idempotent.
    pub fn cell_state(&mut self, x: u32, y: u32, elapsed_ms: f64) -> CellVisual {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of range");
        self.ensure_tick(elapsed_ms);
        self.update_cell(x, y, elapsed_ms);
        CellVisual::of(&self.cells[self.index(x, y)])
    }

    /// Advance every cell to `elapsed_ms` (one whole-grid tick).
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.ensure_tick(elapsed_ms);
        for y in 0..self.height {
            for x in 0..self.width {
                self.update_cell(x, y, elapsed_ms);
            }
        }
    }

    /// Advance every cell to `elapsed_ms` and write one [`CellVisual`] per
    /// cell, row-major, into a caller-owned buffer.
    ///
    /// No allocation in steady state. A length mismatch leaves `out`
    /// untouched.
    pub fn render_into(&mut self, elapsed_ms: f64, out: &mut [CellVisual]) {
        debug_assert_eq!(out.len(), self.len(), "output buffer length mismatch");
        if out.len() != self.len() {
            return;
        }
        self.advance(elapsed_ms);
        for (slot, cell) in out.iter_mut().zip(self.cells.iter()) {
            *slot = CellVisual::of(cell);
        }
    }

    /// Whether the effect is over at `elapsed_ms`.
    ///
    /// A wall-clock cutoff (`total + fade`), not a per-cell convergence
    /// check: border cells flicker forever, and the renderer is expected to
    /// stop drawing at this point regardless.
    #[inline]
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.params.completion_ms()
    }

    /// Effect progress as a percentage, clamped to `[0, 100]`.
    #[inline]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        (100.0 * elapsed_ms / self.params.completion_ms()).clamp(0.0, 100.0)
    }

    /// Reinitialize every cell as at construction: fresh flicker periods,
    /// colors, and jitter from the field's RNG stream; same noise field
    /// (noise is a function of position only).
    pub fn reset(&mut self) {
        self.cells = init_cells(
            self.width,
            self.height,
            self.center,
            self.half_diagonal,
            &self.params,
            &mut self.rng,
        );
        self.settled_at_tick.fill(false);
        self.tick_ms = f64::NEG_INFINITY;
        #[cfg(feature = "tracing")]
        tracing::debug!(width = self.width, height = self.height, "flicker field reset");
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of range");
        y as usize * self.width as usize + x as usize
    }

    /// Refresh the settled snapshot when the elapsed time changes.
    fn ensure_tick(&mut self, elapsed_ms: f64) {
        debug_assert!(
            elapsed_ms >= self.tick_ms,
            "elapsed time must be non-decreasing across queries ({elapsed_ms} < {})",
            self.tick_ms
        );
        if elapsed_ms != self.tick_ms {
            for (slot, cell) in self.settled_at_tick.iter_mut().zip(self.cells.iter()) {
                *slot = cell.settled();
            }
            self.tick_ms = elapsed_ms;
        }
    }

    fn update_cell(&mut self, x: u32, y: u32, elapsed_ms: f64) {
        let idx = self.index(x, y);
        let influence = if self.cells[idx].flickering && self.params.contagion > 0.0 {
            self.neighbor_influence(x, y)
        } else {
            0.0
        };
        let params = self.params;
        let cell = &mut self.cells[idx];

        if cell.flickering {
            let pull = influence * params.contagion * params.contagion_pull_ms;
            if elapsed_ms >= cell.stop_at_ms - pull {
                cell.flickering = false;
                cell.fading = true;
                cell.fade_start_ms = elapsed_ms;
            }
        }

        if cell.flickering && elapsed_ms - cell.last_toggle_ms >= cell.flicker_period_ms {
            cell.color = cell.color.toggled();
            cell.last_toggle_ms = elapsed_ms;
        }

        if cell.fading {
            cell.opacity =
                (1.0 - (elapsed_ms - cell.fade_start_ms) / params.fade_duration_ms).max(0.0);
        }
    }
}

fn init_cells(
    width: u32,
    height: u32,
    center: (f64, f64),
    half_diagonal: f64,
    params: &FieldParams,
    rng: &mut StdRng,
) -> Vec<CellState> {
    let mut cells = Vec::with_capacity(width as usize * height as usize);
    let (period_lo, period_hi) = params.flicker_period_ms;
    for y in 0..height {
        for x in 0..width {
            let flicker_period_ms = rng.random_range(period_lo..=period_hi);
            let color = if rng.random::<bool>() {
                FlickerColor::Light
            } else {
                FlickerColor::Dark
            };
            let stop_at_ms = schedule_stop(width, height, center, half_diagonal, params, x, y, rng);
            cells.push(CellState {
                flickering: true,
                flicker_period_ms,
                opacity: 1.0,
                stop_at_ms,
                last_toggle_ms: 0.0,
                color,
                fading: false,
                fade_start_ms: 0.0,
            });
        }
    }
    cells
}

/// Assign `(x, y)` its stop time. Called once per cell at init/reset.
#[allow(clippy::too_many_arguments)]
fn schedule_stop(
    width: u32,
    height: u32,
    center: (f64, f64),
    half_diagonal: f64,
    params: &FieldParams,
    x: u32,
    y: u32,
    rng: &mut StdRng,
) -> f64 {
    if is_border_at(width, height, params.border_thickness, x, y) {
        return f64::INFINITY;
    }
    let (fx, fy) = (x as f64, y as f64);
    let (dx, dy) = (fx - center.0, fy - center.1);
    let mut distance = (dx * dx + dy * dy).sqrt();
    distance += noise2(fx * NOISE_SCALE, fy * NOISE_SCALE) * params.irregularity * IRREGULARITY_SPAN;

    let mut t = (distance / half_diagonal).clamp(0.0, 1.0).powf(DECAY_EXPONENT);
    let half_variation = params.natural_variation / 2.0;
    t += rng.random_range(-half_variation..=half_variation);

    (t * params.total_duration_ms).clamp(0.0, params.total_duration_ms)
}

#[inline]
fn is_border_at(width: u32, height: u32, border: u32, x: u32, y: u32) -> bool {
    x < border || y < border || width - x <= border || height - y <= border
}
