#![forbid(unsafe_code)]

//! Per-cell records for the flicker field.
//!
//! These are small, copyable value types. The field owns one [`CellState`]
//! per grid position and is its sole mutator; renderers only ever see the
//! [`CellVisual`] produced by a query.

/// Two-state color indicator for a flickering cell.
///
/// The engine never picks pixel colors. It only reports which of the two
/// flicker states a cell is in; the renderer maps `Dark`/`Light` to whatever
/// palette it draws the overlay with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlickerColor {
    /// The darker of the two overlay states.
    Dark,
    /// The lighter of the two overlay states.
    Light,
}

impl FlickerColor {
    /// The opposite state.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Numeric index (`Dark = 0`, `Light = 1`), for renderers that key
    /// palette lookups by integer.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Self::Dark => 0,
            Self::Light => 1,
        }
    }
}

/// Full mutable state of one grid cell.
///
/// `stop_at_ms` is assigned once at init/reset and never recomputed; the
/// neighbor-contagion pull is applied at query time as an adjustment and is
/// deliberately not persisted here. Border cells carry `f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    /// True while the cell is still in the chaotic toggling phase.
    pub flickering: bool,
    /// Personal toggle interval, drawn once at init from the configured range.
    pub flicker_period_ms: f64,
    /// Overlay opacity in `[0, 1]`. Starts at 1, non-increasing once fading.
    pub opacity: f64,
    /// Scheduled stop time in ms; `+∞` for border cells.
    pub stop_at_ms: f64,
    /// Elapsed time of the most recent color toggle.
    pub last_toggle_ms: f64,
    /// Current flicker state.
    pub color: FlickerColor,
    /// Set exactly once, when the cell transitions out of flickering.
    pub fading: bool,
    /// Elapsed time at which fading began (meaningful once `fading`).
    pub fade_start_ms: f64,
}

impl CellState {
    /// Whether the cell has left the flickering phase.
    #[inline]
    pub const fn settled(&self) -> bool {
        !self.flickering
    }
}

/// What a renderer needs to draw one cell for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisual {
    /// Which of the two flicker states to draw.
    pub color: FlickerColor,
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f64,
    /// False once the cell is fully revealed (not flickering, opacity 0);
    /// renderers can skip the fill entirely.
    pub active: bool,
}

impl CellVisual {
    pub(crate) fn of(cell: &CellState) -> Self {
        Self {
            color: cell.color,
            opacity: cell.opacity,
            active: cell.flickering || cell.opacity > 0.0,
        }
    }
}
