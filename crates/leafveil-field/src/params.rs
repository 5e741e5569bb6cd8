#![forbid(unsafe_code)]

//! Effect parameters for the flicker field.

/// Parameters controlling dissolve timing and shape.
///
/// The defaults reproduce the reference effect: a ten-second flicker phase
/// with a two-second per-cell fade, spreading from the center with mild
/// noise irregularity and neighbor contagion, inside a ten-cell border that
/// flickers forever to frame the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Span of the scheduling window; every interior stop time lands in
    /// `[0, total_duration_ms]`.
    pub total_duration_ms: f64,
    /// How long a cell takes to fade from opacity 1 to 0 once it stops.
    pub fade_duration_ms: f64,
    /// Weight of the noise term bending the radial stop-time contour.
    pub irregularity: f64,
    /// Strength of the neighbor pull; a fully settled neighborhood moves a
    /// cell's effective stop earlier by `contagion * contagion_pull_ms`.
    pub contagion: f64,
    /// Maximum earlier-stop pull in milliseconds.
    pub contagion_pull_ms: f64,
    /// One-shot scheduling jitter, as a fraction of the total duration;
    /// each cell draws from `±natural_variation / 2`.
    pub natural_variation: f64,
    /// Cells within this many cells of any edge never stop flickering.
    pub border_thickness: u32,
    /// Per-cell flicker toggle interval is drawn once from this range (ms).
    pub flicker_period_ms: (f64, f64),
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            total_duration_ms: 10_000.0,
            fade_duration_ms: 2_000.0,
            irregularity: 0.3,
            contagion: 0.1,
            contagion_pull_ms: 2_000.0,
            natural_variation: 0.2,
            border_thickness: 10,
            flicker_period_ms: (50.0, 150.0),
        }
    }
}

impl FieldParams {
    /// Clamp degenerate values into a usable range.
    ///
    /// Applied once at field construction; keeps the public API infallible.
    pub fn sanitized(self) -> Self {
        let total_duration_ms = self.total_duration_ms.max(1.0);
        let fade_duration_ms = self.fade_duration_ms.max(1.0);
        let (lo, hi) = self.flicker_period_ms;
        let lo = lo.max(1.0);
        Self {
            total_duration_ms,
            fade_duration_ms,
            irregularity: self.irregularity.max(0.0),
            contagion: self.contagion.max(0.0),
            contagion_pull_ms: self.contagion_pull_ms.max(0.0),
            natural_variation: self.natural_variation.max(0.0),
            border_thickness: self.border_thickness,
            flicker_period_ms: (lo, hi.max(lo)),
        }
    }

    /// Elapsed time at which the whole effect is over: the scheduling window
    /// plus one full fade.
    #[inline]
    pub fn completion_ms(&self) -> f64 {
        self.total_duration_ms + self.fade_duration_ms
    }
}
