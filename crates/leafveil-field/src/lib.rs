#![forbid(unsafe_code)]

//! Cell-space flicker/dissolve reveal engine.
//!
//! # Role
//! `leafveil-field` is the timing/state core of the "flickering leaves"
//! dissolve: a grid overlay flickers chaotically, then cells stop and fade
//! to transparent, spreading outward from a center point with noise-bent
//! and neighbor-contagious timing, until the overlay has vanished. A ten-cell
//! border flickers forever to frame the reveal; completion is a wall-clock
//! cutoff, not per-cell convergence.
//!
//! # Primary responsibilities
//! - **Stop-time scheduling**: radial distance, bent by a deterministic
//!   noise field, shaped by a super-linear decay curve, jittered once.
//! - **Contagion**: settled neighbors pull a cell's effective stop earlier
//!   at query time; the schedule itself is never rewritten.
//! - **Per-frame state**: flicker toggling and fade progress derived from a
//!   caller-supplied, monotonic elapsed time.
//!
//! # How it fits in the system
//! The rendering glue is the caller's job: map cells to screen rectangles,
//! pick pixel colors for the two-state [`FlickerColor`] indicator, poll
//! [`FlickerField::cell_state`] (or [`FlickerField::render_into`]) once per
//! animation frame, and stop drawing once [`FlickerField::is_complete`]
//! reports true. The field holds no handles and performs no I/O; its only
//! resource is the cell grid it exclusively owns.
//!
//! # Quick start
//!
//! ```
//! use leafveil_field::FlickerField;
//!
//! let mut field = FlickerField::seeded(80, 24, 40.0, 12.0, 7);
//! let visual = field.cell_state(40, 12, 16.0);
//! assert!(visual.active);
//! assert!(visual.opacity > 0.9);
//! assert!(!field.is_complete(16.0));
//! ```

pub mod cell;
pub mod field;
pub mod noise;
pub mod params;

pub use cell::{CellState, CellVisual, FlickerColor};
pub use field::FlickerField;
pub use params::FieldParams;
