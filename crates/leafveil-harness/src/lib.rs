#![forbid(unsafe_code)]

//! Test harness for LeafVeil.
//!
//! # Role
//! Deterministic fixtures and playback tooling for exercising
//! `leafveil-field` the way a renderer would: seed selection and stepping
//! clocks ([`determinism`]), fixed-step whole-run drivers ([`playback`]),
//! and ASCII frame rendering for snapshot-style assertions ([`snapshot`]).
//!
//! Nothing here ships in a renderer; it exists so integration tests can
//! assert on whole dissolve runs reproducibly.

pub mod determinism;
pub mod playback;
pub mod snapshot;

pub use determinism::DeterminismFixture;
pub use playback::{Playback, TickRecord};
