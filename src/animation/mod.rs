//! Time-driven frame production.

/// Per-frame update and the animation loop state machine.
pub mod runner;
/// Frame scheduling primitives (offline and realtime) and clocks.
pub mod scheduler;
/// Immutable start time and speed.
pub mod state;
