//! Frame timing.
//!
//! Hosts driving animations call `FrameClock::tick()` once per draw cycle and
//! feed `FrameTime::dt` into tweens. `FrameClock::fixed` produces a constant
//! step for offline rendering and tests.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
