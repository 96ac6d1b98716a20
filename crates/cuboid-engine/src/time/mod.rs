//! Time subsystem.
//!
//! One `FrameClock` per window, created together with the GPU context; call
//! `tick()` once per presented frame. `FrameTime::elapsed` drives animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
