//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application driving it: setup/frame callbacks, per-frame context and
//! the lifecycle state machine.

mod app;
mod ctx;
mod lifecycle;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, SetupCtx, WindowCtx};
pub use lifecycle::Lifecycle;
