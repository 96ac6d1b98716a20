use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, SetupCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Stop the loop normally.
    Exit,
    /// Stop the loop and report failure (non-zero exit).
    Abort,
}

/// Application contract implemented by the driver.
pub trait App {
    /// Called once after the window and GPU context exist, before the first frame.
    ///
    /// An error terminates the runtime; [`Runtime::run`](crate::window::Runtime::run)
    /// returns it.
    fn on_setup(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
