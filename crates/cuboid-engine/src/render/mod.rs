//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, bind groups) and
//! records into a [`RenderTarget`] whose attachments were cleared by the frame.

mod ctx;
pub mod cube;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube::CubeRenderer;
