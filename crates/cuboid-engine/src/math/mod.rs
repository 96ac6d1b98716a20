//! Matrix math for the cube transform.
//!
//! Convention:
//! - `Mat4` is stored row-major and multiplies column vectors (`M * p`)
//! - angles are radians

mod mat4;
mod rotation;

pub use mat4::Mat4;
pub use rotation::{compose, rotate_x, rotate_y, Y_RATE};
