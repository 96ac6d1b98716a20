//! Cuboid engine crate.
//!
//! Platform + GPU runtime pieces for the cube viewer: window loop, device and
//! surface management, the cube renderer, and the math/mesh/shader data it draws.

pub mod core;
pub mod device;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
