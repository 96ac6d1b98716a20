//! Shader program description and preflight checks.
//!
//! Sources are WGSL. Both stages are parsed and validated with naga, then
//! checked against each other and against the host-side layout:
//! - one `vec3<f32>` vertex input at location 0
//! - a `mat4x4<f32>` uniform named `transform` at group 0, binding 0
//! - every fragment input written by the vertex stage with the same type

mod error;
mod interface;
mod source;

pub use error::{ShaderError, Stage};
pub use interface::{
    ProgramInterface, POSITION_LOCATION, TRANSFORM_BINDING, TRANSFORM_GROUP, TRANSFORM_UNIFORM,
};
pub use source::{ShaderProgram, ShaderSources};
