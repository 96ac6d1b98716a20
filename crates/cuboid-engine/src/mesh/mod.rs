//! Static mesh data.
//!
//! The cube is the only geometry; it is uploaded once and never mutated.

mod cube;

pub use cube::{Mesh, MeshError, Vertex, CUBE_INDICES, CUBE_VERTICES};
