use bytemuck::{Pod, Zeroable};

/// Position-only vertex (object space).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: [x, y, z] }
    }

    /// Three tightly packed `f32` at location 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit cube centered on the origin (corners at ±0.5).
///
/// Corner numbering: 0..3 on the `z = -0.5` face, 4..7 on `z = +0.5`,
/// each going counter-clockwise from `(-x, -y)`.
pub const CUBE_VERTICES: [Vertex; 8] = [
    Vertex::new(-0.5, -0.5, -0.5),
    Vertex::new(0.5, -0.5, -0.5),
    Vertex::new(0.5, 0.5, -0.5),
    Vertex::new(-0.5, 0.5, -0.5),
    Vertex::new(-0.5, -0.5, 0.5),
    Vertex::new(0.5, -0.5, 0.5),
    Vertex::new(0.5, 0.5, 0.5),
    Vertex::new(-0.5, 0.5, 0.5),
];

/// Two triangles per face, six faces: back, front, bottom, right, top, left.
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, //
    4, 5, 6, 6, 7, 4, //
    0, 1, 5, 5, 4, 0, //
    1, 2, 6, 6, 5, 1, //
    2, 3, 7, 7, 6, 2, //
    0, 3, 7, 7, 4, 0, //
];

/// Indexed triangle mesh borrowed from static data.
#[derive(Debug, Copy, Clone)]
pub struct Mesh {
    pub vertices: &'static [Vertex],
    pub indices: &'static [u32],
}

impl Mesh {
    pub const CUBE: Mesh = Mesh {
        vertices: &CUBE_VERTICES,
        indices: &CUBE_INDICES,
    };

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Faces as the pair of triangles that make up each quad.
    pub fn quads(&self) -> impl Iterator<Item = [[u32; 3]; 2]> + '_ {
        self.indices
            .chunks_exact(6)
            .map(|q| [[q[0], q[1], q[2]], [q[3], q[4], q[5]]])
    }

    /// Checks index count and index range against the vertex list.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle { index_count: self.indices.len() });
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }
        Ok(())
    }
}

/// Structural problem in an index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    PartialTriangle { index_count: usize },
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::PartialTriangle { index_count } => {
                write!(f, "index count {index_count} is not a multiple of 3")
            }
            MeshError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "index {index} out of range for {vertex_count} vertices")
            }
        }
    }
}

impl std::error::Error for MeshError {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::math::compose;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0]]
    }

    fn normal(mesh: &Mesh, t: [u32; 3]) -> [f32; 3] {
        let p = |i: u32| mesh.vertices[i as usize].pos;
        cross(sub(p(t[1]), p(t[0])), sub(p(t[2]), p(t[0])))
    }

    #[test]
    fn cube_counts() {
        let mesh = Mesh::CUBE;
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.quads().count(), 6);
    }

    #[test]
    fn cube_indices_in_range() {
        assert!(Mesh::CUBE.validate().is_ok());
        assert!(CUBE_INDICES.iter().all(|&i| i <= 7));
    }

    #[test]
    fn cube_corners_at_half_extent() {
        for v in CUBE_VERTICES {
            assert!(v.pos.iter().all(|c| c.abs() == 0.5));
        }
        let distinct: BTreeSet<_> = CUBE_VERTICES
            .iter()
            .map(|v| v.pos.map(|c| (c * 2.0) as i32))
            .collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn each_face_is_a_planar_quad_of_four_corners() {
        let mesh = Mesh::CUBE;
        let mut faces = BTreeSet::new();
        for [a, b] in mesh.quads() {
            let corners: BTreeSet<u32> = a.iter().chain(b.iter()).copied().collect();
            assert_eq!(corners.len(), 4, "face {a:?} {b:?}");

            // All four corners share one coordinate.
            let shared = (0..3).filter(|&axis| {
                let c = mesh.vertices[a[0] as usize].pos[axis];
                corners.iter().all(|&i| mesh.vertices[i as usize].pos[axis] == c)
            });
            assert_eq!(shared.count(), 1);

            faces.insert(corners.into_iter().collect::<Vec<_>>());
        }
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn quad_halves_are_wound_the_same_way() {
        let mesh = Mesh::CUBE;
        for [a, b] in mesh.quads() {
            let na = normal(&mesh, a);
            let nb = normal(&mesh, b);
            let dot: f32 = (0..3).map(|k| na[k] * nb[k]).sum();
            assert!(dot > 0.0, "face {a:?} {b:?} mixes windings");
        }
    }

    #[test]
    fn identity_transform_leaves_vertices_unchanged() {
        let m = compose(0.0);
        for v in Mesh::CUBE.vertices {
            assert_eq!(m.transform_point(v.pos), v.pos);
        }
    }

    #[test]
    fn validate_rejects_bad_index_lists() {
        static SHORT: [u32; 4] = [0, 1, 2, 3];
        static WILD: [u32; 3] = [0, 1, 8];
        let short = Mesh { vertices: &CUBE_VERTICES, indices: &SHORT };
        let wild = Mesh { vertices: &CUBE_VERTICES, indices: &WILD };
        assert_eq!(short.validate(), Err(MeshError::PartialTriangle { index_count: 4 }));
        assert_eq!(
            wild.validate(),
            Err(MeshError::IndexOutOfRange { index: 8, vertex_count: 8 })
        );
    }

    #[test]
    fn vertex_layout_is_three_floats() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].offset, 0);
    }
}
