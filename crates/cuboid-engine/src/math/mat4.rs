use core::ops::Mul;

/// 4x4 single-precision matrix, row-major storage (`m[row][col]`).
///
/// Points are treated as column vectors: `M * p`. GPU upload goes through
/// [`Mat4::to_cols_array`] because WGSL matrices are column-major.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Row-major product `self * rhs`.
    pub fn mul_mat(&self, rhs: &Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for k in 0..4 {
                    acc += self.m[i][k] * rhs.m[k][j];
                }
                *cell = acc;
            }
        }
        Mat4 { m: out }
    }

    #[inline]
    pub fn row(&self, i: usize) -> [f32; 4] {
        self.m[i]
    }

    pub fn transpose(&self) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in self.m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                out[j][i] = *v;
            }
        }
        Mat4 { m: out }
    }

    /// Column-major flattening, as expected by a WGSL `mat4x4<f32>` uniform.
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        self.transpose().m
    }

    /// Applies the matrix to a point (`w = 1`) and drops `w`.
    ///
    /// No perspective divide: the matrices produced here are affine.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0f32; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.m[i][0] * v[0] + self.m[i][1] * v[1] + self.m[i][2] * v[2] + self.m[i][3] * v[3];
        }
        out
    }

    /// Upper-left 3x3 block (the linear part of an affine transform).
    pub fn linear_block(&self) -> [[f32; 3]; 3] {
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.m[i][..3]);
        }
        out
    }

    /// True if every element differs from `other` by at most `eps`.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        self.mul_mat(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq() -> Mat4 {
        let mut m = [[0.0f32; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (i * 4 + j) as f32;
            }
        }
        Mat4::from_rows(m)
    }

    #[test]
    fn identity_is_neutral() {
        let a = seq();
        assert_eq!(a * Mat4::IDENTITY, a);
        assert_eq!(Mat4::IDENTITY * a, a);
    }

    #[test]
    fn mul_is_row_by_column() {
        let a = Mat4::from_rows([
            [1.0, 2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let b = Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [3.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let c = a * b;
        assert_eq!(c.row(0), [7.0, 2.0, 0.0, 0.0]); // 1*1 + 2*3, 2*1
        assert_eq!(c.row(1), [3.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn cols_array_is_transpose() {
        let a = seq();
        let cols = a.to_cols_array();
        assert_eq!(cols[0], [0.0, 4.0, 8.0, 12.0]);
        assert_eq!(cols[3], [3.0, 7.0, 11.0, 15.0]);
    }

    #[test]
    fn transform_point_applies_translation_column() {
        let t = Mat4::from_rows([
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, -1.0],
            [0.0, 0.0, 1.0, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(t.transform_point([1.0, 1.0, 1.0]), [3.0, 0.0, 1.5]);
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        let mut b = Mat4::IDENTITY;
        b.m[2][1] = 1e-6;
        assert!(Mat4::IDENTITY.approx_eq(&b, 1e-5));
        assert!(!Mat4::IDENTITY.approx_eq(&b, 1e-7));
    }
}
