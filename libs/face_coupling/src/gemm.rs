use super::ConfigurationError;
use nalgebra::DMatrix;
use rayon::prelude::*;

/// Dense matrix product kernel used to move data between DOFs and integration points.
///
/// The kernel is chosen once when a face-adjacency object is built and applied uniformly afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GemmKernel {
    /// Single-threaded product
    Standard,
    /// Columns of the result are computed in parallel
    Parallel,
}

impl Default for GemmKernel {
    fn default() -> Self {
        Self::Standard
    }
}

/// Shape of a dense product `C[m, n] = A[m, k] * B[k, n]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GemmShape {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

impl GemmShape {
    pub const fn new(m: usize, n: usize, k: usize) -> Self {
        Self { m, n, k }
    }
}

impl GemmKernel {
    /// Compute `A * B`, checking both operands against `shape`
    pub fn multiply(
        &self,
        shape: GemmShape,
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>, ConfigurationError> {
        check_shape("A", [shape.m, shape.k], a)?;
        check_shape("B", [shape.k, shape.n], b)?;

        let mut c = DMatrix::zeros(shape.m, shape.n);
        match self {
            Self::Standard => c.gemm(1.0, a, b, 0.0),
            Self::Parallel => {
                if shape.m > 0 {
                    c.as_mut_slice()
                        .par_chunks_mut(shape.m)
                        .enumerate()
                        .for_each(|(j, column)| {
                            for (row, out) in column.iter_mut().enumerate() {
                                *out = (0..shape.k).map(|l| a[(row, l)] * b[(l, j)]).sum();
                            }
                        });
                }
            }
        }

        Ok(c)
    }
}

fn check_shape(
    operand: &'static str,
    expected: [usize; 2],
    mat: &DMatrix<f64>,
) -> Result<(), ConfigurationError> {
    let found = [mat.nrows(), mat.ncols()];
    if found == expected {
        Ok(())
    } else {
        let err = ConfigurationError::gemm_shape(operand, expected, found);
        log::error!("{}", err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_agree() {
        let a = DMatrix::from_fn(5, 3, |r, c| (r as f64 + 1.0) * 0.5 - c as f64);
        let b = DMatrix::from_fn(3, 4, |r, c| (r * c) as f64 - 1.0);
        let shape = GemmShape::new(5, 4, 3);

        let standard = GemmKernel::Standard.multiply(shape, &a, &b).unwrap();
        let parallel = GemmKernel::Parallel.multiply(shape, &a, &b).unwrap();
        let reference = &a * &b;

        for (x, y) in standard.iter().zip(reference.iter()) {
            assert!((x - y).abs() < 1e-14);
        }
        for (x, y) in parallel.iter().zip(reference.iter()) {
            assert!((x - y).abs() < 1e-14);
        }
    }

    #[test]
    fn shape_mismatch() {
        let a = DMatrix::<f64>::zeros(5, 3);
        let b = DMatrix::<f64>::zeros(2, 4);

        assert_eq!(
            GemmKernel::Standard.multiply(GemmShape::new(5, 4, 3), &a, &b),
            Err(ConfigurationError::gemm_shape("B", [3, 4], [2, 4]))
        );
    }
}
