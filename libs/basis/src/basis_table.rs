use nalgebra::{DMatrix, DMatrixSlice};
use rayon::prelude::*;

/// Default row alignment of a [BasisTable] (8 doubles = one 512-bit vector register)
pub const DEFAULT_PAD_WIDTH: usize = 8;

/// Round `n_points` up to the next multiple of `pad_width`
pub const fn padded_len(n_points: usize, pad_width: usize) -> usize {
    let pad_width = if pad_width == 0 { 1 } else { pad_width };
    ((n_points + pad_width - 1) / pad_width) * pad_width
}

/// Dense table of basis function values (or one derivative component) at a set of integration points.
///
/// Rows are integration points padded to a multiple of `pad_width`; columns are DOFs.
/// Padded rows are always zero. Immutable once built; read-only sharing across threads is safe.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisTable {
    n_points: usize,
    pad_width: usize,
    data: DMatrix<f64>,
}

impl BasisTable {
    pub fn zeros(n_points: usize, n_dofs: usize, pad_width: usize) -> Self {
        let pad_width = pad_width.max(1);
        Self {
            n_points,
            pad_width,
            data: DMatrix::zeros(padded_len(n_points, pad_width), n_dofs),
        }
    }

    /// Number of true integration points
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of rows including padding
    #[inline]
    pub fn n_padded(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn pad_width(&self) -> usize {
        self.pad_width
    }

    /// `[n_padded, n_dofs]`
    pub fn shape(&self) -> [usize; 2] {
        [self.n_padded(), self.n_dofs()]
    }

    #[inline]
    pub fn get(&self, point: usize, dof: usize) -> f64 {
        self.data[(point, dof)]
    }

    /// The full padded table
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// The rows belonging to true integration points
    pub fn active_rows(&self) -> DMatrixSlice<'_, f64> {
        self.data.rows(0, self.n_points)
    }

    /// Fill each DOF column (truncated to the true points) in parallel.
    /// `fill(dof, column)` must only write values for the points it is given.
    pub fn fill_columns<F>(&mut self, fill: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        let n_padded = self.n_padded();
        let n_points = self.n_points;
        if n_padded == 0 {
            return;
        }

        self.data
            .as_mut_slice()
            .par_chunks_mut(n_padded)
            .enumerate()
            .for_each(|(dof, column)| fill(dof, &mut column[..n_points]));
    }
}
