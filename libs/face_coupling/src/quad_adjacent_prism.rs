use super::{ConfigurationError, GemmKernel, GemmShape};
use basis::{
    gauss_quadrature_points, grad_vandermonde_prism, n_dofs_prism, n_points_for_order,
    tensor_weights, vandermonde_prism, BasisTable, DEFAULT_PAD_WIDTH,
};
use domain::{convert_quad_face_to_prism, QuadOrientation, V3D};
use nalgebra::DMatrix;

/// Basis data of a prism evaluated at the integration points of one of its quadrilateral faces.
///
/// Built once per (polynomial degree, integration order, face, orientation) and then shared
/// read-only by every element with the same configuration.
#[derive(Clone, Debug)]
pub struct QuadAdjacentPrism {
    n_poly: usize,
    order_exact: usize,
    face_id: usize,
    orientation: QuadOrientation,
    /// 1D Gauss-Legendre points along each face direction
    r_line: Vec<f64>,
    /// Quadrature weights of the true face integration points
    weights: Vec<f64>,
    /// Integration points in the parametric space of the prism: [r, s, t]
    points: [Vec<f64>; 3],
    leg_basis_int: BasisTable,
    der_leg_basis_int: [BasisTable; 3],
    gemm: GemmKernel,
}

impl QuadAdjacentPrism {
    /// Build the tables for face `face_id` of a degree `n_poly` prism, integrating polynomials of
    /// degree `order_exact` exactly, with the default padding and product kernel
    pub fn new(
        n_poly: usize,
        order_exact: usize,
        face_id: usize,
        orientation: u8,
    ) -> Result<Self, ConfigurationError> {
        Self::with_options(
            n_poly,
            order_exact,
            face_id,
            orientation,
            DEFAULT_PAD_WIDTH,
            GemmKernel::default(),
        )
    }

    pub fn with_options(
        n_poly: usize,
        order_exact: usize,
        face_id: usize,
        orientation: u8,
        pad_width: usize,
        gemm: GemmKernel,
    ) -> Result<Self, ConfigurationError> {
        let (r_line, w_line) = gauss_quadrature_points(n_points_for_order(order_exact));

        let [r, s, t] = convert_quad_face_to_prism(&r_line, face_id, orientation)?;
        let orientation = QuadOrientation::from_code(orientation)?;

        let n_int = r.len();
        let n_dofs = n_dofs_prism(n_poly);

        let mut leg_basis_int = BasisTable::zeros(n_int, n_dofs, pad_width);
        vandermonde_prism(n_poly, &r, &s, &t, &mut leg_basis_int);

        let mut der_leg_basis_int = [
            BasisTable::zeros(n_int, n_dofs, pad_width),
            BasisTable::zeros(n_int, n_dofs, pad_width),
            BasisTable::zeros(n_int, n_dofs, pad_width),
        ];
        {
            let [dr, ds, dt] = &mut der_leg_basis_int;
            grad_vandermonde_prism(n_poly, &r, &s, &t, dr, ds, dt);
        }

        log::debug!(
            "Built quad-adjacent prism tables: p={}, order={}, face={}, orientation={}, shape={:?} ({} true points)",
            n_poly,
            order_exact,
            face_id,
            orientation.code(),
            leg_basis_int.shape(),
            n_int,
        );

        Ok(Self {
            n_poly,
            order_exact,
            face_id,
            orientation,
            weights: tensor_weights(&w_line),
            r_line,
            points: [r, s, t],
            leg_basis_int,
            der_leg_basis_int,
            gemm,
        })
    }

    pub fn n_poly(&self) -> usize {
        self.n_poly
    }

    pub fn order_exact(&self) -> usize {
        self.order_exact
    }

    pub fn face_id(&self) -> usize {
        self.face_id
    }

    pub fn orientation(&self) -> QuadOrientation {
        self.orientation
    }

    pub fn n_dofs(&self) -> usize {
        self.leg_basis_int.n_dofs()
    }

    /// Number of true integration points on the face
    pub fn n_integration(&self) -> usize {
        self.leg_basis_int.n_points()
    }

    /// Number of integration points including padding
    pub fn n_integration_pad(&self) -> usize {
        self.leg_basis_int.n_padded()
    }

    pub fn line_points(&self) -> &[f64] {
        &self.r_line
    }

    pub fn integration_weights(&self) -> &[f64] {
        &self.weights
    }

    /// Parametric prism coordinates of integration point `p`
    pub fn integration_point(&self, p: usize) -> V3D {
        V3D::from([self.points[0][p], self.points[1][p], self.points[2][p]])
    }

    pub fn integration_points(&self) -> impl Iterator<Item = V3D> + '_ {
        (0..self.n_integration()).map(|p| self.integration_point(p))
    }

    pub fn basis_int(&self) -> &BasisTable {
        &self.leg_basis_int
    }

    /// Derivative tables `[d/dr, d/ds, d/dt]`
    pub fn der_basis_int(&self) -> &[BasisTable; 3] {
        &self.der_leg_basis_int
    }

    /// Interpolate a solution given in DOFs (`[n_dofs, n_var]`) to the padded integration points
    pub fn sol_int_points(&self, sol_dofs: &DMatrix<f64>) -> Result<DMatrix<f64>, ConfigurationError> {
        self.dofs_to_int(&self.leg_basis_int, sol_dofs)
    }

    /// Parametric gradients `[d/dr, d/ds, d/dt]` of a solution given in DOFs at the padded integration points
    pub fn grad_sol_int_points(
        &self,
        sol_dofs: &DMatrix<f64>,
    ) -> Result<[DMatrix<f64>; 3], ConfigurationError> {
        let [dr, ds, dt] = &self.der_leg_basis_int;
        Ok([
            self.dofs_to_int(dr, sol_dofs)?,
            self.dofs_to_int(ds, sol_dofs)?,
            self.dofs_to_int(dt, sol_dofs)?,
        ])
    }

    /// Project data given at the padded integration points (`[n_integration_pad, n_var]`) back onto
    /// the DOFs with the transposed basis. Padded rows never contribute.
    pub fn res_to_dofs(&self, res_int: &DMatrix<f64>) -> Result<DMatrix<f64>, ConfigurationError> {
        let n_int = self.n_integration();
        let expected = [self.n_integration_pad(), res_int.ncols()];
        let found = [res_int.nrows(), res_int.ncols()];
        if found != expected {
            let err = ConfigurationError::gemm_shape("integration point data", expected, found);
            log::error!("{}", err);
            return Err(err);
        }

        let basis_t = self.leg_basis_int.active_rows().transpose();
        let active = res_int.rows(0, n_int).clone_owned();

        self.gemm
            .multiply(GemmShape::new(self.n_dofs(), res_int.ncols(), n_int), &basis_t, &active)
    }

    fn dofs_to_int(
        &self,
        table: &BasisTable,
        sol_dofs: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>, ConfigurationError> {
        self.gemm.multiply(
            GemmShape::new(table.n_padded(), sol_dofs.ncols(), table.n_dofs()),
            table.matrix(),
            sol_dofs,
        )
    }
}
