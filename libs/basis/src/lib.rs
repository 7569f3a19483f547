mod basis_fn;
mod basis_table;

pub use basis_fn::{
    gauss_quadrature_points, grad_vandermonde_prism, n_dofs_prism, n_points_for_order,
    normalized_jacobi, prism_dof_orders, tensor_weights, vandermonde_prism, JacobiPoly,
    PrismBasis,
};
pub use basis_table::{padded_len, BasisTable, DEFAULT_PAD_WIDTH};
