//! High-order prism face-coupling kernels and multi-species transport properties for
//! discontinuous Galerkin flow solvers.
//!
//! * [domain]: reference prism geometry and quadrilateral face orientation maps
//! * [basis]: Gauss-Legendre quadrature and the orthonormal prism basis
//! * [face_coupling]: basis tables at face integration points and the DOF <-> point kernels
//! * [transport]: mixture thermodynamic state, viscosity and thermal conductivity

pub extern crate basis;
pub extern crate domain;
pub extern crate face_coupling;
pub extern crate transport;

pub use basis::{BasisTable, PrismBasis, DEFAULT_PAD_WIDTH};
pub use domain::{convert_quad_face_to_prism, QuadOrientation, V3D};
pub use face_coupling::{GemmKernel, QuadAdjacentPrism};
pub use transport::{evaluate_states, FluidScalar, MixtureConfig, SpeciesConfig, TransportState, ViscosityMixing};
