extern crate basis;
extern crate domain;

mod error;
mod gemm;
mod quad_adjacent_prism;

pub use error::ConfigurationError;
pub use gemm::{GemmKernel, GemmShape};
pub use quad_adjacent_prism::QuadAdjacentPrism;
