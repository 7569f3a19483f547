use domain::FaceMapError;
use thiserror::Error;

/// Fatal setup errors of the face-coupling machinery. These indicate a bug in the
/// caller's configuration, not a runtime condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid face/orientation combination: {0}")]
    FaceMap(#[from] FaceMapError),

    #[error("Dense product operand '{operand}' has shape {found:?}; expected {expected:?}")]
    GemmShape {
        operand: &'static str,
        expected: [usize; 2],
        found: [usize; 2],
    },
}

impl ConfigurationError {
    pub fn gemm_shape(operand: &'static str, expected: [usize; 2], found: [usize; 2]) -> Self {
        Self::GemmShape {
            operand,
            expected,
            found,
        }
    }
}
