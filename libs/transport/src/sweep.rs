use super::{FluidScalar, TransportResult, TransportState};
use rayon::prelude::*;

/// Evaluate the transport state at many `(temperature, scalars)` points in parallel.
///
/// `model` is cloned once per rayon job (not per thread) and is never mutated itself. Results are
/// returned in the same order as `points`.
pub fn evaluate_states(model: &FluidScalar, points: &[(f64, Vec<f64>)]) -> Vec<TransportResult<TransportState>> {
    points
        .par_iter()
        .map_init(
            || model.clone(),
            |fluid, (temperature, scalars)| -> TransportResult<TransportState> {
                fluid.set_td_state_t(*temperature, scalars)?;
                Ok(fluid.state())
            },
        )
        .collect()
}
