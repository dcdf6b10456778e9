/// Errors reported by the blocking API and the vector tooling.
/// The core itself never fails; these guard configuration, input parsing
/// and the host-side poll limit.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum XteaError {
    #[error("Round count must be at least 1.")]
    ZeroRounds,
    #[error("Round count {} does not fit the 6-bit ROUNDS register.", .0)]
    RoundsOutOfRange(u32),
    #[error("Core did not return to ready within the cycle limit.")]
    CoreTimeout,
    #[error("Invalid test vector: {}", .0)]
    InvalidVector(String),
}
