//! Error taxonomy for the public evaluation façade.

use thiserror::Error;

/// Everything that can keep [`crate::evaluate`] from returning a verdict.
///
/// `InvalidInput` is the only variant that indicates a caller bug; `NotWinning`
/// and `NoYaku` are legitimate rules outcomes, not failures of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The input multiset, melds, or context were not well-formed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputReason),

    /// The input was well-formed but no 4-melds-plus-pair, seven-pairs, or
    /// thirteen-orphans decomposition exists for it.
    #[error("hand is not a winning shape")]
    NotWinning,

    /// At least one decomposition exists but none of them produce any
    /// shape-derived yaku (dora/aka alone never legalize a win).
    #[error("hand has no qualifying yaku")]
    NoYaku,
}

/// The specific reason a call was rejected as [`EvaluationError::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInputReason {
    #[error("tile kind {0} is out of range (must be 0..=33)")]
    TileKindOutOfRange(u8),

    #[error("tile kind {kind} appears {count} times (max 4)")]
    TileCountExceedsFour { kind: u8, count: u8 },

    #[error("hand has {actual} tiles (closed + open), expected 14")]
    WrongTileCount { actual: usize },

    #[error("winning tile (kind {0}) is not present in the closed multiset")]
    WinningTileAbsent(u8),

    #[error("red-five flag set on non-five tile kind {0}")]
    RedFlagOnNonFive(u8),

    #[error("seat/round wind index {0} is out of range (must be 0..=3)")]
    WindIndexOutOfRange(u8),
}
