//! Round identifiers.

/// Identifier of a network round. Round IDs increase monotonically and are
/// unbounded in principle; only a bounded window of them is ever tracked.
pub type RoundId = u64;
