//! Lifecycle states a round moves through.

use std::fmt;

use crate::error::PrimitivesError;

/// Number of valid round states.
pub const NUM_STATES: u8 = 7;

/// State of a round in the network lifecycle, in the order rounds move
/// through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RoundState {
    Pending = 0,
    Precomputing = 1,
    Standby = 2,
    Queued = 3,
    Realtime = 4,
    Completed = 5,
    Failed = 6,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundState::Pending => "PENDING",
            RoundState::Precomputing => "PRECOMPUTING",
            RoundState::Standby => "STANDBY",
            RoundState::Queued => "QUEUED",
            RoundState::Realtime => "REALTIME",
            RoundState::Completed => "COMPLETED",
            RoundState::Failed => "FAILED",
        })
    }
}

impl TryFrom<u8> for RoundState {
    type Error = PrimitivesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RoundState::Pending),
            1 => Ok(RoundState::Precomputing),
            2 => Ok(RoundState::Standby),
            3 => Ok(RoundState::Queued),
            4 => Ok(RoundState::Realtime),
            5 => Ok(RoundState::Completed),
            6 => Ok(RoundState::Failed),
            _ => Err(PrimitivesError::UnknownState(value)),
        }
    }
}
