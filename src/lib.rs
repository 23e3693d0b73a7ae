//! Small domain primitives shared by a mixnet network stack.
//!
//! The centerpiece is [`KnownRounds`], a compact circular bit tracker of
//! which network rounds a client has checked, together with its snapshot
//! codec. Around it sit the small value objects the stack passes between
//! layers: identity facts, the fixed-layout message serial, notification
//! CSV batches, and the round lifecycle states.

mod error;
mod fact;
mod known_rounds;
mod message;
mod notifications;
mod round;
mod states;
mod uint64_buff;

pub use error::PrimitivesError;
pub use fact::{
    unstringify_fact, unstringify_fact_type, validate_fact, Fact, FactType, MAX_FACT_LEN,
};
pub use known_rounds::{DiskKnownRounds, KnownRounds};
pub use message::{
    Message, CONTENTS_LEN, KEY_FP_LEN, MAC_LEN, PAYLOAD_LEN, RECIPIENT_ID_LEN, TIMESTAMP_LEN,
    TOTAL_LEN,
};
pub use notifications::{build_notification_csv, decode_notifications_csv, NotificationData};
pub use round::RoundId;
pub use states::{RoundState, NUM_STATES};
