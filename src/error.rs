use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimitivesError {
    /// Snapshot envelope that does not parse.
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Incoming compressed bit stream larger than the local buffer.
    #[error(
        "known rounds bit stream of {have} words is too small for passed in \
         bit stream of {need} words"
    )]
    SnapshotCapacity { have: usize, need: usize },

    /// Bit stream byte form whose length is not a whole number of words.
    #[error("bit stream of {0} bytes is not a multiple of eight")]
    MalformedBitStream(usize),

    /// Fact construction or validation failure.
    #[error("fact error: {0}")]
    Fact(String),

    /// Unknown fact-type code or value.
    #[error("unknown fact type: {0}")]
    UnknownFactType(String),

    /// Round state value outside the valid range.
    #[error("unknown round state: {0}")]
    UnknownState(u8),

    /// Notification CSV record with missing or extra columns.
    #[error("notifications error: {0}")]
    Notifications(String),

    /// Notification CSV parse failure.
    #[error("notifications CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Notification column that does not decode as base64.
    #[error("notifications base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}
