use mixnet_primitives::{RoundState, NUM_STATES};

#[test]
fn states_string_to_protocol_names() {
    let expected = [
        (RoundState::Pending, "PENDING"),
        (RoundState::Precomputing, "PRECOMPUTING"),
        (RoundState::Standby, "STANDBY"),
        (RoundState::Queued, "QUEUED"),
        (RoundState::Realtime, "REALTIME"),
        (RoundState::Completed, "COMPLETED"),
        (RoundState::Failed, "FAILED"),
    ];
    for (state, name) in expected {
        assert_eq!(state.to_string(), name);
    }
}

#[test]
fn every_valid_value_converts() {
    for value in 0..NUM_STATES {
        let state = RoundState::try_from(value).unwrap();
        assert_eq!(state as u8, value);
    }
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = RoundState::try_from(NUM_STATES).unwrap_err();
    assert_eq!(err.to_string(), "unknown round state: 7");
    assert!(RoundState::try_from(200).is_err());
}
