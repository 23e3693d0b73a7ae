//! Tracks which rounds have been checked and which are unchecked using a
//! circular bit stream.
//!
//! The tracker compresses the infinite `round -> checked` function into two
//! cursors and a fixed window of bits: every round below `first_unchecked`
//! is implicitly checked, every round above `last_checked` is implicitly
//! unchecked, and for the rounds in between one bit each holds the answer.
//! The window slides forward as rounds are checked; it never grows past the
//! buffer's capacity.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PrimitivesError;
use crate::round::RoundId;
use crate::uint64_buff::Uint64Buff;

/// Circular bit-level tracker of checked rounds.
///
/// `fu_pos` is the bit position of `first_unchecked` in the stream; all
/// other positions are derived from it through a signed delta, so the
/// mapping stays valid while the cursors move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownRounds {
    bit_stream: Uint64Buff,
    first_unchecked: RoundId,
    last_checked: RoundId,
    fu_pos: usize,
}

/// Serialization envelope for [`KnownRounds`].
///
/// The bit stream holds one integer per 64-bit word, compressed so that the
/// word containing `first_unchecked` comes first. The field names and their
/// order are part of the wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskKnownRounds {
    #[serde(rename = "BitStream")]
    pub bit_stream: Vec<u64>,
    #[serde(rename = "FirstUnchecked")]
    pub first_unchecked: u64,
    #[serde(rename = "LastChecked")]
    pub last_checked: u64,
}

impl DiskKnownRounds {
    /// The bit stream in its byte form: big-endian, eight bytes per word.
    /// Storage layers that keep raw bytes use this instead of the numeric
    /// array the JSON envelope carries.
    pub fn bit_stream_bytes(&self) -> Vec<u8> {
        Uint64Buff(self.bit_stream.clone()).marshal()
    }

    /// Replace the bit stream from its byte form. The length must be a
    /// multiple of eight.
    pub fn set_bit_stream_bytes(&mut self, data: &[u8]) -> Result<(), PrimitivesError> {
        self.bit_stream = Uint64Buff::unmarshal(data)?.0;
        Ok(())
    }
}

impl KnownRounds {
    /// Create an empty tracker whose bit stream can hold `round_capacity`
    /// rounds, rounded up to a whole number of 64-bit words.
    pub fn new(round_capacity: usize) -> Self {
        KnownRounds {
            bit_stream: Uint64Buff::new((round_capacity + 63) / 64),
            first_unchecked: 0,
            last_checked: 0,
            fu_pos: 0,
        }
    }

    /// Capacity in rounds.
    pub fn len(&self) -> usize {
        self.bit_stream.bit_len()
    }

    /// Whether the tracker was created without a buffer, as the wire
    /// representation is before its first [`KnownRounds::unmarshal`].
    pub fn is_empty(&self) -> bool {
        self.bit_stream.is_empty()
    }

    /// Serialize the tracker. Only the words between `first_unchecked` and
    /// `last_checked` are emitted, rotated so that the word holding
    /// `first_unchecked` comes first.
    pub fn marshal(&self) -> Result<Vec<u8>, PrimitivesError> {
        let start_pos = self.bit_pos(self.first_unchecked);
        let end_pos = self.bit_pos(self.last_checked);
        let length = self.bit_stream.delta(start_pos, end_pos);

        let start_block = (start_pos / 64) as usize;
        let words = self.bit_stream.len();
        let mut bit_stream = Vec::with_capacity(length);
        for i in 0..length {
            bit_stream.push(self.bit_stream.0[(i + start_block) % words]);
        }

        let dkr = DiskKnownRounds {
            bit_stream,
            first_unchecked: self.first_unchecked,
            last_checked: self.last_checked,
        };
        Ok(serde_json::to_vec(&dkr)?)
    }

    /// Parse a snapshot produced by [`KnownRounds::marshal`] into this
    /// tracker. A tracker without a buffer adopts the incoming one; one with
    /// a buffer must be at least as large as the incoming span.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), PrimitivesError> {
        let dkr: DiskKnownRounds = serde_json::from_slice(data)?;
        let incoming = Uint64Buff(dkr.bit_stream);

        if self.bit_stream.is_empty() {
            self.bit_stream = incoming;
        } else if self.bit_stream.len() >= incoming.len() {
            self.bit_stream.0[..incoming.len()].copy_from_slice(&incoming.0);
        } else {
            return Err(PrimitivesError::SnapshotCapacity {
                have: self.bit_stream.len(),
                need: incoming.len(),
            });
        }

        self.first_unchecked = dkr.first_unchecked;
        self.last_checked = dkr.last_checked;
        // The stored span was rotated so first_unchecked lives in word 0 at
        // its original offset within the word.
        self.fu_pos = (dkr.first_unchecked % 64) as usize;

        Ok(())
    }

    /// Report whether `rid` has been checked.
    pub fn checked(&self, rid: RoundId) -> bool {
        if rid < self.first_unchecked {
            return true;
        }
        if rid > self.last_checked {
            return false;
        }
        self.bit_stream.get(self.bit_pos(rid) as usize)
    }

    /// Record that `rid` has been checked. When `rid` is newer than
    /// `last_checked`, every round between them enters the active window as
    /// unchecked and `rid` becomes the last checked round.
    ///
    /// # Panics
    ///
    /// Panics when `rid` lies a full buffer length or more away from
    /// `last_checked`. Callers that expect to jump use
    /// [`KnownRounds::force_check`].
    pub fn check(&mut self, rid: RoundId) {
        if self.last_checked.abs_diff(rid) as usize >= self.len() {
            panic!(
                "cannot check round {rid} outside the current scope; the scope ends {} rounds \
                 after the last checked round {}, and forward() moves it",
                self.len(),
                self.last_checked,
            );
        }
        self.check_inner(rid);
    }

    /// Record that `rid` has been checked, sliding the window forward first
    /// if the buffer cannot hold both `rid` and the current window. Sliding
    /// erases the oldest data.
    pub fn force_check(&mut self, rid: RoundId) {
        if self.last_checked.abs_diff(rid) as usize >= self.len() {
            self.forward(rid.saturating_sub(self.len() as u64));
        }
        self.check_inner(rid);
    }

    fn check_inner(&mut self, rid: RoundId) {
        if rid < self.first_unchecked {
            return;
        }
        let pos = self.bit_pos(rid);
        self.bit_stream.set(pos as usize);

        // A newer round extends the window; everything newly brought into it
        // starts out unchecked.
        if rid > self.last_checked {
            let from = self.bit_pos(self.last_checked + 1);
            self.bit_stream.clear_range(from as usize, pos as usize);
            self.last_checked = rid;
        }

        if self.bit_pos(self.first_unchecked) == pos {
            if self.bit_pos(self.last_checked) == pos {
                // Single-bit window: checking it leaves an empty window just
                // past rid.
                self.fu_pos = self.bit_pos(rid + 1) as usize;
                self.first_unchecked = rid + 1;
                self.last_checked = rid + 1;
                self.bit_stream.clear(self.fu_pos);
            } else {
                self.migrate_first_unchecked(rid);
            }
        }

        // rid may have lapped first_unchecked one or more times.
        if rid > self.first_unchecked && (rid - self.first_unchecked) as usize >= self.len() {
            let new_fu = rid + 1 - self.len() as u64;
            self.fu_pos = self.bit_pos(new_fu) as usize;
            self.first_unchecked = new_fu;
            self.migrate_first_unchecked(rid);
        }

        self.bit_stream.set(pos as usize);
    }

    /// Advance `first_unchecked` to the next unchecked round, or to
    /// `last_checked` when every round in between is checked.
    fn migrate_first_unchecked(&mut self, mut rid: RoundId) {
        while self.bit_stream.get(self.bit_pos(rid) as usize) && rid < self.last_checked {
            rid += 1;
        }
        self.fu_pos = self.bit_pos(rid) as usize;
        self.first_unchecked = rid;
    }

    /// Mark every round before `rid` as checked. Moving past the window
    /// resets it to the empty state just before `rid`; the cursor never
    /// moves backward.
    pub fn forward(&mut self, rid: RoundId) {
        if rid > self.last_checked {
            self.first_unchecked = rid;
            self.last_checked = rid - 1;
            self.fu_pos = (rid % 64) as usize;
        } else if rid >= self.first_unchecked {
            self.migrate_first_unchecked(rid);
        }
    }

    /// Scan rounds not yet known to be checked, starting at `oldest_unknown`,
    /// asking `round_check` about each one with at most `max_checked`
    /// predicate calls. Rounds already checked are skipped without consuming
    /// budget. Returns the round the caller should resume scanning from.
    pub fn range_unchecked<F>(
        &self,
        oldest_unknown: RoundId,
        max_checked: usize,
        mut round_check: F,
    ) -> RoundId
    where
        F: FnMut(RoundId) -> bool,
    {
        let mut num_checked = 0usize;
        let mut earliest_checked = RoundId::MAX;

        // Nothing at or past oldest_unknown is knowable.
        if oldest_unknown > self.last_checked {
            return oldest_unknown;
        }

        // The region before the window is implicitly checked, but the oracle
        // gets a chance to disagree.
        for i in oldest_unknown..self.first_unchecked {
            if num_checked >= max_checked {
                return earliest_checked.min(i);
            }
            if !round_check(i) {
                earliest_checked = earliest_checked.min(i);
            }
            num_checked += 1;
        }

        let newest_round = oldest_unknown.max(self.first_unchecked);
        for i in newest_round..=self.last_checked {
            if num_checked >= max_checked {
                return earliest_checked.min(i);
            }
            if self.checked(i) {
                continue;
            }
            if !round_check(i) {
                earliest_checked = earliest_checked.min(i);
            }
            num_checked += 1;
        }

        if self.last_checked + 1 < earliest_checked {
            earliest_checked = self.last_checked;
        }

        earliest_checked + 1
    }

    /// Unbounded sweep up to and including `newest_round`: rounds past the
    /// window are force-checked when the predicate approves them, then the
    /// unchecked rounds inside the window get the same treatment. A
    /// `newest_round` before the window does nothing.
    pub fn range_unchecked_all<F>(&mut self, newest_round: RoundId, mut round_check: F)
    where
        F: FnMut(RoundId) -> bool,
    {
        if newest_round < self.first_unchecked {
            return;
        }

        // Extend past the window first so it only grows once.
        for rid in self.last_checked + 1..=newest_round {
            if round_check(rid) {
                self.force_check(rid);
            }
        }

        for rid in self.first_unchecked..=self.last_checked {
            if !self.checked(rid) && round_check(rid) {
                self.check(rid);
            }
        }
    }

    /// Integrate a peer's view of the round space, asking `round_check`
    /// about each round the mask knows and this tracker does not, with at
    /// most `max_checked` iterations.
    pub fn range_unchecked_masked<F>(
        &mut self,
        mask: &mut KnownRounds,
        round_check: F,
        max_checked: usize,
    ) where
        F: FnMut(RoundId) -> bool,
    {
        self.range_unchecked_masked_range(mask, round_check, 0, RoundId::MAX, max_checked);
    }

    /// Same as [`KnownRounds::range_unchecked_masked`], with the residual
    /// scan restricted to `[start, end)`.
    pub fn range_unchecked_masked_range<F>(
        &mut self,
        mask: &mut KnownRounds,
        mut round_check: F,
        start: RoundId,
        end: RoundId,
        max_checked: usize,
    ) where
        F: FnMut(RoundId) -> bool,
    {
        let mut num_checked = 0usize;

        if mask.first_unchecked != mask.last_checked {
            // Drop the part of the mask our implicit prefix already covers.
            mask.forward(self.first_unchecked);
            let (sub_sample, delta) =
                self.sub_sample(mask.first_unchecked, mask.last_checked);
            trace!(
                mask_first_unchecked = mask.first_unchecked,
                mask_last_checked = mask.last_checked,
                first_unchecked = self.first_unchecked,
                last_checked = self.last_checked,
                delta,
                "integrating mask"
            );

            // A zero bit marks a round the mask knows about and we do not.
            let result = mask.bit_stream.implies(&sub_sample);

            // Newest first: fresh information is worth more and causes fewer
            // window migrations.
            let mut i = mask.first_unchecked + delta as u64;
            while i > mask.first_unchecked && num_checked < max_checked {
                i -= 1;
                if !result.get((i - mask.first_unchecked) as usize) && round_check(i) {
                    self.check(i);
                }
                num_checked += 1;
            }
        }

        let start = start.max(self.first_unchecked);
        let end = end.min(mask.first_unchecked);
        let mut i = start;
        while i < end && num_checked < max_checked {
            if !self.checked(i) && round_check(i) {
                self.check(i);
            }
            i += 1;
            num_checked += 1;
        }
    }

    /// Extract the span `[start, end]` of the stream as a zero-based buffer,
    /// along with the number of rounds it covers.
    fn sub_sample(&self, start: RoundId, end: RoundId) -> (Uint64Buff, usize) {
        let num_blocks = self
            .bit_stream
            .delta(self.bit_pos(start), self.bit_pos(end));

        if start > self.last_checked {
            return (Uint64Buff::new(num_blocks), num_blocks);
        }

        let copy_end = end.min(self.last_checked);
        let buff = self.bit_stream.copy(
            self.bit_pos(start) as usize,
            self.bit_pos(copy_end + 1) as usize,
        );

        (buff.extend(num_blocks), end.abs_diff(start) as usize)
    }

    /// Bit position of `rid` in the stream. Negative when `rid` precedes
    /// `first_unchecked`; callers use that as a "before the window" marker
    /// and otherwise guarantee `rid >= first_unchecked`.
    fn bit_pos(&self, rid: RoundId) -> i64 {
        let delta = rid.wrapping_sub(self.first_unchecked) as i64;
        (self.fu_pos as i64 + delta) % self.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = u64::MAX;

    fn kr(
        words: Vec<u64>,
        first_unchecked: RoundId,
        last_checked: RoundId,
        fu_pos: usize,
    ) -> KnownRounds {
        KnownRounds {
            bit_stream: Uint64Buff(words),
            first_unchecked,
            last_checked,
            fu_pos,
        }
    }

    #[test]
    fn new_known_rounds() {
        let tracker = KnownRounds::new(320);
        assert_eq!(tracker.len(), 320);
        assert_eq!(tracker.bit_stream, Uint64Buff(vec![0; 5]));
        assert_eq!(tracker.first_unchecked, 0);
        assert_eq!(tracker.last_checked, 0);
        assert_eq!(tracker.fu_pos, 0);

        // Capacities round up to whole words.
        assert_eq!(KnownRounds::new(5).len(), 64);
        assert_eq!(KnownRounds::new(65).len(), 128);
    }

    #[test]
    fn marshal_compresses_active_span() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 150, 75);
        let expected = format!(
            "{{\"BitStream\":[{MAX},0],\"FirstUnchecked\":75,\"LastChecked\":150}}"
        );
        assert_eq!(tracker.marshal().unwrap(), expected.into_bytes());
    }

    #[test]
    fn unmarshal_round_trip() {
        let tracker = kr(vec![0, MAX, 0, 0, 0], 75, 150, 11);
        let data = tracker.marshal().unwrap();

        let mut loaded = KnownRounds::new(320);
        loaded.unmarshal(&data).unwrap();
        assert_eq!(loaded, tracker);
    }

    #[test]
    fn unmarshal_rejects_oversized_stream() {
        let tracker = kr(vec![0, MAX, 0, 0, 0], 75, 150, 11);
        let data = tracker.marshal().unwrap();

        let mut small = KnownRounds::new(64);
        let err = small.unmarshal(&data).unwrap_err();
        assert!(matches!(
            err,
            PrimitivesError::SnapshotCapacity { have: 1, need: 2 }
        ));
    }

    #[test]
    fn unmarshal_rejects_invalid_json() {
        let mut tracker = KnownRounds::new(64);
        assert!(tracker.unmarshal(b"hello").is_err());
    }

    #[test]
    fn check_transitions() {
        // (rid, expected last_checked, expected buffer)
        let cases: [(RoundId, RoundId, Vec<u64>); 5] = [
            (0, 200, vec![0, MAX, 0, MAX, 0]),
            (75, 200, vec![4503599627370496, MAX, 0, MAX, 0]),
            (95, 200, vec![4294967296, MAX, 0, MAX, 0]),
            (150, 200, vec![0, MAX, 0, MAX, 0]),
            (320, 320, vec![0, MAX, 0, 0, 0x8000000000000000]),
        ];

        let mut tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 200, 11);
        for (rid, expected_last_checked, expected_buff) in cases {
            tracker.bit_stream = Uint64Buff(vec![0, MAX, 0, MAX, 0]);
            tracker.check(rid);
            assert_eq!(
                tracker.bit_stream.0, expected_buff,
                "buffer mismatch after checking round {rid}"
            );
            assert_eq!(
                tracker.last_checked, expected_last_checked,
                "last_checked mismatch after checking round {rid}"
            );
        }
    }

    #[test]
    fn check_on_fresh_tracker() {
        let mut tracker = KnownRounds::new(320);
        tracker.check(1);
        assert_eq!(tracker.bit_stream.0, vec![1 << 62, 0, 0, 0, 0]);
        assert_eq!(tracker.last_checked, 1);
        assert_eq!(tracker.first_unchecked, 0);

        // Checking the single-bit initial window advances both cursors.
        let mut tracker = KnownRounds::new(320);
        tracker.check(0);
        assert_eq!(tracker.bit_stream.0, vec![1 << 63, 0, 0, 0, 0]);
        assert_eq!(tracker.first_unchecked, 1);
        assert_eq!(tracker.last_checked, 1);

        let mut tracker = KnownRounds::new(320);
        tracker.check(75);
        assert_eq!(tracker.bit_stream.0, vec![0, 0x10000000000000, 0, 0, 0]);
        assert_eq!(tracker.last_checked, 75);
        assert_eq!(tracker.first_unchecked, 0);
    }

    #[test]
    fn force_check_slides_window() {
        let mut tracker = KnownRounds::new(320);
        tracker.force_check(320);
        assert_eq!(tracker.bit_stream.0, vec![1 << 63, 0, 0, 0, 0]);
        assert_eq!(tracker.first_unchecked, 321);
        assert_eq!(tracker.last_checked, 321);
        assert!(tracker.checked(320));
        assert!(tracker.checked(0));
        assert!(!tracker.checked(321));
    }

    #[test]
    #[should_panic(expected = "outside the current scope")]
    fn check_panics_outside_scope() {
        let mut tracker = KnownRounds::new(320);
        tracker.check(320);
    }

    #[test]
    fn checked_lookups() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 200, 11);
        let cases: [(RoundId, bool); 9] = [
            (75, false),
            (76, false),
            (123, false),
            (124, false),
            (74, true),
            (60, true),
            (0, true),
            (319, false),
            (320, false),
        ];
        for (rid, expected) in cases {
            assert_eq!(tracker.checked(rid), expected, "round {rid}");
        }
    }

    #[test]
    fn checked_on_fresh_tracker() {
        for rid in [0, 1, 2, 320] {
            assert!(!KnownRounds::new(320).checked(rid), "round {rid}");
        }
    }

    #[test]
    fn forward_moves_cursors() {
        // (rid, expected first_unchecked, expected last_checked, expected fu_pos)
        let cases: [(RoundId, RoundId, RoundId, usize); 6] = [
            (75, 75, 200, 11),
            (76, 76, 200, 12),
            (192, 192, 200, 128),
            (150, 192, 200, 128), // never moves backward
            (200, 200, 200, 136),
            (210, 210, 209, 18),
        ];

        let mut tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 200, 11);
        for (rid, expected_fu, expected_lc, expected_fu_pos) in cases {
            tracker.bit_stream = Uint64Buff(vec![0, MAX, 0, MAX, 0]);
            tracker.forward(rid);
            assert_eq!(tracker.first_unchecked, expected_fu, "round {rid}");
            assert_eq!(tracker.last_checked, expected_lc, "round {rid}");
            assert_eq!(tracker.fu_pos, expected_fu_pos, "round {rid}");
        }
    }

    #[test]
    fn forward_on_fresh_tracker() {
        let cases: [(RoundId, RoundId, RoundId, usize); 4] = [
            (0, 0, 0, 0),
            (1, 1, 0, 1),
            (2, 2, 1, 2),
            (320, 320, 319, 0),
        ];
        for (rid, expected_fu, expected_lc, expected_fu_pos) in cases {
            let mut tracker = KnownRounds::new(320);
            tracker.forward(rid);
            assert_eq!(tracker.first_unchecked, expected_fu, "round {rid}");
            assert_eq!(tracker.last_checked, expected_lc, "round {rid}");
            assert_eq!(tracker.fu_pos, expected_fu_pos, "round {rid}");
        }
    }

    #[test]
    fn range_unchecked_all_sweeps() {
        // (newest round, expected last_checked, expected buffer)
        let cases: [(RoundId, RoundId, Vec<u64>); 3] = [
            (256, 255, vec![6004799503160661, MAX, 6148914691236517205, MAX, 0]),
            (170, 191, vec![6004799503160661, MAX, 0, MAX, 0]),
            (70, 191, vec![0, MAX, 0, MAX, 0]),
        ];

        for (newest, expected_lc, expected_buff) in cases {
            let mut tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 191, 11);
            tracker.range_unchecked_all(newest, |rid| rid % 2 == 1);
            assert_eq!(
                tracker.bit_stream.0, expected_buff,
                "buffer mismatch sweeping to {newest}"
            );
            assert_eq!(
                tracker.last_checked, expected_lc,
                "last_checked mismatch sweeping to {newest}"
            );
        }
    }

    #[test]
    fn range_unchecked_all_on_fresh_tracker() {
        const ODDS: u64 = 6148914691236517205; // 0b0101...
        let cases: [(RoundId, RoundId, Vec<u64>); 3] = [
            (256, 255, vec![ODDS, ODDS, ODDS, ODDS, 0]),
            (170, 169, vec![ODDS, ODDS, 6148914691235119104, 0, 0]),
            (63, 63, vec![ODDS, 0, 0, 0, 0]),
        ];

        for (newest, expected_lc, expected_buff) in cases {
            let mut tracker = KnownRounds::new(320);
            tracker.range_unchecked_all(newest, |rid| rid % 2 == 1);
            assert_eq!(
                tracker.bit_stream.0, expected_buff,
                "buffer mismatch sweeping to {newest}"
            );
            assert_eq!(
                tracker.last_checked, expected_lc,
                "last_checked mismatch sweeping to {newest}"
            );
        }
    }

    #[test]
    fn range_unchecked_returns_resume_cursor() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 191, 11);

        // 70, 72, and 74 fail the predicate, so scanning resumes just past
        // the earliest of them.
        let next = tracker.range_unchecked(70, 1000, |rid| rid % 2 == 1);
        assert_eq!(next, 71);

        // A predicate that accepts everything pushes the cursor past the
        // window.
        let next = tracker.range_unchecked(70, 1000, |_| true);
        assert_eq!(next, 192);

        // Rounds past the window are not knowable.
        let next = tracker.range_unchecked(192, 1000, |_| true);
        assert_eq!(next, 192);

        // Already-checked rounds cost no budget.
        let next = tracker.range_unchecked(128, 1000, |_| false);
        assert_eq!(next, 192);
    }

    #[test]
    fn range_unchecked_honors_budget() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 191, 11);

        // Budget runs out at round 73; round 70 was the earliest failure.
        let next = tracker.range_unchecked(70, 3, |rid| rid % 2 == 1);
        assert_eq!(next, 70);

        let mut calls = 0usize;
        tracker.range_unchecked(70, 3, |_| {
            calls += 1;
            true
        });
        assert_eq!(calls, 3);
    }

    #[test]
    fn range_unchecked_masked_integrates_peer_view() {
        let mut tracker = kr(vec![0, MAX, 0, MAX, 0], 15, 191, 0);
        let mut mask = kr(vec![MAX], 20, 47, 0);

        tracker.range_unchecked_masked(&mut mask, |rid| rid % 2 == 1, 5);

        let expected = kr(vec![42949672960, MAX, 0, MAX, 0], 15, 191, 0);
        assert_eq!(tracker, expected);
    }

    #[test]
    fn bit_pos_signed_mapping() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 85, 11);
        let cases: [(RoundId, i64); 9] = [
            (75, 11),
            (76, 12),
            (123, 59),
            (124, 60),
            (74, 10),
            (60, -4),
            (0, -64),
            (319, 255),
            (320, 256),
        ];
        for (rid, expected) in cases {
            assert_eq!(tracker.bit_pos(rid), expected, "round {rid}");
        }
    }

    #[test]
    fn sub_sample_extracts_span() {
        let tracker = kr(vec![0, MAX, 0, MAX, 0], 75, 200, 11);

        let (buff, length) = tracker.sub_sample(75, 138);
        assert_eq!(buff.0, vec![0x7FF, 0]);
        assert_eq!(length, 63);

        // A span entirely past the window is all zeros and reports its
        // length in words.
        let (buff, length) = tracker.sub_sample(250, 260);
        assert_eq!(buff.0, vec![0, 0]);
        assert_eq!(length, 2);
    }

    #[test]
    fn marshal_after_forward_reset() {
        let mut tracker = KnownRounds::new(320);
        tracker.forward(320);
        let data = tracker.marshal().unwrap();
        assert_eq!(
            data,
            b"{\"BitStream\":[0],\"FirstUnchecked\":320,\"LastChecked\":319}"
        );

        let mut loaded = KnownRounds::new(320);
        loaded.unmarshal(&data).unwrap();
        assert!(loaded.checked(319));
        assert!(!loaded.checked(320));
    }
}
