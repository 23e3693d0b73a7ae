use mixnet_primitives::KnownRounds;
use quickcheck::quickcheck;

quickcheck! {
    fn every_force_checked_round_reads_checked(rids: Vec<u16>) -> bool {
        let mut tracker = KnownRounds::new(128);
        for &rid in &rids {
            tracker.force_check(rid as u64);
        }
        rids.iter().all(|&rid| tracker.checked(rid as u64))
    }

    fn forward_never_unchecks_the_prefix(a: u16, b: u16) -> bool {
        let mut tracker = KnownRounds::new(128);
        tracker.forward(a as u64);
        tracker.forward(b as u64);
        let cursor = (a as u64).max(b as u64);
        (0..cursor).all(|rid| tracker.checked(rid))
    }

    fn snapshot_survives_the_wire(rids: Vec<u16>) -> bool {
        let mut tracker = KnownRounds::new(128);
        for &rid in &rids {
            tracker.force_check(rid as u64);
        }

        let data = tracker.marshal().unwrap();
        let mut wire = KnownRounds::default();
        wire.unmarshal(&data).unwrap();

        (0..70000u64).step_by(61).all(|rid| wire.checked(rid) == tracker.checked(rid))
    }
}
