//! Property tests for membership liveness and threshold updates

use proptest::prelude::*;
use quorate_common::crypto::Secp256k1Recovery;
use quorate_common::{GovernanceError, Identity};
use quorate_governance::{required_signers, GovernanceFacet, StateStore};

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    // Small identity space so adds and removes collide often
    prop_oneof![
        (0u8..8).prop_map(Op::Add),
        (0u8..8).prop_map(Op::Remove),
    ]
}

fn id(byte: u8) -> Identity {
    Identity::new([byte; 20])
}

fn setup(
    initial: &[u8],
    percentage: u64,
    precision: u64,
) -> (StateStore, GovernanceFacet<Secp256k1Recovery>) {
    let members: Vec<Identity> = initial.iter().copied().map(id).collect();
    let mut store = StateStore::new();
    let facet = GovernanceFacet::new(Secp256k1Recovery);
    facet.initialize(&mut store, &members, percentage, precision).unwrap();
    (store, facet)
}

proptest! {
    #[test]
    fn membership_never_empties(ops in prop::collection::vec(op(), 0..64)) {
        let (mut store, facet) = setup(&[0, 1], 50, 100);

        for op in ops {
            let before = facet.members(&store).unwrap();
            let result = match op {
                Op::Add(b) => facet.add_member(&mut store, id(b)),
                Op::Remove(b) => facet.remove_member(&mut store, id(b)),
            };

            match (&op, &result) {
                (Op::Remove(_), Err(GovernanceError::LastMember)) => {
                    prop_assert_eq!(before.len(), 1);
                }
                (Op::Remove(b), Err(GovernanceError::NotMember(_))) => {
                    prop_assert!(!before.contains(&id(*b)));
                }
                (Op::Add(b), Err(GovernanceError::AlreadyMember(_))) => {
                    prop_assert!(before.contains(&id(*b)));
                }
                (_, Ok(())) => {}
                (_, Err(other)) => prop_assert!(false, "unexpected error {:?}", other),
            }

            if result.is_err() {
                prop_assert_eq!(facet.members(&store).unwrap(), before);
            }
            prop_assert!(facet.member_count(&store).unwrap() >= 1);
        }
    }

    #[test]
    fn update_percentage_succeeds_iff_below_precision(
        precision in 1u64..10_000,
        updates in prop::collection::vec(0u64..12_000, 1..16),
    ) {
        let (mut store, facet) = setup(&[1, 2, 3], 0, precision);

        for p in updates {
            let previous = facet.percentage(&store).unwrap();
            match facet.update_percentage(&mut store, p) {
                Ok(()) => {
                    prop_assert!(p < precision);
                    prop_assert_eq!(facet.percentage(&store).unwrap(), p);
                }
                Err(GovernanceError::InvalidThreshold { .. }) => {
                    prop_assert!(p >= precision);
                    prop_assert_eq!(facet.percentage(&store).unwrap(), previous);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
            prop_assert_eq!(facet.precision(&store).unwrap(), precision);
        }
    }

    #[test]
    fn required_count_is_reachable(
        members in 1usize..500,
        precision in 1u64..100_000,
        raw in any::<u64>()
    ) {
        let percentage = raw % precision;
        let required = required_signers(members, percentage, precision);
        prop_assert!(required >= 1);
        prop_assert!(required <= members);
        // One fewer signer never reaches quorum
        prop_assert!(
            ((required - 1) as u128) * precision as u128 <= members as u128 * percentage as u128
        );
    }
}
