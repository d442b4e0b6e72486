//! Governance state cannot be reset or rewritten from outside the crate

use quorate_common::crypto::Secp256k1Recovery;
use quorate_common::{GovernanceError, Identity, StorageError};
use quorate_governance::{
    GovernanceConfig, GovernanceFacet, NamespaceKey, SharedGovernance, StateStore,
};

const OWNER: Identity = Identity::new([0xee; 20]);
const INTRUDER: Identity = Identity::new([0x66; 20]);

fn id(byte: u8) -> Identity {
    Identity::new([byte; 20])
}

#[derive(Default)]
struct Blank;

#[test]
fn test_reinitialize_after_reset_attempt_fails() {
    let config = GovernanceConfig {
        members: vec![id(1), id(2)],
        owner: Some(OWNER),
        ..Default::default()
    };
    let shared = SharedGovernance::from_config(&config).unwrap();
    let governance_key = NamespaceKey::from_tag("quorate.governance.storage");

    // Overwriting the governance region through the shared handle is refused
    let reset = shared.write(|store| store.resolve::<Blank>(&governance_key).map(|_| ()));
    assert!(matches!(reset, Err(StorageError::ReservedNamespace { .. })));

    assert_eq!(
        shared.initialize(&[INTRUDER], 0, 100),
        Err(GovernanceError::AlreadyInitialized)
    );
    assert_eq!(shared.members().unwrap(), vec![id(1), id(2)]);
    assert_eq!(shared.percentage().unwrap(), 50);
}

#[test]
fn test_ownership_region_is_held_back() {
    let config = GovernanceConfig {
        members: vec![id(1)],
        owner: Some(OWNER),
        ..Default::default()
    };
    let shared = SharedGovernance::from_config(&config).unwrap();
    let ownership_key = NamespaceKey::from_tag("quorate.ownership.storage");

    let claim = shared.write(|store| store.resolve::<Blank>(&ownership_key).map(|_| ()));
    assert!(matches!(claim, Err(StorageError::ReservedNamespace { .. })));
    assert_eq!(shared.initialize_owner(INTRUDER), Err(GovernanceError::AlreadyInitialized));
    assert_eq!(shared.add_member(&INTRUDER, INTRUDER), Err(GovernanceError::NotOwner));
    assert_eq!(shared.owner().unwrap(), OWNER);
}

#[test]
fn test_squatted_namespace_blocks_initialize() {
    let facet = GovernanceFacet::new(Secp256k1Recovery);
    let mut store = StateStore::new();
    store.resolve::<Blank>(&facet.namespace()).unwrap();

    assert!(matches!(
        facet.initialize(&mut store, &[id(1)], 50, 100),
        Err(GovernanceError::Storage(StorageError::TypeMismatch { .. }))
    ));
    assert!(facet.is_initialized(&store).is_err());
}

#[test]
fn test_state_view_is_read_only_snapshot() {
    let facet = GovernanceFacet::new(Secp256k1Recovery);
    let mut store = StateStore::new();
    facet.initialize(&mut store, &[id(1), id(2), id(3)], 50, 100).unwrap();

    let state = facet.state(&store).unwrap();
    assert!(state.is_initialized());
    assert_eq!(state.member_count(), 3);
    assert_eq!(state.required_signer_count(), 2);

    assert_eq!(
        facet.initialize(&mut store, &[INTRUDER], 0, 100),
        Err(GovernanceError::AlreadyInitialized)
    );
    assert!(!facet.is_member(&store, &INTRUDER).unwrap());
}
