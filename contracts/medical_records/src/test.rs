#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::*;
use soroban_sdk::testutils::{storage::Instance as _, Address as _, Ledger};
use soroban_sdk::{Bytes, Env};

fn setup() -> (Env, MedicalRecordsContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    (env, client)
}

fn hash(env: &Env, fill: u8) -> Bytes {
    Bytes::from_array(env, &[fill; 32])
}

#[test]
fn test_patient_adds_own_record() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    env.ledger().set_timestamp(1_700_000_000);

    let cid = String::from_str(&env, "QmTest123");
    let index = client.add_record(&patient, &patient, &cid, &hash(&env, 1));
    assert_eq!(index, 0);

    let records = client.get_my_records(&patient);
    assert_eq!(records.len(), 1);
    let record = records.get(0).unwrap();
    assert_eq!(record.content_id, cid);
    assert_eq!(record.content_hash, BytesN::from_array(&env, &[1u8; 32]));
    assert_eq!(record.patient, patient);
    assert_eq!(record.uploaded_by, patient);
    assert_eq!(record.created_at, 1_700_000_000);
    assert!(record.exists);
}

#[test]
fn test_record_added_is_journaled() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    let doctor = Address::generate(&env);
    env.ledger().set_timestamp(42);

    client.grant_access(&patient, &doctor);
    let cid = String::from_str(&env, "QmTest123");
    client.add_record(&doctor, &patient, &cid, &hash(&env, 9));

    assert_eq!(client.get_event_count(), 2);
    let entries = client.get_events(&1, &10);
    assert_eq!(entries.len(), 2);

    let granted = entries.get(0).unwrap();
    assert_eq!(granted.seq, 1);
    assert_eq!(
        granted.event,
        RegistryEvent::AccessGranted(AccessGrantedEvent {
            patient: patient.clone(),
            doctor: doctor.clone(),
            timestamp: 42,
        })
    );

    let added = entries.get(1).unwrap();
    assert_eq!(added.seq, 2);
    assert_eq!(
        added.event,
        RegistryEvent::RecordAdded(RecordAddedEvent {
            patient,
            uploaded_by: doctor,
            content_id: cid,
            content_hash: BytesN::from_array(&env, &[9u8; 32]),
            created_at: 42,
        })
    );
}

#[test]
fn test_rejected_call_leaves_no_trace() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    let stranger = Address::generate(&env);

    let cid = String::from_str(&env, "QmTest123");
    let result = client.try_add_record(&stranger, &patient, &cid, &hash(&env, 1));
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));

    assert_eq!(client.get_event_count(), 0);
    assert_eq!(client.get_record_count(&patient), 0);
}

#[test]
fn test_contract_cannot_be_patient() {
    let (env, client) = setup();
    let caller = Address::generate(&env);

    let cid = String::from_str(&env, "QmTest123");
    let result = client.try_add_record(&caller, &client.address, &cid, &hash(&env, 1));
    assert_eq!(result, Err(Ok(ContractError::InvalidAddress)));
}

#[test]
fn test_malformed_input_checked_before_authorization() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    let stranger = Address::generate(&env);

    let empty = String::from_str(&env, "");
    let result = client.try_add_record(&stranger, &patient, &empty, &hash(&env, 1));
    assert_eq!(result, Err(Ok(ContractError::EmptyContentId)));

    let cid = String::from_str(&env, "QmTest123");
    let short = Bytes::from_array(&env, &[1u8; 20]);
    let result = client.try_add_record(&patient, &patient, &cid, &short);
    assert_eq!(result, Err(Ok(ContractError::InvalidHashLength)));
}

#[test]
fn test_journal_paging() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    let doctor = Address::generate(&env);

    for _ in 0..60 {
        client.grant_access(&patient, &doctor);
    }

    assert_eq!(client.get_event_count(), 60);
    assert_eq!(client.get_events(&1, &100).len(), MAX_EVENT_PAGE);
    assert_eq!(client.get_events(&51, &100).len(), 10);
    assert_eq!(client.get_events(&0, &3).get(0).unwrap().seq, 1);
    assert_eq!(client.get_events(&61, &10).len(), 0);
}

#[test]
fn test_mutations_extend_instance_ttl() {
    let (env, client) = setup();
    let patient = Address::generate(&env);
    let doctor = Address::generate(&env);

    // Uninitialized registry: only journal traffic touches instance storage.
    client.grant_access(&patient, &doctor);
    let ttl = env.as_contract(&client.address, || env.storage().instance().get_ttl());
    assert_eq!(ttl, config::INSTANCE_TTL_EXTEND_TO);

    let cid = String::from_str(&env, "QmTest123");
    client.add_record(&patient, &patient, &cid, &hash(&env, 1));
    let ttl = env.as_contract(&client.address, || env.storage().instance().get_ttl());
    assert!(ttl > config::INSTANCE_TTL_THRESHOLD);
}

#[test]
fn test_error_metadata() {
    assert_eq!(
        ContractError::Unauthorized.category(),
        ErrorCategory::Authorization
    );
    assert_eq!(
        ContractError::InvalidHashLength.category(),
        ErrorCategory::MalformedInput
    );
    assert_eq!(
        ContractError::AlreadyInitialized.category(),
        ErrorCategory::StateConflict
    );
    assert_eq!(ContractError::Unauthorized.severity(), ErrorSeverity::Medium);
    assert!(!ContractError::Unauthorized.retryable());
    assert_eq!(
        ContractError::Unauthorized.message(),
        "Not authorized to access these records"
    );
}

#[test]
fn test_version() {
    assert_eq!(MedicalRecordsContract::version(), 1);
}
