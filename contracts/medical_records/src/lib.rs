#![no_std]

pub mod access;
pub mod config;
pub mod errors;
pub mod events;
pub mod records;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, Address, Bytes, BytesN, Env, String, Vec,
};

pub use config::RegistryConfig;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use events::{
    AccessGrantedEvent, AccessRevokedEvent, JournalEntry, RecordAddedEvent, RegistryEvent,
    MAX_EVENT_PAGE,
};

use errors::reject;

/// A pointer to an externally stored, encrypted medical document.
///
/// Records are append-only: once created they are never mutated or deleted,
/// so `exists` is always `true`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    /// Opaque handle returned by the blob store (an IPFS CID in practice).
    pub content_id: String,
    /// Digest used by external verifiers to detect tampering. Never checked on-chain.
    pub content_hash: BytesN<32>,
    pub patient: Address,
    pub uploaded_by: Address,
    pub created_at: u64,
    pub exists: bool,
}

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    /// Record an admin and a configuration. Optional: an uninitialized
    /// registry runs with `RegistryConfig::default()`.
    pub fn initialize(
        env: Env,
        admin: Address,
        config: RegistryConfig,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        config::initialize(&env, &admin, &config)?;
        events::publish_initialized(&env, admin);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        config::get_admin(&env)
    }

    pub fn get_config(env: Env) -> RegistryConfig {
        config::get_config(&env)
    }

    /// Replace the registry configuration. Admin only.
    pub fn update_config(
        env: Env,
        caller: Address,
        config: RegistryConfig,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let admin = config::get_admin(&env)?;
        if caller != admin {
            return Err(reject(&env, ContractError::Unauthorized, &caller));
        }

        config::set_config(&env, &config)?;
        events::publish_config_updated(&env, caller, config);
        Ok(())
    }

    /// Append a record to `patient`'s list.
    ///
    /// Allowed for the patient and for any doctor the patient currently
    /// grants access. Returns the record's position in the patient's list.
    pub fn add_record(
        env: Env,
        caller: Address,
        patient: Address,
        content_id: String,
        content_hash: Bytes,
    ) -> Result<u32, ContractError> {
        caller.require_auth();

        let cfg = config::get_config(&env);
        validation::validate_patient(&env, &patient)?;
        validation::validate_content_id(&content_id, cfg.max_content_id_len)?;
        let content_hash = validation::validate_content_hash(&content_hash)?;

        if !access::is_authorized(&env, &caller, &patient) {
            return Err(reject(&env, ContractError::Unauthorized, &caller));
        }

        let record = MedicalRecord {
            content_id,
            content_hash,
            patient,
            uploaded_by: caller,
            created_at: env.ledger().timestamp(),
            exists: true,
        };
        let index = records::append(&env, &record);

        let seq = events::publish_record_added(
            &env,
            record.patient,
            record.uploaded_by,
            record.content_id,
            record.content_hash,
            record.created_at,
        );
        log!(&env, "record added: index={} seq={}", index, seq);

        Ok(index)
    }

    /// Grant `doctor` read and append access to the patient's records.
    /// Re-granting is a no-op apart from the emitted event.
    pub fn grant_access(env: Env, patient: Address, doctor: Address) -> Result<(), ContractError> {
        patient.require_auth();

        let cfg = config::get_config(&env);
        if cfg.reject_self_grant && patient == doctor {
            return Err(reject(&env, ContractError::SelfGrantRejected, &patient));
        }

        access::grant(&env, &patient, &doctor);
        events::publish_access_granted(&env, patient, doctor);
        Ok(())
    }

    /// Revoke `doctor`'s access. Revoking a doctor that was never granted is allowed.
    pub fn revoke_access(env: Env, patient: Address, doctor: Address) -> Result<(), ContractError> {
        patient.require_auth();

        let cfg = config::get_config(&env);
        access::revoke(&env, &patient, &doctor, cfg.prune_index_on_revoke);
        events::publish_access_revoked(&env, patient, doctor);
        Ok(())
    }

    /// Full record list of `patient`, oldest first. Fails with `Unauthorized`
    /// rather than returning a partial or empty list.
    pub fn get_records(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<MedicalRecord>, ContractError> {
        caller.require_auth();

        if !access::is_authorized(&env, &caller, &patient) {
            return Err(reject(&env, ContractError::Unauthorized, &caller));
        }

        Ok(records::load(&env, &patient))
    }

    pub fn get_my_records(env: Env, caller: Address) -> Vec<MedicalRecord> {
        caller.require_auth();
        records::load(&env, &caller)
    }

    pub fn has_access(env: Env, patient: Address, doctor: Address) -> bool {
        access::has_access(&env, &patient, &doctor)
    }

    /// Every doctor ever granted access by `patient`, including revoked ones.
    /// Use `has_access` for current standing.
    pub fn get_authorized_doctors(env: Env, patient: Address) -> Vec<Address> {
        access::authorized_doctors(&env, &patient)
    }

    pub fn get_record_count(env: Env, patient: Address) -> u32 {
        records::count(&env, &patient)
    }

    /// Sequence number of the most recent journal entry (0 when empty).
    pub fn get_event_count(env: Env) -> u64 {
        events::event_count(&env)
    }

    /// Page through the event journal starting at `from_seq`.
    /// At most `MAX_EVENT_PAGE` entries are returned per call.
    pub fn get_events(env: Env, from_seq: u64, limit: u32) -> Vec<JournalEntry> {
        events::journal_page(&env, from_seq, limit)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}

#[cfg(test)]
mod test;
