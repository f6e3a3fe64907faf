//! Registry events.
//!
//! Every successful mutation is published twice: as a Soroban contract event
//! for RPC subscribers, and as a sequence-numbered entry in the on-chain
//! journal so off-chain caches can replay the full history by paging through
//! `get_events`.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

use crate::config::{self, RegistryConfig};

const EVT: Symbol = symbol_short!("EVT");
const EVT_CNT: Symbol = symbol_short!("EVT_CNT");

/// Largest page `get_events` will return.
pub const MAX_EVENT_PAGE: u32 = 50;

const DAY_IN_LEDGERS: u32 = 17280;
const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

/// Event published when the registry is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when the admin replaces the registry configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub admin: Address,
    pub config: RegistryConfig,
    pub timestamp: u64,
}

/// Event published when a record is appended to a patient's list.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub patient: Address,
    pub uploaded_by: Address,
    pub content_id: String,
    pub content_hash: BytesN<32>,
    pub created_at: u64,
}

/// Event published when a patient grants a doctor access.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub patient: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a patient revokes a doctor's access.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Journal payloads, one variant per mutating operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryEvent {
    RecordAdded(RecordAddedEvent),
    AccessGranted(AccessGrantedEvent),
    AccessRevoked(AccessRevokedEvent),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JournalEntry {
    pub seq: u64,
    pub event: RegistryEvent,
}

fn extend_ttl_journal_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Number of journal entries written so far. Also the `seq` of the latest entry.
pub fn event_count(env: &Env) -> u64 {
    env.storage().instance().get(&EVT_CNT).unwrap_or(0)
}

fn append_journal(env: &Env, event: RegistryEvent) -> u64 {
    let seq = event_count(env).saturating_add(1);
    let key = (EVT, seq);
    env.storage()
        .persistent()
        .set(&key, &JournalEntry { seq, event });
    extend_ttl_journal_key(env, &key);
    env.storage().instance().set(&EVT_CNT, &seq);
    config::extend_ttl_instance(env);
    seq
}

/// Returns up to `limit` journal entries starting at `from_seq` (1-based).
pub fn journal_page(env: &Env, from_seq: u64, limit: u32) -> Vec<JournalEntry> {
    let mut page = Vec::new(env);
    let last = event_count(env);
    let limit = limit.min(MAX_EVENT_PAGE);
    let mut seq = from_seq.max(1);

    while seq <= last && page.len() < limit {
        if let Some(entry) = env.storage().persistent().get(&(EVT, seq)) {
            page.push_back(entry);
        }
        seq = seq.saturating_add(1);
    }
    page
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_config_updated(env: &Env, admin: Address, config: RegistryConfig) {
    let topics = (symbol_short!("CFG_UPD"), admin.clone());
    let data = ConfigUpdatedEvent {
        admin,
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes a record-added event and journals it. Returns the journal `seq`.
pub fn publish_record_added(
    env: &Env,
    patient: Address,
    uploaded_by: Address,
    content_id: String,
    content_hash: BytesN<32>,
    created_at: u64,
) -> u64 {
    let topics = (symbol_short!("REC_ADD"), patient.clone(), uploaded_by.clone());
    let data = RecordAddedEvent {
        patient,
        uploaded_by,
        content_id,
        content_hash,
        created_at,
    };
    env.events().publish(topics, data.clone());
    append_journal(env, RegistryEvent::RecordAdded(data))
}

/// Publishes an access-granted event and journals it. Returns the journal `seq`.
pub fn publish_access_granted(env: &Env, patient: Address, doctor: Address) -> u64 {
    let topics = (symbol_short!("ACC_GRT"), patient.clone(), doctor.clone());
    let data = AccessGrantedEvent {
        patient,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    append_journal(env, RegistryEvent::AccessGranted(data))
}

/// Publishes an access-revoked event and journals it. Returns the journal `seq`.
pub fn publish_access_revoked(env: &Env, patient: Address, doctor: Address) -> u64 {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), doctor.clone());
    let data = AccessRevokedEvent {
        patient,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    append_journal(env, RegistryEvent::AccessRevoked(data))
}
