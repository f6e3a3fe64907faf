use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::MedicalRecord;

/// `(PAT_REC, patient) -> u32`: number of records the patient owns.
const PAT_REC: Symbol = symbol_short!("PAT_REC");
/// `(REC, patient, index) -> MedicalRecord`: one entry per record.
const REC: Symbol = symbol_short!("REC");

const DAY_IN_LEDGERS: u32 = 17280;
const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

fn count_key(patient: &Address) -> (Symbol, Address) {
    (PAT_REC, patient.clone())
}

fn record_key(patient: &Address, index: u32) -> (Symbol, Address, u32) {
    (REC, patient.clone(), index)
}

fn extend_ttl_count_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_record_key(env: &Env, key: &(Symbol, Address, u32)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn count(env: &Env, patient: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&count_key(patient))
        .unwrap_or(0)
}

pub fn get(env: &Env, patient: &Address, index: u32) -> Option<MedicalRecord> {
    env.storage().persistent().get(&record_key(patient, index))
}

/// All records of `patient` in insertion order.
pub fn load(env: &Env, patient: &Address) -> Vec<MedicalRecord> {
    let mut records = Vec::new(env);
    for index in 0..count(env, patient) {
        if let Some(record) = get(env, patient, index) {
            records.push_back(record);
        }
    }
    records
}

/// Stores `record` under the next free index of its patient and returns that index.
/// Earlier entries are never rewritten.
pub fn append(env: &Env, record: &MedicalRecord) -> u32 {
    let index = count(env, &record.patient);

    let key = record_key(&record.patient, index);
    env.storage().persistent().set(&key, record);
    extend_ttl_record_key(env, &key);

    let count_key = count_key(&record.patient);
    env.storage()
        .persistent()
        .set(&count_key, &index.saturating_add(1));
    extend_ttl_count_key(env, &count_key);

    index
}
