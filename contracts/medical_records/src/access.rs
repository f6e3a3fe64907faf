use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

const ACCESS: Symbol = symbol_short!("ACCESS");
const DOCTORS: Symbol = symbol_short!("DOCTORS");

const DAY_IN_LEDGERS: u32 = 17280;
const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

fn grant_key(patient: &Address, doctor: &Address) -> (Symbol, Address, Address) {
    (ACCESS, patient.clone(), doctor.clone())
}

fn index_key(patient: &Address) -> (Symbol, Address) {
    (DOCTORS, patient.clone())
}

fn extend_ttl_grant_key(env: &Env, key: &(Symbol, Address, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_index_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Current standing of `doctor` with `patient`. A pair that was never
/// granted reads the same as a revoked one.
pub fn has_access(env: &Env, patient: &Address, doctor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&grant_key(patient, doctor))
        .unwrap_or(false)
}

/// The single read/append predicate. Both `add_record` and `get_records`
/// go through here.
pub fn is_authorized(env: &Env, caller: &Address, patient: &Address) -> bool {
    caller == patient || has_access(env, patient, caller)
}

/// Sets the grant and records the doctor in the patient's index on first grant.
pub fn grant(env: &Env, patient: &Address, doctor: &Address) {
    let key = grant_key(patient, doctor);
    env.storage().persistent().set(&key, &true);
    extend_ttl_grant_key(env, &key);

    let index_key = index_key(patient);
    let mut doctors = authorized_doctors(env, patient);
    if !doctors.contains(doctor) {
        doctors.push_back(doctor.clone());
        env.storage().persistent().set(&index_key, &doctors);
    }
    extend_ttl_index_key(env, &index_key);
}

/// Clears the grant. The index entry survives unless `prune_index` is set.
pub fn revoke(env: &Env, patient: &Address, doctor: &Address, prune_index: bool) {
    let key = grant_key(patient, doctor);
    env.storage().persistent().set(&key, &false);
    extend_ttl_grant_key(env, &key);

    if !prune_index {
        return;
    }

    let index_key = index_key(patient);
    let doctors = authorized_doctors(env, patient);
    if let Some(pos) = doctors.first_index_of(doctor) {
        let mut doctors = doctors;
        doctors.remove(pos);
        env.storage().persistent().set(&index_key, &doctors);
        extend_ttl_index_key(env, &index_key);
    }
}

/// Every doctor ever granted access by `patient`, in first-grant order.
pub fn authorized_doctors(env: &Env, patient: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&index_key(patient))
        .unwrap_or(Vec::new(env))
}
