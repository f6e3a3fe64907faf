use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

/// Upper bound accepted for `max_content_id_len`. Content ids are IPFS CIDs
/// in practice, which stay well below this.
pub const CONTENT_ID_HARD_LIMIT: u32 = 512;

/// Content ids are only bounded by the hard limit unless an admin opts into a
/// tighter cap.
pub const DEFAULT_MAX_CONTENT_ID_LEN: u32 = CONTENT_ID_HARD_LIMIT;

const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_TTL_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

/// Registry behaviour switches.
///
/// Both flags default to the permissive behaviour of the minimal registry:
/// self-grants are accepted and revoked doctors stay in the historical index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    /// Reject `grant_access(patient, patient)` with `SelfGrantRejected`.
    pub reject_self_grant: bool,
    /// Remove a doctor from the authorized-doctor index when access is revoked,
    /// turning the index into a live list instead of an "ever authorized" list.
    pub prune_index_on_revoke: bool,
    /// Maximum accepted content id length in bytes.
    pub max_content_id_len: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reject_self_grant: false,
            prune_index_on_revoke: false,
            max_content_id_len: DEFAULT_MAX_CONTENT_ID_LEN,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.max_content_id_len == 0 || self.max_content_id_len > CONTENT_ID_HARD_LIMIT {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }
}

pub(crate) fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn initialize(
    env: &Env,
    admin: &Address,
    config: &RegistryConfig,
) -> Result<(), ContractError> {
    if is_initialized(env) {
        return Err(ContractError::AlreadyInitialized);
    }
    config.validate()?;

    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&INITIALIZED, &true);
    extend_ttl_instance(env);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

/// Returns the active configuration, or the defaults for an uninitialized registry.
pub fn get_config(env: &Env) -> RegistryConfig {
    env.storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or_default()
}

pub fn set_config(env: &Env, config: &RegistryConfig) -> Result<(), ContractError> {
    config.validate()?;
    env.storage().instance().set(&CONFIG, config);
    extend_ttl_instance(env);
    Ok(())
}
