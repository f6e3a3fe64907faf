use soroban_sdk::{Address, Bytes, BytesN, Env, String};

use crate::ContractError;

pub const CONTENT_HASH_LEN: u32 = 32;

/// The registry itself can never be the subject of a record.
pub fn validate_patient(env: &Env, patient: &Address) -> Result<(), ContractError> {
    if *patient == env.current_contract_address() {
        return Err(ContractError::InvalidAddress);
    }
    Ok(())
}

pub fn validate_content_id(content_id: &String, max_len: u32) -> Result<(), ContractError> {
    if content_id.is_empty() {
        return Err(ContractError::EmptyContentId);
    }
    if content_id.len() > max_len {
        return Err(ContractError::ContentIdTooLong);
    }
    Ok(())
}

/// Converts a raw digest into its fixed-width form. The all-zero digest is
/// accepted so placeholder and migrated entries can be registered.
pub fn validate_content_hash(content_hash: &Bytes) -> Result<BytesN<32>, ContractError> {
    if content_hash.len() != CONTENT_HASH_LEN {
        return Err(ContractError::InvalidHashLength);
    }
    BytesN::<32>::try_from(content_hash).map_err(|_| ContractError::InvalidHashLength)
}
