use soroban_sdk::{contracttype, log, Address, Env};

/// Error categories for classifying registry failures
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed input: empty content id, wrong-length hash, bad address or config
    MalformedInput = 1,
    /// Authorization errors: the caller lacks the required relation
    Authorization = 2,
    /// State conflict errors: initialization ordering
    StateConflict = 3,
}

/// Error severity levels indicating the impact of an error
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller mistake, fix the input and resubmit
    Low = 1,
    /// Medium severity: permission problem, requires obtaining a grant
    Medium = 2,
    /// High severity: administrative misuse
    High = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    EmptyContentId = 4,
    ContentIdTooLong = 5,
    InvalidHashLength = 6,
    InvalidAddress = 7,
    SelfGrantRejected = 8,
    InvalidConfig = 9,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::EmptyContentId
            | ContractError::ContentIdTooLong
            | ContractError::InvalidHashLength
            | ContractError::InvalidAddress
            | ContractError::InvalidConfig => ErrorCategory::MalformedInput,
            ContractError::Unauthorized | ContractError::SelfGrantRejected => {
                ErrorCategory::Authorization
            }
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::StateConflict
            }
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::MalformedInput => ErrorSeverity::Low,
            ErrorCategory::Authorization => ErrorSeverity::Medium,
            ErrorCategory::StateConflict => ErrorSeverity::High,
        }
    }

    /// Registry rejections are never transient. A caller that wants a
    /// different outcome must change its input or obtain a grant first.
    pub fn retryable(&self) -> bool {
        false
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Registry has not been initialized",
            ContractError::AlreadyInitialized => "Registry is already initialized",
            ContractError::Unauthorized => "Not authorized to access these records",
            ContractError::EmptyContentId => "Content id must not be empty",
            ContractError::ContentIdTooLong => "Content id exceeds the configured maximum length",
            ContractError::InvalidHashLength => "Content hash must be exactly 32 bytes",
            ContractError::InvalidAddress => "Address is not a valid patient identity",
            ContractError::SelfGrantRejected => "Patients cannot grant access to themselves",
            ContractError::InvalidConfig => "Invalid registry configuration",
        }
    }
}

/// Emits a diagnostic for a rejected invocation and hands the error back so
/// call sites can write `return Err(reject(&env, err, &caller))`.
///
/// Storage writes would be rolled back with the failed invocation, so
/// rejections are only visible through diagnostics and the returned error.
pub fn reject(env: &Env, error: ContractError, caller: &Address) -> ContractError {
    log!(
        env,
        "registry rejected call: code={} caller={}",
        error as u32,
        caller.clone()
    );
    error
}
