use casper_types::ApiError;

/// Errors for the Smart Vault eligibility credential
#[repr(u16)]
pub enum SmartVaultError {
    AlreadyMinted = 1,
    AlreadyInitialized = 2,
    FailedToCreateDictionary = 3,
}

impl From<SmartVaultError> for ApiError {
    fn from(error: SmartVaultError) -> Self {
        ApiError::User(error as u16)
    }
}
