use casper_types::ApiError;

#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RewardVaultError {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    ZeroAmount = 3,
    VaultExists = 4,
    VaultNotFound = 5,
    NotVaultOwner = 6,
    InsufficientAccrued = 7,
    BelowAutoClaimThreshold = 8,
    TreasuryNotSet = 9,
    OracleNotSet = 10,
    LockedReentrancy = 11,
    InvalidContractTarget = 12,
    FailedToCreateDictionary = 13,
}

impl From<RewardVaultError> for ApiError {
    fn from(error: RewardVaultError) -> Self {
        ApiError::User(error as u16)
    }
}
