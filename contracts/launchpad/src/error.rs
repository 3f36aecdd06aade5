use casper_types::ApiError;

#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LaunchpadError {
    AlreadyInitialized = 1,
    InvalidName = 2,
    InvalidSymbol = 3,
    DuplicateToken = 4,
    InsufficientFee = 5,
    SaleNotFound = 6,
    ZeroAmount = 7,
    SaleGraduated = 8,
    NotGraduated = 9,
    AlreadyClaimed = 10,
    NotCreator = 11,
    InsufficientBalance = 12,
    ExceedsSaleCapacity = 13,
    InsufficientReserve = 14,
    InvalidCurve = 15,
    TreasuryNotSet = 16,
    RouterNotSet = 17,
    LockedReentrancy = 18,
    InvalidContractTarget = 19,
    FailedToCreateDictionary = 20,
}

impl From<LaunchpadError> for ApiError {
    fn from(error: LaunchpadError) -> Self {
        ApiError::User(error as u16)
    }
}
