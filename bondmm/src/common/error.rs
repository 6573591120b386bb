use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Precondition (1-19)
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Paused = 3,
    NotOwner = 4,
    WrongPositionKind = 5,
    NotActive = 6,
    NotMature = 7,
    GraceNotExpired = 8,
    InvalidMaturity = 9,
    InsufficientCollateral = 10,
    InsufficientLiquidity = 11,
    FlashLoanDetected = 12,
    ReentrancyDetected = 13,

    // External (20-29)
    OracleStale = 20,
    LedgerTransferFailed = 21,

    // Arithmetic (30-39)
    TimeTooSmall = 30,
    DivByZero = 31,
    Overflow = 32,
    InvalidTrade = 33,

    // Invariant (40-49)
    Insolvent = 40,

    // Administrative (50-59)
    InvalidParameter = 50,
}
