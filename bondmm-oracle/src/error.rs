use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Rate is zero or negative
    InvalidRate = 1,

    /// Staleness threshold is zero
    InvalidStaleness = 2,
}
