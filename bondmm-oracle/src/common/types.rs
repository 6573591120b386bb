use soroban_sdk::{Symbol, symbol_short};

pub const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
pub const STORAGE: Symbol = symbol_short!("STORAGE");

// TTL constants (~1 day threshold, ~30 days bump at ~5 sec/ledger), matching the
// rest of this codebase's instance-storage bump discipline.
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 518_400;

/// Default max staleness: 1 hour.
pub const DEFAULT_MAX_STALENESS: u64 = 3_600;
