use soroban_sdk::{Address, Map, Symbol, contracttype, symbol_short};

use crate::fixed_point::{Fp, SCALE};

// Storage keys
pub const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
pub const POOL_KEY: Symbol = symbol_short!("POOL");

// TTL constants (~1 day threshold, ~30 days bump at ~5 sec/ledger), matching
// the sibling lending/perps contracts' instance-storage bump discipline.
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 17_280;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 518_400;

pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Curvature parameter of the invariant; fixed, not configurable.
pub const KAPPA: Fp = 20_000_000_000_000_000; // 0.02 * SCALE

/// Shortest interval a pricing call will evaluate a rate over.
pub const MIN_TIME: u64 = 3_600;

pub const DEFAULT_MIN_MATURITY: u64 = 30 * 86_400;
pub const DEFAULT_MAX_MATURITY: u64 = 365 * 86_400;
pub const ABS_MIN_MATURITY_FLOOR: u64 = 86_400;
pub const ABS_MAX_MATURITY_CEIL: u64 = 730 * 86_400;

pub const DEFAULT_COLLATERAL_RATIO: Fp = 1_500_000_000_000_000_000; // 1.50
pub const ABS_COLLATERAL_RATIO_MIN: Fp = SCALE; // 1.00
pub const ABS_COLLATERAL_RATIO_MAX: Fp = 3 * SCALE; // 3.00

pub const DEFAULT_SOLVENCY_THRESHOLD: Fp = 990_000_000_000_000_000; // 0.99
pub const ABS_SOLVENCY_THRESHOLD_MIN: Fp = 900_000_000_000_000_000; // 0.90
pub const ABS_SOLVENCY_THRESHOLD_MAX: Fp = SCALE; // 1.00

pub const DEFAULT_GRACE_PERIOD: u64 = 24 * 3_600;
pub const ABS_GRACE_PERIOD_MIN: u64 = 3_600;
pub const ABS_GRACE_PERIOD_MAX: u64 = 7 * 86_400;

pub const DEFAULT_LIQUIDATION_PENALTY: Fp = 50_000_000_000_000_000; // 0.05
pub const DEFAULT_FALLBACK_RATE: Fp = 50_000_000_000_000_000; // 0.05
pub const ABS_RATE_PARAM_MIN: Fp = 0;
pub const ABS_RATE_PARAM_MAX: Fp = 200_000_000_000_000_000; // 0.20

/// Which side of a position a record represents. `Lend` holders are owed
/// `face_value` by the pool; `Borrow` holders owe `face_value` to the pool
/// and posted `collateral` against it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PositionKind {
    Lend,
    Borrow,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Position {
    pub owner: Address,
    pub face_value: Fp,
    pub maturity: u64,
    pub collateral: Fp,
    pub initial_pv: Fp,
    pub created_at: u64,
    pub kind: PositionKind,
    pub is_active: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolStorage {
    pub cash: Fp,
    pub pv_bonds: Fp,
    pub net_liabilities: Fp,
    pub initial_cash: Fp,
    pub t_last: u64,
    pub next_position_id: u64,
    pub initialized: bool,
    pub paused: bool,
    pub reentrancy_guard: bool,
    pub oracle: Address,
    pub ledger_token: Address,
    pub min_maturity: u64,
    pub max_maturity: u64,
    pub collateral_ratio: Fp,
    pub solvency_threshold: Fp,
    pub grace_period: u64,
    pub liquidation_penalty: Fp,
    pub fallback_rate: Fp,
    /// Last ledger sequence at which each caller performed a mutation;
    /// the flash-loan defense of §5.
    pub last_mutation_ledger: Map<Address, u32>,
}
