use soroban_sdk::{Address, BytesN, Env, Map, symbol_short, token::TokenClient};

use crate::common::error::Error;
use crate::common::events::Events;
use crate::common::storage::Storage;
use crate::common::types::{
    ABS_COLLATERAL_RATIO_MAX, ABS_COLLATERAL_RATIO_MIN, ABS_GRACE_PERIOD_MAX,
    ABS_GRACE_PERIOD_MIN, ABS_MAX_MATURITY_CEIL, ABS_MIN_MATURITY_FLOOR, ABS_RATE_PARAM_MAX,
    ABS_RATE_PARAM_MIN, ABS_SOLVENCY_THRESHOLD_MAX, ABS_SOLVENCY_THRESHOLD_MIN, ADMIN_KEY,
    DEFAULT_COLLATERAL_RATIO, DEFAULT_FALLBACK_RATE, DEFAULT_GRACE_PERIOD,
    DEFAULT_LIQUIDATION_PENALTY, DEFAULT_MAX_MATURITY, DEFAULT_MIN_MATURITY,
    DEFAULT_SOLVENCY_THRESHOLD, PoolStorage,
};
use crate::fixed_point::Fp;

/// Administrative surface: construction, pause, and the bounded parameter
/// setters of the pricing/solvency configuration (§6).
pub struct Admin;

impl Admin {
    /// One-time construction: seeds the pool with `initial_cash` pulled from
    /// `admin` and anchors every tunable parameter at its default.
    pub fn initialize(
        env: &Env,
        admin: &Address,
        oracle: &Address,
        ledger_token: &Address,
        initial_cash: Fp,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }
        if initial_cash <= 0 {
            return Err(Error::InvalidParameter);
        }
        admin.require_auth();
        Self::set_admin(env, admin);

        let now = env.ledger().timestamp();
        let pool = PoolStorage {
            cash: initial_cash,
            pv_bonds: initial_cash,
            net_liabilities: 0,
            initial_cash,
            t_last: now,
            next_position_id: 1,
            initialized: true,
            paused: false,
            reentrancy_guard: false,
            oracle: oracle.clone(),
            ledger_token: ledger_token.clone(),
            min_maturity: DEFAULT_MIN_MATURITY,
            max_maturity: DEFAULT_MAX_MATURITY,
            collateral_ratio: DEFAULT_COLLATERAL_RATIO,
            solvency_threshold: DEFAULT_SOLVENCY_THRESHOLD,
            grace_period: DEFAULT_GRACE_PERIOD,
            liquidation_penalty: DEFAULT_LIQUIDATION_PENALTY,
            fallback_rate: DEFAULT_FALLBACK_RATE,
            last_mutation_ledger: Map::new(env),
        };
        Storage::set(env, &pool);

        let token_client = TokenClient::new(env, ledger_token);
        token_client.transfer(admin, env.current_contract_address(), &initial_cash);

        Events::initialized(env, initial_cash, oracle, ledger_token);
        Ok(())
    }

    pub fn get_admin(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&ADMIN_KEY)
            .expect("admin must be set")
    }

    pub fn set_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&ADMIN_KEY, admin);
    }

    pub fn require_admin(env: &Env) {
        Self::get_admin(env).require_auth();
    }

    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    pub fn pause(env: &Env) -> Result<(), Error> {
        Self::require_admin(env);
        let mut pool = Storage::get(env);
        pool.paused = true;
        Storage::set(env, &pool);
        Events::paused(env);
        Ok(())
    }

    pub fn unpause(env: &Env) -> Result<(), Error> {
        Self::require_admin(env);
        let mut pool = Storage::get(env);
        pool.paused = false;
        Storage::set(env, &pool);
        Events::unpaused(env);
        Ok(())
    }

    pub fn set_oracle(env: &Env, oracle: Address) -> Result<(), Error> {
        Self::require_admin(env);
        let mut pool = Storage::get(env);
        pool.oracle = oracle.clone();
        Storage::set(env, &pool);
        Events::oracle_updated(env, &oracle);
        Ok(())
    }

    pub fn set_min_maturity(env: &Env, value: u64) -> Result<(), Error> {
        Self::require_admin(env);
        let mut pool = Storage::get(env);
        if value < ABS_MIN_MATURITY_FLOOR || value >= pool.max_maturity {
            return Err(Error::InvalidParameter);
        }
        pool.min_maturity = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("min_mat"), value as Fp);
        Ok(())
    }

    pub fn set_max_maturity(env: &Env, value: u64) -> Result<(), Error> {
        Self::require_admin(env);
        let mut pool = Storage::get(env);
        if value <= pool.min_maturity || value > ABS_MAX_MATURITY_CEIL {
            return Err(Error::InvalidParameter);
        }
        pool.max_maturity = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("max_mat"), value as Fp);
        Ok(())
    }

    pub fn set_collateral_ratio(env: &Env, value: Fp) -> Result<(), Error> {
        Self::require_admin(env);
        if !(ABS_COLLATERAL_RATIO_MIN..=ABS_COLLATERAL_RATIO_MAX).contains(&value) {
            return Err(Error::InvalidParameter);
        }
        let mut pool = Storage::get(env);
        pool.collateral_ratio = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("col_rat"), value);
        Ok(())
    }

    pub fn set_solvency_threshold(env: &Env, value: Fp) -> Result<(), Error> {
        Self::require_admin(env);
        if !(ABS_SOLVENCY_THRESHOLD_MIN..=ABS_SOLVENCY_THRESHOLD_MAX).contains(&value) {
            return Err(Error::InvalidParameter);
        }
        let mut pool = Storage::get(env);
        pool.solvency_threshold = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("solv_th"), value);
        Ok(())
    }

    pub fn set_grace_period(env: &Env, value: u64) -> Result<(), Error> {
        Self::require_admin(env);
        if !(ABS_GRACE_PERIOD_MIN..=ABS_GRACE_PERIOD_MAX).contains(&value) {
            return Err(Error::InvalidParameter);
        }
        let mut pool = Storage::get(env);
        pool.grace_period = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("grace"), value as Fp);
        Ok(())
    }

    pub fn set_liquidation_penalty(env: &Env, value: Fp) -> Result<(), Error> {
        Self::require_admin(env);
        if !(ABS_RATE_PARAM_MIN..=ABS_RATE_PARAM_MAX).contains(&value) {
            return Err(Error::InvalidParameter);
        }
        let mut pool = Storage::get(env);
        pool.liquidation_penalty = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("liq_pen"), value);
        Ok(())
    }

    pub fn set_fallback_rate(env: &Env, value: Fp) -> Result<(), Error> {
        Self::require_admin(env);
        if !(ABS_RATE_PARAM_MIN..=ABS_RATE_PARAM_MAX).contains(&value) {
            return Err(Error::InvalidParameter);
        }
        let mut pool = Storage::get(env);
        pool.fallback_rate = value;
        Storage::set(env, &pool);
        Events::param_updated(env, symbol_short!("fb_rate"), value);
        Ok(())
    }
}
