use soroban_sdk::{Address, BytesN, Env, contract, contractimpl};

use crate::admin::Admin;
use crate::common::storage::OracleStorage;
use crate::error::Error;

/// A minimal anchor-rate publisher: a single fixed-point rate (60.18, i.e.
/// `real_rate * 10^18`) with a last-update timestamp and a staleness policy.
/// Consumed by BondMM-A's oracle adapter through `get_rate()`/`is_stale()`.
#[contract]
pub struct AnchorOracle;

#[contractimpl]
impl AnchorOracle {
    pub fn __constructor(env: &Env, admin: Address, initial_rate: i128) -> Result<(), Error> {
        if initial_rate <= 0 {
            return Err(Error::InvalidRate);
        }
        Admin::set_admin(env, &admin);
        OracleStorage::set(env, &OracleStorage::new(env, initial_rate));
        Ok(())
    }

    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Admin::upgrade(env, new_wasm_hash);
    }

    /// Publish a new rate reading (admin only).
    pub fn set_rate(env: &Env, rate: i128) -> Result<(), Error> {
        Admin::require_admin(env);
        if rate <= 0 {
            return Err(Error::InvalidRate);
        }
        let mut state = OracleStorage::get(env);
        state.rate = rate;
        state.last_update = env.ledger().timestamp();
        OracleStorage::set(env, &state);
        Admin::extend_instance_ttl(env);
        Ok(())
    }

    /// Set how many seconds a reading may age before `is_stale()` returns true.
    pub fn set_max_staleness(env: &Env, max_seconds: u64) -> Result<(), Error> {
        Admin::require_admin(env);
        if max_seconds == 0 {
            return Err(Error::InvalidStaleness);
        }
        let mut state = OracleStorage::get(env);
        state.max_staleness = max_seconds;
        OracleStorage::set(env, &state);
        Admin::extend_instance_ttl(env);
        Ok(())
    }

    /// The most recently published rate, regardless of staleness.
    pub fn get_rate(env: &Env) -> i128 {
        OracleStorage::get(env).rate
    }

    /// Whether the last reading is older than the configured staleness bound.
    pub fn is_stale(env: &Env) -> bool {
        let state = OracleStorage::get(env);
        let now = env.ledger().timestamp();
        now.saturating_sub(state.last_update) > state.max_staleness
    }

    pub fn last_update(env: &Env) -> u64 {
        OracleStorage::get(env).last_update
    }

    pub fn max_staleness(env: &Env) -> u64 {
        OracleStorage::get(env).max_staleness
    }
}
