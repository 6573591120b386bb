//! Shared pre-phase and post-phase wrapped around every mutating entry
//! point: reentrancy guard, initialization/pause checks, the same-ledger
//! flash-loan guard, liability accrual, and the solvency post-check.

use soroban_sdk::{Address, Env};

use crate::common::error::Error;
use crate::common::storage::Storage;
use crate::common::types::PoolStorage;
use crate::fixed_point;
use crate::operations::accrual::Accrual;

pub struct PoolCore;

impl PoolCore {
    /// Runs the shared pre-phase and returns the pool state with the
    /// reentrancy guard already set and liabilities already accrued.
    /// `block_when_paused` is false for `redeem`/`repay`, which must remain
    /// reachable even while the pool is paused.
    pub fn enter(env: &Env, caller: &Address, block_when_paused: bool) -> Result<PoolStorage, Error> {
        if !Storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        let mut pool = Storage::get(env);

        if pool.reentrancy_guard {
            return Err(Error::ReentrancyDetected);
        }
        if block_when_paused && pool.paused {
            return Err(Error::Paused);
        }

        let current_ledger = env.ledger().sequence();
        if let Some(last) = Storage::last_mutation_ledger(&pool, caller)
            && last == current_ledger {
                return Err(Error::FlashLoanDetected);
            }
        Storage::record_mutation_ledger(env, &mut pool, caller);

        pool.reentrancy_guard = true;
        Accrual::accrue(env, &mut pool)?;
        Ok(pool)
    }

    /// Persists the in-progress pool state, guard included. Callers must run
    /// this after applying their state mutations and before any external
    /// token transfer, so a reentrant call made from inside that transfer
    /// reads the guard (and the already-updated balances) from storage
    /// instead of the stale pre-entry snapshot.
    pub fn checkpoint(env: &Env, pool: &PoolStorage) {
        Storage::set(env, pool);
    }

    /// Releases the reentrancy guard, optionally checks solvency, and
    /// persists the pool. `check_solvency` is set for origination
    /// (`lend`/`borrow`) but not for exits, which are always allowed to
    /// complete even if they bring the pool below its solvency floor.
    pub fn exit(env: &Env, mut pool: PoolStorage, check_solvency: bool) -> Result<(), Error> {
        pool.reentrancy_guard = false;

        if check_solvency {
            let floor = fixed_point::mul(pool.solvency_threshold, pool.initial_cash)?;
            let coverage = fixed_point::add(pool.cash, pool.net_liabilities)?;
            if coverage < floor {
                return Err(Error::Insolvent);
            }
        }

        Storage::set(env, &pool);
        Ok(())
    }
}
