use soroban_sdk::{Address, BytesN, Env, contract, contractimpl};

use crate::admin::Admin;
use crate::common::error::Error;
use crate::common::storage::Storage;
use crate::common::types::Position;
use crate::fixed_point::Fp;
use crate::oracle_adapter::OracleAdapter;
use crate::operations::borrow::Borrow;
use crate::operations::lend::Lend;
use crate::operations::settlement::Settlement;
use crate::pricing;

#[contract]
pub struct BondMmA;

#[contractimpl]
impl BondMmA {
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: &Env,
        admin: Address,
        oracle: Address,
        ledger_token: Address,
        initial_cash: Fp,
    ) -> Result<(), Error> {
        Admin::initialize(env, &admin, &oracle, &ledger_token, initial_cash)
    }

    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Admin::upgrade(env, new_wasm_hash);
    }

    // ========== Trading ==========

    pub fn lend(env: Env, caller: Address, amount: i128, maturity: u64) -> Result<u64, Error> {
        Lend::lend(&env, &caller, amount, maturity)
    }

    pub fn borrow(
        env: Env,
        caller: Address,
        amount: i128,
        maturity: u64,
        collateral: i128,
    ) -> Result<u64, Error> {
        Borrow::borrow(&env, &caller, amount, maturity, collateral)
    }

    pub fn redeem(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        Settlement::redeem(&env, &caller, id)
    }

    pub fn repay(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        Settlement::repay(&env, &caller, id)
    }

    pub fn liquidate(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        Settlement::liquidate(&env, &caller, id)
    }

    // ========== Administration ==========

    pub fn pause(env: Env) -> Result<(), Error> {
        Admin::pause(&env)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        Admin::unpause(&env)
    }

    pub fn set_oracle(env: Env, oracle: Address) -> Result<(), Error> {
        Admin::set_oracle(&env, oracle)
    }

    pub fn set_min_maturity(env: Env, value: u64) -> Result<(), Error> {
        Admin::set_min_maturity(&env, value)
    }

    pub fn set_max_maturity(env: Env, value: u64) -> Result<(), Error> {
        Admin::set_max_maturity(&env, value)
    }

    pub fn set_collateral_ratio(env: Env, value: Fp) -> Result<(), Error> {
        Admin::set_collateral_ratio(&env, value)
    }

    pub fn set_solvency_threshold(env: Env, value: Fp) -> Result<(), Error> {
        Admin::set_solvency_threshold(&env, value)
    }

    pub fn set_grace_period(env: Env, value: u64) -> Result<(), Error> {
        Admin::set_grace_period(&env, value)
    }

    pub fn set_liquidation_penalty(env: Env, value: Fp) -> Result<(), Error> {
        Admin::set_liquidation_penalty(&env, value)
    }

    pub fn set_fallback_rate(env: Env, value: Fp) -> Result<(), Error> {
        Admin::set_fallback_rate(&env, value)
    }

    // ========== Queries ==========

    pub fn cash(env: Env) -> Fp {
        Storage::get(&env).cash
    }

    pub fn pv_bonds(env: Env) -> Fp {
        Storage::get(&env).pv_bonds
    }

    pub fn net_liabilities(env: Env) -> Fp {
        Storage::get(&env).net_liabilities
    }

    pub fn check_solvency(env: Env) -> bool {
        let pool = Storage::get(&env);
        match (
            crate::fixed_point::mul(pool.solvency_threshold, pool.initial_cash),
            crate::fixed_point::add(pool.cash, pool.net_liabilities),
        ) {
            (Ok(floor), Ok(coverage)) => coverage >= floor,
            _ => false,
        }
    }

    pub fn current_rate(env: Env) -> Result<Fp, Error> {
        let pool = Storage::get(&env);
        let r_star = OracleAdapter::current_rate(&env, &pool.oracle)?;
        pricing::rate(pool.pv_bonds, pool.cash, r_star)
    }

    pub fn anchor_rate(env: Env) -> Result<Fp, Error> {
        let pool = Storage::get(&env);
        OracleAdapter::current_rate(&env, &pool.oracle)
    }

    pub fn get_position(env: Env, id: u64) -> Position {
        Storage::get_position(&env, id)
    }

    pub fn min_maturity(env: Env) -> u64 {
        Storage::get(&env).min_maturity
    }

    pub fn max_maturity(env: Env) -> u64 {
        Storage::get(&env).max_maturity
    }

    pub fn collateral_ratio(env: Env) -> Fp {
        Storage::get(&env).collateral_ratio
    }

    pub fn solvency_threshold(env: Env) -> Fp {
        Storage::get(&env).solvency_threshold
    }

    pub fn grace_period(env: Env) -> u64 {
        Storage::get(&env).grace_period
    }

    pub fn liquidation_penalty(env: Env) -> Fp {
        Storage::get(&env).liquidation_penalty
    }

    pub fn fallback_rate(env: Env) -> Fp {
        Storage::get(&env).fallback_rate
    }

    pub fn oracle(env: Env) -> Address {
        Storage::get(&env).oracle
    }

    pub fn ledger_token(env: Env) -> Address {
        Storage::get(&env).ledger_token
    }
}
