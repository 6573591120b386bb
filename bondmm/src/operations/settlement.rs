use soroban_sdk::{Address, Env, token::TokenClient};

use crate::common::error::Error;
use crate::common::events::Events;
use crate::common::storage::Storage;
use crate::common::types::PositionKind;
use crate::fixed_point;
use crate::oracle_adapter::OracleAdapter;
use crate::pool_core::PoolCore;
use crate::pricing;

pub struct Settlement;

impl Settlement {
    /// Pays a matured lend position par value and marks it inactive.
    pub fn redeem(env: &Env, caller: &Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let mut pool = PoolCore::enter(env, caller, false)?;
        let mut position = Storage::get_position(env, id);

        if !position.is_active {
            return Err(Error::NotActive);
        }
        if position.owner != *caller {
            return Err(Error::NotOwner);
        }
        if position.kind != PositionKind::Lend {
            return Err(Error::WrongPositionKind);
        }
        let now = env.ledger().timestamp();
        if now < position.maturity {
            return Err(Error::NotMature);
        }

        pool.cash = fixed_point::sub(pool.cash, position.face_value)?;
        pool.pv_bonds = fixed_point::add(pool.pv_bonds, position.face_value)?;

        position.is_active = false;
        Storage::set_position(env, id, &position);
        PoolCore::checkpoint(env, &pool);

        let token_client = TokenClient::new(env, &pool.ledger_token);
        token_client.transfer(&env.current_contract_address(), caller, &position.face_value);

        Events::redeem(env, caller, id, position.face_value);
        PoolCore::exit(env, pool, false)
    }

    /// Settles an active borrow position ahead of or at maturity.
    pub fn repay(env: &Env, caller: &Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let mut pool = PoolCore::enter(env, caller, false)?;
        let mut position = Storage::get_position(env, id);

        if !position.is_active {
            return Err(Error::NotActive);
        }
        if position.owner != *caller {
            return Err(Error::NotOwner);
        }
        if position.kind != PositionKind::Borrow {
            return Err(Error::WrongPositionKind);
        }

        let now = env.ledger().timestamp();
        let safe_r_star = OracleAdapter::safe_rate(env, &pool.oracle, pool.fallback_rate);
        let avg_r = pricing::rate(pool.pv_bonds, pool.cash, safe_r_star)?;

        let (repay_amount, current_pv) = if now >= position.maturity {
            (position.face_value, position.face_value)
        } else {
            let t = position.maturity - now;
            let price = pricing::price(t, avg_r)?;
            let repay = fixed_point::mul(position.face_value, price)?;
            (repay, repay)
        };

        let elapsed = now.saturating_sub(position.created_at);
        let growth = pricing::price(elapsed, -avg_r)?;
        let grown = fixed_point::mul(position.initial_pv, growth)?;

        pool.cash = fixed_point::add(pool.cash, repay_amount)?;
        pool.pv_bonds = fixed_point::sub(pool.pv_bonds, current_pv)?;
        pool.net_liabilities = fixed_point::sub_saturating(pool.net_liabilities, grown);

        position.is_active = false;
        Storage::set_position(env, id, &position);
        PoolCore::checkpoint(env, &pool);

        let token_client = TokenClient::new(env, &pool.ledger_token);
        let contract_address = env.current_contract_address();
        token_client.transfer(caller, &contract_address, &repay_amount);
        token_client.transfer(&contract_address, caller, &position.collateral);

        Events::repay(env, caller, id, repay_amount, position.collateral);
        PoolCore::exit(env, pool, false)
    }

    /// Seizes the collateral of a borrow position left unpaid past its
    /// grace period. Permissionless: any caller may trigger it.
    pub fn liquidate(env: &Env, caller: &Address, id: u64) -> Result<(), Error> {
        caller.require_auth();

        let mut pool = PoolCore::enter(env, caller, true)?;
        let mut position = Storage::get_position(env, id);

        if !position.is_active {
            return Err(Error::NotActive);
        }
        if position.kind != PositionKind::Borrow {
            return Err(Error::WrongPositionKind);
        }
        let now = env.ledger().timestamp();
        if now <= position.maturity + pool.grace_period {
            return Err(Error::GraceNotExpired);
        }

        let safe_r_star = OracleAdapter::safe_rate(env, &pool.oracle, pool.fallback_rate);
        let avg_r = pricing::rate(pool.pv_bonds, pool.cash, safe_r_star)?;
        let elapsed = now.saturating_sub(position.created_at);
        let growth = pricing::price(elapsed, -avg_r)?;
        let grown = fixed_point::mul(position.initial_pv, growth)?;
        let penalty = fixed_point::mul(position.face_value, pool.liquidation_penalty)?;

        pool.cash = fixed_point::add(pool.cash, position.collateral)?;
        pool.pv_bonds = fixed_point::sub(pool.pv_bonds, position.face_value)?;
        pool.net_liabilities = fixed_point::sub_saturating(pool.net_liabilities, grown);

        position.is_active = false;
        Storage::set_position(env, id, &position);

        Events::liquidated(env, &position.owner, id, caller, position.collateral, penalty);
        PoolCore::exit(env, pool, false)
    }
}
