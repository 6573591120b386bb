use soroban_sdk::{Address, Env, token::TokenClient};

use crate::common::error::Error;
use crate::common::events::Events;
use crate::common::storage::Storage;
use crate::common::types::{Position, PositionKind};
use crate::fixed_point;
use crate::oracle_adapter::OracleAdapter;
use crate::pool_core::PoolCore;
use crate::pricing::{self, Side};

pub struct Borrow;

impl Borrow {
    pub fn borrow(
        env: &Env,
        caller: &Address,
        amount: i128,
        maturity: u64,
        collateral: i128,
    ) -> Result<u64, Error> {
        caller.require_auth();

        let mut pool = PoolCore::enter(env, caller, true)?;

        if amount <= 0 {
            return Err(Error::InvalidTrade);
        }
        let required_collateral = fixed_point::mul(pool.collateral_ratio, amount)?;
        if collateral < required_collateral {
            return Err(Error::InsufficientCollateral);
        }
        let now = env.ledger().timestamp();
        if maturity <= now {
            return Err(Error::InvalidMaturity);
        }
        let t = maturity - now;
        if t < pool.min_maturity || t > pool.max_maturity {
            return Err(Error::InvalidMaturity);
        }
        if pool.cash < amount {
            return Err(Error::InsufficientLiquidity);
        }

        let r_star = OracleAdapter::current_rate(env, &pool.oracle)?;
        let delta_x = pricing::delta_x(amount, pool.pv_bonds, pool.cash, t, r_star, Side::Remove)?;
        let current_r = pricing::rate(pool.pv_bonds, pool.cash, r_star)?;
        let price = pricing::price(t, current_r)?;
        let delta_pv = fixed_point::mul(delta_x, price)?;

        pool.cash = fixed_point::sub(pool.cash, amount)?;
        pool.pv_bonds = fixed_point::add(pool.pv_bonds, delta_pv)?;
        pool.net_liabilities = fixed_point::add(pool.net_liabilities, delta_pv)?;
        PoolCore::checkpoint(env, &pool);

        let token_client = TokenClient::new(env, &pool.ledger_token);
        let contract_address = env.current_contract_address();
        token_client.transfer(caller, &contract_address, &collateral);
        token_client.transfer(&contract_address, caller, &amount);

        let id = Storage::allocate_position_id(&mut pool);
        let position = Position {
            owner: caller.clone(),
            face_value: delta_x,
            maturity,
            collateral,
            initial_pv: delta_pv,
            created_at: now,
            kind: PositionKind::Borrow,
            is_active: true,
        };
        Storage::set_position(env, id, &position);

        Events::borrow(env, caller, id, amount, collateral, delta_x, maturity);
        PoolCore::exit(env, pool, true)?;
        Ok(id)
    }
}
