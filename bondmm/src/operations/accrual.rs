//! Pool-wide liability accrual, run as the last step of every mutating
//! entry point's pre-phase.

use soroban_sdk::Env;

use crate::common::error::Error;
use crate::common::types::PoolStorage;
use crate::fixed_point;
use crate::oracle_adapter::OracleAdapter;
use crate::pricing;

pub struct Accrual;

impl Accrual {
    /// Advances `net_liabilities` from `t_last` to now at the current
    /// anchor rate. No-ops (but still bumps `t_last`) when there is nothing
    /// to grow or the oracle can't be trusted.
    pub fn accrue(env: &Env, pool: &mut PoolStorage) -> Result<(), Error> {
        let now = env.ledger().timestamp();
        let dt = now.saturating_sub(pool.t_last);

        if pool.net_liabilities == 0 || dt == 0 {
            pool.t_last = now;
            return Ok(());
        }

        if OracleAdapter::is_stale(env, &pool.oracle) {
            pool.t_last = now;
            return Ok(());
        }

        let r_star = OracleAdapter::current_rate(env, &pool.oracle)?;
        let r = pricing::rate(pool.pv_bonds, pool.cash, r_star)?;
        // growth over dt at rate r is the reciprocal of the discount
        // factor `price` already computes for -r.
        let growth = pricing::price(dt, -r)?;
        pool.net_liabilities = fixed_point::mul(pool.net_liabilities, growth)?;
        pool.t_last = now;
        Ok(())
    }
}
