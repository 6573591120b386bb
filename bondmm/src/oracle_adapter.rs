//! Wraps the anchor-rate publisher contract behind the fail-closed /
//! fail-open split the pool's origination and exit paths each need.

use bondmm_oracle::AnchorOracleClient;
use soroban_sdk::{Address, Env};

use crate::common::error::Error;
use crate::common::events::Events;
use crate::fixed_point::Fp;

pub struct OracleAdapter;

impl OracleAdapter {
    /// Used by `lend`/`borrow`: fails closed on a stale reading so
    /// origination never happens against an untrustworthy rate.
    pub fn current_rate(env: &Env, oracle: &Address) -> Result<Fp, Error> {
        let client = AnchorOracleClient::new(env, oracle);
        if client.is_stale() {
            return Err(Error::OracleStale);
        }
        Ok(client.get_rate())
    }

    /// Used by `repay`/`liquidate`/`accrue`: never blocks on a stale
    /// reading, falling back to the administratively configured rate and
    /// recording a `FallbackRateUsed` event.
    pub fn safe_rate(env: &Env, oracle: &Address, fallback_rate: Fp) -> Fp {
        let client = AnchorOracleClient::new(env, oracle);
        if client.is_stale() {
            Events::fallback_rate_used(env, fallback_rate);
            fallback_rate
        } else {
            client.get_rate()
        }
    }

    pub fn is_stale(env: &Env, oracle: &Address) -> bool {
        AnchorOracleClient::new(env, oracle).is_stale()
    }
}
