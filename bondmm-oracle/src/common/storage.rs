use soroban_sdk::{Env, contracttype};

use super::types::{DEFAULT_MAX_STALENESS, STORAGE};

#[contracttype]
#[derive(Clone, Debug)]
pub struct OracleStorage {
    pub rate: i128,
    pub last_update: u64,
    pub max_staleness: u64,
}

impl OracleStorage {
    pub fn new(env: &Env, rate: i128) -> Self {
        Self {
            rate,
            last_update: env.ledger().timestamp(),
            max_staleness: DEFAULT_MAX_STALENESS,
        }
    }

    pub fn get(env: &Env) -> Self {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    pub fn set(env: &Env, storage: &Self) {
        env.storage().instance().set(&STORAGE, storage);
    }
}
