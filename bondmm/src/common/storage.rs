use soroban_sdk::{Address, Env, panic_with_error};

use super::error::Error;
use super::types::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD, POOL_KEY, PoolStorage, Position, PositionKind,
};

/// Access to the pool singleton and the admin address, read-modify-write the
/// way `rwa-lending`'s `Storage` treats its own `PoolStorage`.
pub struct Storage;

impl Storage {
    pub fn is_initialized(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<_, PoolStorage>(&POOL_KEY)
            .map(|p| p.initialized)
            .unwrap_or(false)
    }

    pub fn get(env: &Env) -> PoolStorage {
        env.storage()
            .instance()
            .get(&POOL_KEY)
            .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
    }

    pub fn set(env: &Env, pool: &PoolStorage) {
        env.storage().instance().set(&POOL_KEY, pool);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    /// `allocate(record) -> id`: returns the current `next_position_id` and
    /// increments the pool's counter. The caller is responsible for writing
    /// both the updated pool and the new record.
    pub fn allocate_position_id(pool: &mut PoolStorage) -> u64 {
        let id = pool.next_position_id;
        pool.next_position_id += 1;
        id
    }

    /// Looks up a position by id. An unknown id is a caller mistake, not
    /// corrupted storage, so it returns a zeroed, inactive record rather
    /// than panicking — callers check `is_active` the same way they would
    /// for a position that was already closed.
    pub fn get_position(env: &Env, id: u64) -> Position {
        let key = (POOL_KEY, id);
        match env.storage().persistent().get::<_, Position>(&key) {
            Some(position) => {
                env.storage().persistent().extend_ttl(
                    &key,
                    PERSISTENT_LIFETIME_THRESHOLD,
                    PERSISTENT_BUMP_AMOUNT,
                );
                position
            }
            None => Position {
                owner: env.current_contract_address(),
                face_value: 0,
                maturity: 0,
                collateral: 0,
                initial_pv: 0,
                created_at: 0,
                kind: PositionKind::Lend,
                is_active: false,
            },
        }
    }

    pub fn set_position(env: &Env, id: u64, position: &Position) {
        let key = (POOL_KEY, id);
        env.storage().persistent().set(&key, position);
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }

    pub fn mark_inactive(env: &Env, id: u64) {
        let mut position = Self::get_position(env, id);
        position.is_active = false;
        Self::set_position(env, id, &position);
    }

    pub fn last_mutation_ledger(pool: &PoolStorage, caller: &Address) -> Option<u32> {
        pool.last_mutation_ledger.get(caller.clone())
    }

    pub fn record_mutation_ledger(env: &Env, pool: &mut PoolStorage, caller: &Address) {
        pool.last_mutation_ledger
            .set(caller.clone(), env.ledger().sequence());
    }
}
