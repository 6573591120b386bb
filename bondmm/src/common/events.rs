use soroban_sdk::{Address, Env, Symbol, contractevent};

use crate::fixed_point::Fp;

#[contractevent]
pub struct InitializedEvent {
    pub initial_cash: Fp,
    pub oracle: Address,
    pub ledger_token: Address,
}

#[contractevent]
pub struct LendEvent {
    pub owner: Address,
    pub position_id: u64,
    pub amount: Fp,
    pub face_value: Fp,
    pub maturity: u64,
}

#[contractevent]
pub struct BorrowEvent {
    pub owner: Address,
    pub position_id: u64,
    pub amount: Fp,
    pub collateral: Fp,
    pub face_value: Fp,
    pub maturity: u64,
}

#[contractevent]
pub struct RedeemEvent {
    pub owner: Address,
    pub position_id: u64,
    pub face_value: Fp,
}

#[contractevent]
pub struct RepayEvent {
    pub owner: Address,
    pub position_id: u64,
    pub repay_amount: Fp,
    pub collateral_returned: Fp,
}

#[contractevent]
pub struct LiquidatedEvent {
    pub owner: Address,
    pub position_id: u64,
    pub liquidator: Address,
    pub collateral_seized: Fp,
    pub penalty: Fp,
}

#[contractevent]
pub struct FallbackRateUsedEvent {
    pub rate: Fp,
}

#[contractevent]
pub struct ParamUpdatedEvent {
    pub name: Symbol,
    pub value: Fp,
}

#[contractevent]
pub struct PausedEvent {
    pub at: u64,
}

#[contractevent]
pub struct UnpausedEvent {
    pub at: u64,
}

#[contractevent]
pub struct OracleUpdatedEvent {
    pub oracle: Address,
}

/// Helper for publishing events, mirroring `rwa-lending`'s `Events` struct.
pub struct Events;

impl Events {
    pub fn initialized(env: &Env, initial_cash: Fp, oracle: &Address, ledger_token: &Address) {
        InitializedEvent {
            initial_cash,
            oracle: oracle.clone(),
            ledger_token: ledger_token.clone(),
        }
        .publish(env);
    }

    pub fn lend(env: &Env, owner: &Address, position_id: u64, amount: Fp, face_value: Fp, maturity: u64) {
        LendEvent {
            owner: owner.clone(),
            position_id,
            amount,
            face_value,
            maturity,
        }
        .publish(env);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn borrow(
        env: &Env,
        owner: &Address,
        position_id: u64,
        amount: Fp,
        collateral: Fp,
        face_value: Fp,
        maturity: u64,
    ) {
        BorrowEvent {
            owner: owner.clone(),
            position_id,
            amount,
            collateral,
            face_value,
            maturity,
        }
        .publish(env);
    }

    pub fn redeem(env: &Env, owner: &Address, position_id: u64, face_value: Fp) {
        RedeemEvent {
            owner: owner.clone(),
            position_id,
            face_value,
        }
        .publish(env);
    }

    pub fn repay(env: &Env, owner: &Address, position_id: u64, repay_amount: Fp, collateral_returned: Fp) {
        RepayEvent {
            owner: owner.clone(),
            position_id,
            repay_amount,
            collateral_returned,
        }
        .publish(env);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn liquidated(
        env: &Env,
        owner: &Address,
        position_id: u64,
        liquidator: &Address,
        collateral_seized: Fp,
        penalty: Fp,
    ) {
        LiquidatedEvent {
            owner: owner.clone(),
            position_id,
            liquidator: liquidator.clone(),
            collateral_seized,
            penalty,
        }
        .publish(env);
    }

    pub fn fallback_rate_used(env: &Env, rate: Fp) {
        FallbackRateUsedEvent { rate }.publish(env);
    }

    pub fn param_updated(env: &Env, name: Symbol, value: Fp) {
        ParamUpdatedEvent { name, value }.publish(env);
    }

    pub fn paused(env: &Env) {
        PausedEvent {
            at: env.ledger().timestamp(),
        }
        .publish(env);
    }

    pub fn unpaused(env: &Env) {
        UnpausedEvent {
            at: env.ledger().timestamp(),
        }
        .publish(env);
    }

    pub fn oracle_updated(env: &Env, oracle: &Address) {
        OracleUpdatedEvent {
            oracle: oracle.clone(),
        }
        .publish(env);
    }
}
