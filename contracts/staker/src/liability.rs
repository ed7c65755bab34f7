//! System wide reward liability: the sum of `total_reward - withdrawn` over every
//! position ever created. The two `record_*` functions are its only writers.

use soroban_sdk::{log, panic_with_error, ConversionError, Env, TryFromVal, Val};

use staking_common::ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL};

use crate::error::ContractError;

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Liability = 0,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

fn save_liability(env: &Env, liability: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Liability, &liability);
    env.storage().persistent().extend_ttl(
        &DataKey::Liability,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub fn init_liability(env: &Env) {
    save_liability(env, 0);
}

pub fn current_liability(env: &Env) -> i128 {
    let liability = env
        .storage()
        .persistent()
        .get(&DataKey::Liability)
        .unwrap_or(0i128);
    env.storage()
        .persistent()
        .has(&DataKey::Liability)
        .then(|| {
            env.storage().persistent().extend_ttl(
                &DataKey::Liability,
                PERSISTENT_RENEWAL_THRESHOLD,
                PERSISTENT_TARGET_TTL,
            )
        });

    liability
}

/// Called with the total reward of every admitted deposit.
pub fn record_new_obligation(env: &Env, amount: i128) {
    let liability = current_liability(env)
        .checked_add(amount)
        .unwrap_or_else(|| {
            log!(env, "Staker: Record new obligation: Critical error - liability overflow");
            panic_with_error!(env, ContractError::ContractMathError)
        });
    save_liability(env, liability);
}

/// Called with every amount paid out to a depositor.
pub fn record_payout(env: &Env, amount: i128) {
    let liability = current_liability(env);
    match liability.checked_sub(amount) {
        Some(remaining) if remaining >= 0 => save_liability(env, remaining),
        _ => {
            log!(
                env,
                "Staker: Record payout: Critical error - paying {} exceeds liability {}",
                amount,
                liability
            );
            panic_with_error!(env, ContractError::InvariantViolation);
        }
    }
}

/// Part of `reward_balance` not promised to any position.
pub fn available_for_new_obligation(env: &Env, reward_balance: i128) -> i128 {
    let liability = current_liability(env);
    if reward_balance < liability {
        log!(
            env,
            "Staker: Available for new obligation: Critical error - balance {} below liability {}",
            reward_balance,
            liability
        );
        panic_with_error!(env, ContractError::InvariantViolation);
    }

    reward_balance - liability
}
