//! Append-only registry of stake positions.
//!
//! Positions live in an arena keyed by `(owner, index)` next to a per owner counter,
//! so a deposit or a withdrawal only rewrites the entries it touches. Nothing is ever
//! removed: fully vested and fully withdrawn positions stay queryable.

use soroban_sdk::{contracttype, log, panic_with_error, Address, Env, Vec};

use staking_common::ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL};

use crate::{error::ContractError, storage::StakePosition};

#[contracttype]
pub enum PositionDataKey {
    Count(Address),
    Position(Address, u32),
}

pub fn position_count(env: &Env, owner: &Address) -> u32 {
    let key = PositionDataKey::Count(owner.clone());
    let count = env.storage().persistent().get(&key).unwrap_or(0u32);
    env.storage().persistent().has(&key).then(|| {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        )
    });

    count
}

pub fn get_position(env: &Env, owner: &Address, index: u32) -> StakePosition {
    let key = PositionDataKey::Position(owner.clone(), index);
    let position = env.storage().persistent().get(&key).unwrap_or_else(|| {
        log!(
            env,
            "Staker: Get position: Critical error - position {} of {} missing",
            index,
            owner
        );
        panic_with_error!(env, ContractError::InvariantViolation)
    });
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );

    position
}

fn save_position(env: &Env, owner: &Address, index: u32, position: &StakePosition) {
    let key = PositionDataKey::Position(owner.clone(), index);
    env.storage().persistent().set(&key, position);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

/// Adds `position` after the owner's existing positions and returns its index.
pub fn append(env: &Env, owner: &Address, position: &StakePosition) -> u32 {
    let index = position_count(env, owner);
    save_position(env, owner, index, position);

    let key = PositionDataKey::Count(owner.clone());
    env.storage().persistent().set(&key, &(index + 1));
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );

    index
}

/// All positions of `owner` in deposit order.
pub fn positions_of(env: &Env, owner: &Address) -> Vec<StakePosition> {
    let mut positions = Vec::new(env);
    for index in 0..position_count(env, owner) {
        positions.push_back(get_position(env, owner, index));
    }

    positions
}

/// Raises the withdrawn amount of a stored position.
///
/// `new_withdrawn` lower than what was already withdrawn, or above the position's
/// total reward, can only come from a calculation error and aborts the invocation.
pub fn mark_withdrawn(
    env: &Env,
    owner: &Address,
    index: u32,
    mut position: StakePosition,
    new_withdrawn: i128,
) -> StakePosition {
    if new_withdrawn < position.withdrawn || new_withdrawn > position.total_reward {
        log!(
            env,
            "Staker: Mark withdrawn: Critical error - withdrawn would move from {} to {} with total reward {}",
            position.withdrawn,
            new_withdrawn,
            position.total_reward
        );
        panic_with_error!(env, ContractError::InvariantViolation);
    }

    position.withdrawn = new_withdrawn;
    save_position(env, owner, index, &position);

    position
}
