use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol, Vec};

use staking_common::{
    ttl::{
        INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    },
    utils::AdminChange,
};
use tranche_schedule::TrancheSchedule;

use crate::error::ContractError;

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");
const CONFIG: Symbol = symbol_short!("CONFIG");

/// Denominator of `Config::reward_multiplier_bps`
pub const BPS_DENOMINATOR: i128 = 10_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token paid out to stakers as their positions vest
    pub reward_token: Address,
    /// Tokens accepted as principal, burned on deposit
    pub stake_tokens: Vec<Address>,
    /// Smallest principal a single deposit may carry
    pub min_stake_amount: i128,
    /// Reward owed per unit of principal, in basis points (12_500 pays 5/4)
    pub reward_multiplier_bps: i64,
    /// Release schedule applied to every position
    pub schedule: TrancheSchedule,
}

impl Config {
    pub fn is_whitelisted(&self, token: &Address) -> bool {
        self.stake_tokens.contains(token)
    }

    /// Reward owed at full vesting for `principal`, rounded down.
    pub fn reward_for(&self, principal: i128) -> Option<i128> {
        principal
            .checked_mul(self.reward_multiplier_bps as i128)?
            .checked_div(BPS_DENOMINATOR)
    }
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&CONFIG)
        .unwrap_or_else(|| {
            log!(env, "Staker: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        });
    env.storage().persistent().extend_ttl(
        &CONFIG,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );

    config
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().persistent().set(&CONFIG, config);
    env.storage().persistent().extend_ttl(
        &CONFIG,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

/// One deposit. Only `withdrawn` ever changes after creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub owner: Address,
    /// Whitelisted token the principal was burned from
    pub stake_token: Address,
    pub principal: i128,
    /// Reward owed once every tranche is unlocked
    pub total_reward: i128,
    /// Reward already paid out for this position
    pub withdrawn: i128,
    /// Ledger timestamp of the deposit, start of this position's vesting clock
    pub start_time: u64,
}

impl StakePosition {
    pub fn vested(&self, schedule: &TrancheSchedule, now: u64) -> i128 {
        schedule.vested_amount(self.total_reward, self.start_time, now)
    }

    /// Vested but not yet withdrawn reward.
    pub fn available(&self, schedule: &TrancheSchedule, now: u64) -> i128 {
        self.vested(schedule, now) - self.withdrawn
    }

    /// Reward still owed, vested or not.
    pub fn outstanding(&self) -> i128 {
        self.total_reward - self.withdrawn
    }
}

pub mod utils {
    use super::*;

    pub fn save_admin(env: &Env, address: &Address) {
        env.storage().instance().set(&ADMIN, address);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn get_admin(env: &Env) -> Address {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

        env.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(env, "Staker: Admin not set");
            panic_with_error!(env, ContractError::AdminNotSet)
        })
    }

    pub fn save_pending_admin(env: &Env, change: &AdminChange) {
        env.storage().instance().set(&PENDING_ADMIN, change);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn get_pending_admin(env: &Env) -> Option<AdminChange> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn remove_pending_admin(env: &Env) {
        env.storage().instance().remove(&PENDING_ADMIN);
    }
}
