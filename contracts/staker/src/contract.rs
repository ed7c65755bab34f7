use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, Vec,
};

use staking_common::utils::AdminChange;
use tranche_schedule::TrancheSchedule;

use crate::{
    error::ContractError,
    liability,
    msg::{ConfigResponse, PositionResponse, PositionsResponse},
    positions,
    storage::{
        get_config, save_config,
        utils::{self, get_admin},
        Config, StakePosition,
    },
    token::{RewardToken, StakeableToken},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tranche staking: burn stake tokens, vest rewards in tranches"
);

#[contract]
pub struct Staker;

pub trait StakerTrait {
    fn deposit(
        env: Env,
        sender: Address,
        stake_token: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn reclaim_unused_supply(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Address;

    fn query_min_stake_amount(env: Env) -> i128;

    fn query_is_whitelisted(env: Env, token: Address) -> bool;

    fn query_whitelist(env: Env) -> Vec<Address>;

    fn query_available(env: Env, address: Address) -> i128;

    fn query_my_available(env: Env, sender: Address) -> i128;

    fn query_positions(env: Env, address: Address) -> PositionsResponse;

    fn query_my_positions(env: Env, sender: Address) -> PositionsResponse;

    fn query_current_liability(env: Env) -> i128;

    fn query_available_supply(env: Env) -> i128;
}

#[contractimpl]
impl StakerTrait for Staker {
    fn deposit(
        env: Env,
        sender: Address,
        stake_token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let stake_token = StakeableToken::lookup(&env, &config, &stake_token)?;

        if amount < config.min_stake_amount {
            log!(
                &env,
                "Staker: Deposit: Trying to stake {} which is less than minimum {} required",
                amount,
                config.min_stake_amount
            );
            return Err(ContractError::BelowMinimumStake);
        }

        let reward = config.reward_for(amount).ok_or_else(|| {
            log!(&env, "Staker: Deposit: Reward for {} overflows", amount);
            ContractError::ContractMathError
        })?;

        let reward_token = RewardToken::new(&env, &config);
        let available = liability::available_for_new_obligation(&env, reward_token.balance());
        if available < reward {
            log!(
                &env,
                "Staker: Deposit: Not enough reward supply, {} available and {} needed",
                available,
                reward
            );
            return Err(ContractError::InsufficientRewardSupply);
        }

        stake_token.burn_from(&sender, amount)?;

        let position = StakePosition {
            owner: sender.clone(),
            stake_token: stake_token.address().clone(),
            principal: amount,
            total_reward: reward,
            withdrawn: 0,
            start_time: env.ledger().timestamp(),
        };
        positions::append(&env, &sender, &position);
        liability::record_new_obligation(&env, reward);

        env.events().publish(("deposit", "user"), &sender);
        env.events()
            .publish(("deposit", "token"), stake_token.address());
        env.events().publish(("deposit", "amount"), amount);
        env.events().publish(("deposit", "reward"), reward);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let now = env.ledger().timestamp();

        let mut total_paid = 0i128;
        for index in 0..positions::position_count(&env, &sender) {
            let position = positions::get_position(&env, &sender, index);
            let vested = position.vested(&config.schedule, now);
            let delta = vested - position.withdrawn;
            if delta == 0 {
                continue;
            }

            positions::mark_withdrawn(&env, &sender, index, position, vested);
            liability::record_payout(&env, delta);
            total_paid = total_paid
                .checked_add(delta)
                .ok_or(ContractError::ContractMathError)?;
        }

        if total_paid == 0 {
            log!(&env, "Staker: Withdraw: Nothing to withdraw for {}", sender);
            return Ok(0);
        }

        RewardToken::new(&env, &config).pay(&sender, total_paid);

        env.events().publish(("withdraw", "user"), &sender);
        env.events().publish(("withdraw", "amount"), total_paid);

        Ok(total_paid)
    }

    fn reclaim_unused_supply(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let admin = get_admin(&env);
        if sender != admin {
            log!(
                &env,
                "Staker: Reclaim unused supply: Only the admin can reclaim reward tokens"
            );
            return Err(ContractError::Unauthorized);
        }

        let config = get_config(&env);
        let reward_token = RewardToken::new(&env, &config);
        let amount = liability::available_for_new_obligation(&env, reward_token.balance());
        if amount > 0 {
            reward_token.pay(&admin, amount);
        }

        env.events()
            .publish(("reclaim_unused_supply", "amount"), amount);

        Ok(amount)
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Staker: Propose admin: Trying to set the same admin");
            return Err(ContractError::SameAdmin);
        }

        utils::save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("Staker: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Staker: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if utils::get_pending_admin(&env).is_none() {
            log!(&env, "Staker: Revoke admin change: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }

        utils::remove_pending_admin(&env);

        env.events()
            .publish(("Staker: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = utils::get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Staker: Accept admin: No admin change in place");
            ContractError::NoAdminChangeInPlace
        })?;

        if admin_change.is_expired(env.ledger().timestamp()) {
            log!(&env, "Staker: Accept admin: Admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        admin_change.new_admin.require_auth();

        utils::remove_pending_admin(&env);
        utils::save_admin(&env, &admin_change.new_admin);

        env.events()
            .publish(("Staker: ", "Accepted new admin: "), &admin_change.new_admin);

        Ok(admin_change.new_admin)
    }

    fn query_config(env: Env) -> ConfigResponse {
        ConfigResponse {
            config: get_config(&env),
        }
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_min_stake_amount(env: Env) -> i128 {
        get_config(&env).min_stake_amount
    }

    fn query_is_whitelisted(env: Env, token: Address) -> bool {
        get_config(&env).is_whitelisted(&token)
    }

    fn query_whitelist(env: Env) -> Vec<Address> {
        get_config(&env).stake_tokens
    }

    fn query_available(env: Env, address: Address) -> i128 {
        available_to_withdraw(&env, &address)
    }

    fn query_my_available(env: Env, sender: Address) -> i128 {
        sender.require_auth();
        available_to_withdraw(&env, &sender)
    }

    fn query_positions(env: Env, address: Address) -> PositionsResponse {
        report_positions(&env, &address)
    }

    fn query_my_positions(env: Env, sender: Address) -> PositionsResponse {
        sender.require_auth();
        report_positions(&env, &sender)
    }

    fn query_current_liability(env: Env) -> i128 {
        liability::current_liability(&env)
    }

    fn query_available_supply(env: Env) -> i128 {
        let config = get_config(&env);
        liability::available_for_new_obligation(&env, RewardToken::new(&env, &config).balance())
    }
}

#[contractimpl]
impl Staker {
    pub fn __constructor(
        env: Env,
        admin: Address,
        reward_token: Address,
        stake_tokens: Vec<Address>,
        min_stake_amount: i128,
        reward_multiplier_bps: i64,
        schedule: TrancheSchedule,
    ) {
        let config = Config {
            reward_token,
            stake_tokens,
            min_stake_amount,
            reward_multiplier_bps,
            schedule,
        };
        if let Err(err) = validate_config(&env, &config) {
            panic_with_error!(&env, err);
        }

        save_config(&env, &config);
        utils::save_admin(&env, &admin);
        liability::init_liability(&env);

        env.events()
            .publish(("initialize", "Tranche staker with reward token"), &config.reward_token);
    }
}

fn validate_config(env: &Env, config: &Config) -> Result<(), ContractError> {
    if config.min_stake_amount <= 0 {
        log!(env, "Staker: Initialize: Minimum stake amount must be bigger than 0");
        return Err(ContractError::InvalidMinStake);
    }
    if config.reward_multiplier_bps <= 0 {
        log!(env, "Staker: Initialize: Reward multiplier must be bigger than 0");
        return Err(ContractError::InvalidRewardMultiplier);
    }
    // reward_for is non-decreasing, so every admitted deposit earns at least this
    if !matches!(config.reward_for(config.min_stake_amount), Some(reward) if reward > 0) {
        log!(
            env,
            "Staker: Initialize: Minimum stake {} earns no reward at {} bps",
            config.min_stake_amount,
            config.reward_multiplier_bps
        );
        return Err(ContractError::InvalidRewardMultiplier);
    }
    config.schedule.validate().map_err(|err| {
        log!(env, "Staker: Initialize: Invalid tranche schedule");
        ContractError::from(err)
    })?;
    if config.stake_tokens.is_empty() {
        log!(env, "Staker: Initialize: At least one stake token must be provided");
        return Err(ContractError::EmptyWhitelist);
    }

    let mut seen: Vec<Address> = Vec::new(env);
    for token in config.stake_tokens.iter() {
        if seen.contains(&token) {
            log!(env, "Staker: Initialize: Duplicate stake token {}", token);
            return Err(ContractError::DuplicateStakeToken);
        }
        seen.push_back(token);
    }

    Ok(())
}

fn available_to_withdraw(env: &Env, owner: &Address) -> i128 {
    let schedule = get_config(env).schedule;
    let now = env.ledger().timestamp();

    positions::positions_of(env, owner)
        .iter()
        .map(|position| position.available(&schedule, now))
        .sum()
}

fn report_positions(env: &Env, owner: &Address) -> PositionsResponse {
    let mut positions = Vec::new(env);
    for position in positions::positions_of(env, owner).iter() {
        positions.push_back(PositionResponse::from(position));
    }

    PositionsResponse { positions }
}
