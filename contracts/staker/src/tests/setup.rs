use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env,
};

use crate::contract::{Staker, StakerClient};
use tranche_schedule::TrancheSchedule;

pub const ONE_DAY: u64 = 86_400;
/// Amounts carry 18 decimals so the results line up with an EVM deployment.
pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000;
pub const MIN_STAKE: i128 = TOKEN_UNIT;
pub const REWARD_MULTIPLIER_BPS: i64 = 12_500;

pub fn reference_schedule() -> TrancheSchedule {
    TrancheSchedule::new(90 * ONE_DAY, 30 * ONE_DAY, 3)
}

pub fn tokens(amount: i128) -> i128 {
    amount * TOKEN_UNIT
}

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let address = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    (
        token::Client::new(env, &address),
        token::StellarAssetClient::new(env, &address),
    )
}

pub struct StakerSetup<'a> {
    pub env: Env,
    pub admin: Address,
    pub staker: StakerClient<'a>,
    pub reward_token: token::Client<'a>,
    reward_minter: token::StellarAssetClient<'a>,
    pub stake_token: token::Client<'a>,
    stake_minter: token::StellarAssetClient<'a>,
    pub other_stake_token: token::Client<'a>,
    other_stake_minter: token::StellarAssetClient<'a>,
}

impl<'a> StakerSetup<'a> {
    /// Reward token plus two whitelisted stake tokens, the staker holds no rewards yet.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.cost_estimate().budget().reset_unlimited();

        let admin = Address::generate(&env);
        let (reward_token, reward_minter) = deploy_token_contract(&env, &admin);
        let (stake_token, stake_minter) = deploy_token_contract(&env, &admin);
        let (other_stake_token, other_stake_minter) = deploy_token_contract(&env, &admin);

        let staker = StakerClient::new(
            &env,
            &env.register(
                Staker,
                (
                    &admin,
                    &reward_token.address,
                    vec![
                        &env,
                        stake_token.address.clone(),
                        other_stake_token.address.clone(),
                    ],
                    MIN_STAKE,
                    REWARD_MULTIPLIER_BPS,
                    reference_schedule(),
                ),
            ),
        );

        StakerSetup {
            env,
            admin,
            staker,
            reward_token,
            reward_minter,
            stake_token,
            stake_minter,
            other_stake_token,
            other_stake_minter,
        }
    }

    /// Sends reward tokens to the staker.
    pub fn fund_rewards(&self, amount: i128) {
        self.reward_minter.mint(&self.staker.address, &amount);
    }

    /// Gives `user` stake tokens of the first whitelisted kind and approves the staker.
    pub fn give_stake(&self, user: &Address, amount: i128) {
        self.stake_minter.mint(user, &amount);
        self.approve(&self.stake_token, user, amount);
    }

    /// Same as `give_stake` for the second whitelisted kind.
    pub fn give_other_stake(&self, user: &Address, amount: i128) {
        self.other_stake_minter.mint(user, &amount);
        self.approve(&self.other_stake_token, user, amount);
    }

    pub fn approve(&self, token: &token::Client, user: &Address, amount: i128) {
        let allowance = token.allowance(user, &self.staker.address);
        let expiration_ledger = self.env.ledger().sequence() + 1_000;
        token.approve(
            user,
            &self.staker.address,
            &(allowance + amount),
            &expiration_ledger,
        );
    }

    pub fn set_day(&self, day: u64) {
        self.env.ledger().set_timestamp(day * ONE_DAY);
    }

    /// Liability recomputed from every position of `depositors` must match the
    /// running counter, and the staker must hold at least that much.
    pub fn assert_books_balance(&self, depositors: &[&Address]) {
        let mut scanned = 0i128;
        for depositor in depositors {
            for position in self.staker.query_positions(depositor).positions.iter() {
                assert!(position.withdrawn >= 0);
                assert!(position.withdrawn <= position.total_reward);
                scanned += position.total_reward - position.withdrawn;
            }
        }

        let liability = self.staker.query_current_liability();
        assert_eq!(liability, scanned);
        assert!(self.reward_token.balance(&self.staker.address) >= liability);
    }
}
