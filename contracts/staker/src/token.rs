//! Capabilities the staker needs from its collaborator token contracts.

use soroban_sdk::{log, token, Address, Env};

use crate::{error::ContractError, storage::Config};

/// A whitelisted token whose holders can have principal burned by the staker.
pub struct StakeableToken<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> StakeableToken<'a> {
    /// Resolves `token` against the whitelist in `config`.
    pub fn lookup(env: &'a Env, config: &Config, token: &Address) -> Result<Self, ContractError> {
        if !config.is_whitelisted(token) {
            log!(env, "Staker: Deposit: Token {} is not whitelisted", token);
            return Err(ContractError::TokenNotWhitelisted);
        }

        Ok(StakeableToken {
            env,
            client: token::Client::new(env, token),
        })
    }

    pub fn address(&self) -> &Address {
        &self.client.address
    }

    /// Checks that `holder` allowed the staker to burn `amount` and holds it.
    pub fn ensure_burnable(&self, holder: &Address, amount: i128) -> Result<(), ContractError> {
        let spender = self.env.current_contract_address();

        let allowance = self.client.allowance(holder, &spender);
        if allowance < amount {
            log!(
                self.env,
                "Staker: Deposit: Allowance {} is lower than the amount {}",
                allowance,
                amount
            );
            return Err(ContractError::InsufficientAllowance);
        }

        let balance = self.client.balance(holder);
        if balance < amount {
            log!(
                self.env,
                "Staker: Deposit: Balance {} is lower than the amount {}",
                balance,
                amount
            );
            return Err(ContractError::InsufficientBalance);
        }

        Ok(())
    }

    /// Destroys `amount` of `holder`'s balance using the staker's allowance.
    pub fn burn_from(&self, holder: &Address, amount: i128) -> Result<(), ContractError> {
        self.ensure_burnable(holder, amount)?;
        self.client
            .burn_from(&self.env.current_contract_address(), holder, &amount);

        Ok(())
    }
}

/// The token rewards are paid in, held by the staker itself.
pub struct RewardToken<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> RewardToken<'a> {
    pub fn new(env: &'a Env, config: &Config) -> Self {
        RewardToken {
            env,
            client: token::Client::new(env, &config.reward_token),
        }
    }

    /// Reward tokens currently held by the staker.
    pub fn balance(&self) -> i128 {
        self.client.balance(&self.env.current_contract_address())
    }

    pub fn pay(&self, to: &Address, amount: i128) {
        self.client
            .transfer(&self.env.current_contract_address(), to, &amount);
    }
}
