use soroban_sdk::{contracttype, Address, Vec};

use crate::storage::{Config, StakePosition};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionResponse {
    pub stake_token: Address,
    pub principal: i128,
    pub total_reward: i128,
    pub withdrawn: i128,
    pub start_time: u64,
}

impl From<StakePosition> for PositionResponse {
    fn from(position: StakePosition) -> Self {
        PositionResponse {
            stake_token: position.stake_token,
            principal: position.principal,
            total_reward: position.total_reward,
            withdrawn: position.withdrawn,
            start_time: position.start_time,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionsResponse {
    /// Positions in the order they were deposited
    pub positions: Vec<PositionResponse>,
}
