#![no_std]
mod contract;
mod error;
mod liability;
mod msg;
mod positions;
mod storage;
mod token;

pub use contract::{Staker, StakerClient};
pub use error::ContractError;
pub use msg::{ConfigResponse, PositionResponse, PositionsResponse};
pub use storage::{Config, StakePosition};
pub use tranche_schedule::TrancheSchedule;
