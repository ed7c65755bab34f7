use soroban_sdk::contracterror;
use tranche_schedule::ScheduleError;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidMinStake = 700,
    InvalidRewardMultiplier = 701,
    InvalidSchedule = 702,
    EmptyWhitelist = 703,
    DuplicateStakeToken = 704,
    TokenNotWhitelisted = 705,
    BelowMinimumStake = 706,
    InsufficientRewardSupply = 707,
    InsufficientAllowance = 708,
    InsufficientBalance = 709,
    Unauthorized = 710,
    InvariantViolation = 711,
    ContractMathError = 712,
    ConfigNotSet = 713,
    AdminNotSet = 714,
    SameAdmin = 715,
    NoAdminChangeInPlace = 716,
    AdminChangeExpired = 717,
}

impl From<ScheduleError> for ContractError {
    fn from(_: ScheduleError) -> Self {
        ContractError::InvalidSchedule
    }
}
