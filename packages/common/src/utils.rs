use soroban_sdk::{contracttype, Address};

/// Pending handover of the admin role.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    /// Last ledger timestamp at which `new_admin` may still accept.
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.time_limit, Some(limit) if now > limit)
    }
}
