#![no_std]

use core::cmp::min;

use soroban_sdk::contracttype;

/// Handle schedule errors
#[derive(Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// A tranche has to last at least one second
    // "Tranche duration is zero"
    ZeroTrancheDuration,

    /// At least one tranche is needed to release the reward
    // "Tranche count is zero"
    ZeroTrancheCount,

    /// cliff + tranche_count * tranche_duration does not fit into a timestamp
    // "Schedule is too long"
    ScheduleTooLong,
}

/// Step release schedule: nothing is released until the cliff has passed, after that
/// the reward is released in `tranche_count` equal steps, one every `tranche_duration`
/// seconds. The last step releases whatever the truncated steps left behind.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrancheSchedule {
    /// Seconds after the start during which nothing vests
    pub cliff_duration: u64,
    /// Seconds between two consecutive tranches
    pub tranche_duration: u64,
    /// Number of tranches the reward is divided into
    pub tranche_count: u32,
}

impl TrancheSchedule {
    pub fn new(cliff_duration: u64, tranche_duration: u64, tranche_count: u32) -> Self {
        TrancheSchedule {
            cliff_duration,
            tranche_duration,
            tranche_count,
        }
    }

    /// general sanity checks on the schedule parameters
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.tranche_duration == 0 {
            return Err(ScheduleError::ZeroTrancheDuration);
        }
        if self.tranche_count == 0 {
            return Err(ScheduleError::ZeroTrancheCount);
        }
        self.fully_vested_after()
            .map(|_| ())
            .ok_or(ScheduleError::ScheduleTooLong)
    }

    /// Seconds after the start at which the whole reward is released.
    pub fn fully_vested_after(&self) -> Option<u64> {
        self.tranche_duration
            .checked_mul(self.tranche_count as u64)?
            .checked_add(self.cliff_duration)
    }

    /// Number of tranches unlocked at `now` for something started at `start_time`,
    /// capped at `tranche_count`.
    pub fn tranches_unlocked(&self, start_time: u64, now: u64) -> u32 {
        let elapsed = now.saturating_sub(start_time);
        if elapsed < self.cliff_duration {
            return 0;
        }

        match (elapsed - self.cliff_duration).checked_div(self.tranche_duration) {
            Some(tranches) => min(tranches, self.tranche_count as u64) as u32,
            // a zero length tranche releases everything as soon as the cliff is over
            None => self.tranche_count,
        }
    }

    /// Amount of `total_reward` released at `now`.
    ///
    /// Partial releases are a multiple of the truncated per tranche unit
    /// `total_reward / tranche_count`, never `total_reward * tranches / tranche_count`.
    /// Once every tranche is unlocked the full `total_reward` is returned, so the
    /// truncation remainder is not lost.
    pub fn vested_amount(&self, total_reward: i128, start_time: u64, now: u64) -> i128 {
        if now.saturating_sub(start_time) < self.cliff_duration {
            return 0;
        }

        let tranches = self.tranches_unlocked(start_time, now);
        if tranches == self.tranche_count {
            return total_reward;
        }

        let unit = total_reward / self.tranche_count as i128;
        unit * tranches as i128
    }
}
