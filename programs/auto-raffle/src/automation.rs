use anchor_lang::prelude::*;

use crate::{
    constants::MAX_CHECK_DATA_LEN,
    error::RaffleError,
    state::{PoolSnapshot, Raffle},
    vrf::RandomnessOracle,
};

/// Answer returned to the automation network when it polls for work.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    /// Opaque bytes handed back to `perform_upkeep`
    pub perform_data: Vec<u8>,
}

/// Rejects check data too long to be echoed back in the upkeep answer.
pub fn validate_check_data(check_data: &[u8]) -> Result<()> {
    require!(
        check_data.len() <= MAX_CHECK_DATA_LEN,
        RaffleError::CheckDataTooLarge
    );
    Ok(())
}

/// Interface the automation network drives.
///
/// `check_upkeep` is polled freely and must not change state.
/// `perform_upkeep` may be called with stale information and re-validates.
pub trait AutomationCompatible {
    fn check_upkeep(&self, snapshot: &PoolSnapshot, check_data: &[u8]) -> UpkeepStatus;

    fn perform_upkeep<O: RandomnessOracle>(
        &mut self,
        snapshot: &PoolSnapshot,
        oracle: &mut O,
        perform_data: &[u8],
    ) -> Result<u64>;
}

impl AutomationCompatible for Raffle {
    fn check_upkeep(&self, snapshot: &PoolSnapshot, check_data: &[u8]) -> UpkeepStatus {
        UpkeepStatus {
            upkeep_needed: self.upkeep_needed(snapshot),
            perform_data: check_data.to_vec(),
        }
    }

    fn perform_upkeep<O: RandomnessOracle>(
        &mut self,
        snapshot: &PoolSnapshot,
        oracle: &mut O,
        _perform_data: &[u8],
    ) -> Result<u64> {
        self.request_draw(snapshot, oracle)
    }
}
