use anchor_lang::prelude::*;

use crate::error::RaffleError;

/// Settlement primitive used to pay out the prize pool.
///
/// A transfer either moves the full amount or fails without side effects.
pub trait PrizeTransfer {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Pays the winner straight out of the program-owned treasury PDA.
pub struct TreasuryPayout<'a, 'info> {
    treasury: &'a AccountInfo<'info>,
    winner: &'a AccountInfo<'info>,
}

impl<'a, 'info> TreasuryPayout<'a, 'info> {
    pub fn new(treasury: &'a AccountInfo<'info>, winner: &'a AccountInfo<'info>) -> Self {
        Self { treasury, winner }
    }
}

impl PrizeTransfer for TreasuryPayout<'_, '_> {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*self.winner.key, *to, RaffleError::WinnerAccountMismatch);

        // Direct lamport moves only work because the treasury is owned by
        // this program.
        self.treasury
            .sub_lamports(amount)
            .map_err(|_| RaffleError::PayoutTransferFailed)?;
        self.winner
            .add_lamports(amount)
            .map_err(|_| RaffleError::PayoutTransferFailed)?;

        Ok(())
    }
}
