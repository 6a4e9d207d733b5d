use anchor_lang::prelude::*;

use crate::{
    automation::{validate_check_data, AutomationCompatible, UpkeepStatus},
    constants::{RAFFLE_SEED, TREASURY_SEED},
    state::{PoolSnapshot, Raffle, Treasury},
};

/// Read-only poll used by the automation network.
///
/// The answer is written to the transaction return data, so the automation
/// node can simulate this instruction without ever landing it. `check_data`
/// is echoed back, so it may be at most `MAX_CHECK_DATA_LEN` bytes.
pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<UpkeepStatus> {
    validate_check_data(&check_data)?;
    let snapshot = PoolSnapshot::capture(&ctx.accounts.treasury.to_account_info())?;
    let status = ctx.accounts.raffle.check_upkeep(&snapshot, &check_data);

    msg!("Upkeep needed: {}", status.upkeep_needed);

    Ok(status)
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [
            RAFFLE_SEED,
            raffle.authority.as_ref(),
        ],
        bump = raffle.bump,
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,
}
