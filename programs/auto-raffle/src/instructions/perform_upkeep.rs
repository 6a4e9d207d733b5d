use anchor_lang::prelude::*;

use crate::{
    automation::AutomationCompatible,
    constants::{RAFFLE_SEED, TREASURY_SEED},
    state::{PoolSnapshot, Raffle, Treasury},
    vrf::CoordinatorOracle,
};

/// Event emitted when a draw has been requested from the coordinator
#[event]
pub struct DrawRequested {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Id the coordinator will answer with
    pub request_id: u64,
}

/// Instruction that closes entries and requests randomness for a draw
///
/// Anyone may call this; the automation network is expected to, after
/// `check_upkeep` reported work. The due conditions are checked again here.
///
/// # Errors
/// - `UpkeepNotNeeded` if the raffle is not open, the interval has not
///   passed, there are no players or the treasury holds nothing
pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
    let snapshot = PoolSnapshot::capture(&ctx.accounts.treasury.to_account_info())?;
    let raffle_key = ctx.accounts.raffle.key();

    let mut oracle = CoordinatorOracle::new(raffle_key, ctx.accounts.raffle.request_counter)?;
    let request_id = ctx
        .accounts
        .raffle
        .perform_upkeep(&snapshot, &mut oracle, &perform_data)?;

    msg!(
        "Draw requested for {} players, request {}",
        ctx.accounts.raffle.number_of_players(),
        request_id
    );

    emit!(DrawRequested {
        raffle: raffle_key,
        request_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
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
