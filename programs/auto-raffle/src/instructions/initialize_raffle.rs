use anchor_lang::prelude::*;

use crate::{
    constants::{RAFFLE_SEED, TREASURY_SEED},
    state::{InitializeRaffleParams, Raffle, Treasury, RAFFLE_ACCOUNT_SIZE, TREASURY_ACCOUNT_SIZE},
};

/// Event emitted when a raffle is created
#[event]
pub struct RaffleInitialized {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// Key allowed to deliver randomness
    pub coordinator: Pubkey,
    /// Entrance fee in lamports
    pub entrance_fee: u64,
    /// Seconds between draws
    pub interval: i64,
    /// When the raffle was created
    pub creation_time: i64,
}

/// Instruction to create the raffle and its treasury
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `params` - Entrance fee, draw interval and coordinator request parameters
///
/// # Account Validations
/// * Raffle - New PDA with seeds ["raffle", authority]
/// * Treasury - New PDA with seeds ["treasury", raffle_key]
/// * Coordinator - Stored as the only key allowed to fulfill draws
///
/// # Implementation Notes
/// - Configuration is frozen here and never updated afterwards
/// - The first draw interval starts at creation time
pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    params: InitializeRaffleParams,
) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    let raffle = Raffle::new(
        ctx.accounts.authority.key(),
        ctx.accounts.coordinator.key(),
        ctx.accounts.treasury.key(),
        &params,
        ctx.bumps.raffle,
        current_time,
    )?;
    ctx.accounts.raffle.set_inner(raffle);

    ctx.accounts.treasury.raffle = ctx.accounts.raffle.key();
    ctx.accounts.treasury.bump = ctx.bumps.treasury;

    msg!(
        "Raffle {} open, entrance fee {} lamports",
        ctx.accounts.raffle.key(),
        params.entrance_fee
    );

    emit!(RaffleInitialized {
        raffle: ctx.accounts.raffle.key(),
        coordinator: ctx.accounts.coordinator.key(),
        entrance_fee: params.entrance_fee,
        interval: params.interval,
        creation_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = authority,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            RAFFLE_SEED,
            authority.key().as_ref(),
        ],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        init,
        payer = authority,
        space = TREASURY_ACCOUNT_SIZE,
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// The randomness coordinator's signing key
    /// CHECK: Only stored. Fulfillment requires this key to sign.
    pub coordinator: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
