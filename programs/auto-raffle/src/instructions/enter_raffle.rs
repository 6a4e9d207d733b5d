use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    constants::{RAFFLE_SEED, TREASURY_SEED},
    error::RaffleError,
    state::{Raffle, Treasury},
};

/// Event emitted for every recorded entry
#[event]
pub struct EntryRecorded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The entrant's address
    pub entrant: Pubkey,
    /// Amount paid in lamports
    pub amount: u64,
}

/// Instruction to enter the raffle once
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports paid, at least the entrance fee
///
/// # Security Considerations
/// 1. Payment must cover the entrance fee
/// 2. The raffle must be open, so no entry lands while a draw is pending
/// 3. The whole payment goes to the treasury PDA and is verified there
///
/// # Implementation Notes
/// - Updates state before performing the transfer
/// - Any failure reverts the entry together with the payment
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let entrant = ctx.accounts.entrant.key();
    ctx.accounts.raffle.enter(entrant, amount)?;

    let treasury_info = ctx.accounts.treasury.to_account_info();
    let pre_transfer_balance = treasury_info.lamports();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.entrant.to_account_info(),
                to: treasury_info.clone(),
            },
        ),
        amount,
    )?;

    verify_deposit(pre_transfer_balance, treasury_info.lamports(), amount)?;

    msg!(
        "Entry {} recorded for {}",
        ctx.accounts.raffle.number_of_players(),
        entrant
    );

    emit!(EntryRecorded {
        raffle: ctx.accounts.raffle.key(),
        entrant,
        amount,
    });

    Ok(())
}

/// Checks that the treasury grew by exactly the paid amount.
pub fn verify_deposit(pre_balance: u64, post_balance: u64, amount: u64) -> Result<()> {
    let expected = pre_balance
        .checked_add(amount)
        .ok_or(RaffleError::Overflow)?;
    require!(post_balance == expected, RaffleError::TransferFailed);
    Ok(())
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        seeds = [
            RAFFLE_SEED,
            raffle.authority.as_ref(),
        ],
        bump = raffle.bump,
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// Treasury that receives the entry payment
    #[account(
        mut,
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub entrant: Signer<'info>,

    pub system_program: Program<'info, System>,
}
