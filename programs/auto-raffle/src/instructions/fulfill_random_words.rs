use anchor_lang::prelude::*;

use crate::{
    constants::{RAFFLE_SEED, TREASURY_SEED},
    error::RaffleError,
    payout::TreasuryPayout,
    state::{PoolSnapshot, Raffle, Treasury},
    vrf::RandomnessConsumer,
};

/// Event emitted when a draw completes and the prize is paid
#[event]
pub struct WinnerPicked {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// Lamports paid to the winner
    pub prize: u64,
    /// The request this draw answered
    pub request_id: u64,
}

/// Callback through which the coordinator delivers randomness
///
/// # Security Considerations
/// 1. Only the coordinator stored at initialization may sign
/// 2. The raffle must be waiting on exactly this request id
/// 3. The winner account must be the player drawn from the random word
///
/// # Implementation Notes
/// - The whole treasury balance above rent goes to the winner
/// - A failed payout fails the instruction and the draw stays pending
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();

    let snapshot = PoolSnapshot::capture(&treasury_info)?;
    let mut payout = TreasuryPayout::new(&treasury_info, &winner_info);

    let winner = ctx.accounts.raffle.fulfill_random_words(
        &snapshot,
        request_id,
        &random_words,
        &mut payout,
    )?;

    msg!("Winner {} paid {} lamports", winner, snapshot.balance);

    emit!(WinnerPicked {
        raffle: ctx.accounts.raffle.key(),
        winner,
        prize: snapshot.balance,
        request_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        seeds = [
            RAFFLE_SEED,
            raffle.authority.as_ref(),
        ],
        bump = raffle.bump,
        has_one = coordinator @ RaffleError::OnlyCoordinatorCanFulfill,
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    pub coordinator: Signer<'info>,

    /// The drawn player receiving the prize
    /// CHECK: Compared against the drawn player before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}
