use anchor_lang::prelude::*;

use crate::state::{Raffle, RaffleState};

// Read-only accessors. Values travel back through the transaction return
// data, so clients simulate these instead of sending them.

#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    pub raffle: Box<Account<'info, Raffle>>,
}

pub fn get_entrance_fee(ctx: Context<ViewRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.entrance_fee())
}

pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.player(index)
}

pub fn get_recent_winner(ctx: Context<ViewRaffle>) -> Result<Option<Pubkey>> {
    Ok(ctx.accounts.raffle.recent_winner())
}

pub fn get_raffle_state(ctx: Context<ViewRaffle>) -> Result<RaffleState> {
    Ok(ctx.accounts.raffle.raffle_state())
}

pub fn get_num_words(ctx: Context<ViewRaffle>) -> Result<u32> {
    Ok(ctx.accounts.raffle.num_words())
}

pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.number_of_players())
}

pub fn get_last_timestamp(ctx: Context<ViewRaffle>) -> Result<i64> {
    Ok(ctx.accounts.raffle.last_timestamp())
}

pub fn get_request_confirmations(ctx: Context<ViewRaffle>) -> Result<u16> {
    Ok(ctx.accounts.raffle.request_confirmations())
}

pub fn get_interval(ctx: Context<ViewRaffle>) -> Result<i64> {
    Ok(ctx.accounts.raffle.interval())
}
