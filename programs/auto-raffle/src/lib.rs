use anchor_lang::prelude::*;
use automation::UpkeepStatus;
use instructions::*;
use state::{InitializeRaffleParams, RaffleState};

pub mod automation;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod payout;
pub mod state;
pub mod vrf;

declare_id!("6ADHKzTz317JcdaEznPKt3wjncm7s3azh9HaTKzzmRuz");

#[program]
pub mod auto_raffle {
    use super::*;

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        params: InitializeRaffleParams,
    ) -> Result<()> {
        instructions::initialize_raffle::initialize_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<UpkeepStatus> {
        instructions::check_upkeep::check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn get_entrance_fee(ctx: Context<ViewRaffle>) -> Result<u64> {
        instructions::views::get_entrance_fee(ctx)
    }

    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        instructions::views::get_player(ctx, index)
    }

    pub fn get_recent_winner(ctx: Context<ViewRaffle>) -> Result<Option<Pubkey>> {
        instructions::views::get_recent_winner(ctx)
    }

    pub fn get_raffle_state(ctx: Context<ViewRaffle>) -> Result<RaffleState> {
        instructions::views::get_raffle_state(ctx)
    }

    pub fn get_num_words(ctx: Context<ViewRaffle>) -> Result<u32> {
        instructions::views::get_num_words(ctx)
    }

    pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
        instructions::views::get_number_of_players(ctx)
    }

    pub fn get_last_timestamp(ctx: Context<ViewRaffle>) -> Result<i64> {
        instructions::views::get_last_timestamp(ctx)
    }

    pub fn get_request_confirmations(ctx: Context<ViewRaffle>) -> Result<u16> {
        instructions::views::get_request_confirmations(ctx)
    }

    pub fn get_interval(ctx: Context<ViewRaffle>) -> Result<i64> {
        instructions::views::get_interval(ctx)
    }
}
