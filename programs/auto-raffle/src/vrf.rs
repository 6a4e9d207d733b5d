use anchor_lang::prelude::*;
use arrayref::array_refs;

use crate::{
    error::RaffleError,
    payout::PrizeTransfer,
    state::{PoolSnapshot, Raffle},
};

/// A 256-bit random word as delivered by the coordinator (little-endian).
pub type RandomWord = [u8; 32];

/// Parameters forwarded to the coordinator with every draw request.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RandomWordsRequest {
    /// Gas lane the coordinator should answer on
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

/// Outbound half of the oracle interface.
pub trait RandomnessOracle {
    /// Submits a request and returns the id the coordinator will answer with.
    fn request_random_words(&mut self, request: &RandomWordsRequest) -> Result<u64>;
}

/// Inbound half of the oracle interface, invoked once per outstanding request.
pub trait RandomnessConsumer {
    fn fulfill_random_words<P: PrizeTransfer>(
        &mut self,
        snapshot: &PoolSnapshot,
        request_id: u64,
        random_words: &[RandomWord],
        payout: &mut P,
    ) -> Result<Pubkey>;
}

impl RandomnessConsumer for Raffle {
    fn fulfill_random_words<P: PrizeTransfer>(
        &mut self,
        snapshot: &PoolSnapshot,
        request_id: u64,
        random_words: &[RandomWord],
        payout: &mut P,
    ) -> Result<Pubkey> {
        self.complete_draw(snapshot, request_id, random_words, payout)
    }
}

/// Event observed by the off-chain coordinator to start generating randomness
#[event]
pub struct RandomWordsRequested {
    /// The raffle that will receive the callback
    pub raffle: Pubkey,
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

/// On-chain oracle adapter.
///
/// The coordinator watches the program log for `RandomWordsRequested` and
/// answers by signing `fulfill_random_words` with the same request id.
/// Request ids are sequential per raffle.
pub struct CoordinatorOracle {
    raffle: Pubkey,
    next_request_id: u64,
}

impl CoordinatorOracle {
    pub fn new(raffle: Pubkey, request_counter: u64) -> Result<Self> {
        let next_request_id = request_counter
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(Self {
            raffle,
            next_request_id,
        })
    }
}

impl RandomnessOracle for CoordinatorOracle {
    fn request_random_words(&mut self, request: &RandomWordsRequest) -> Result<u64> {
        let request_id = self.next_request_id;

        emit!(RandomWordsRequested {
            raffle: self.raffle,
            request_id,
            key_hash: request.key_hash,
            subscription_id: request.subscription_id,
            request_confirmations: request.request_confirmations,
            callback_gas_limit: request.callback_gas_limit,
            num_words: request.num_words,
        });

        Ok(request_id)
    }
}

/// Reduces a random word modulo the player count.
///
/// The word is treated as one 256-bit integer, so the result is exactly
/// `word mod player_count` rather than a reduction of a truncated prefix.
pub fn winner_index(word: &RandomWord, player_count: u64) -> Result<u64> {
    require!(player_count > 0, RaffleError::NoPlayers);

    let (limb0, limb1, limb2, limb3) = array_refs![word, 8, 8, 8, 8];
    let modulus = player_count as u128;

    // Horner's rule from the most significant limb down; the remainder stays
    // below 2^64 so the shifted value always fits in a u128.
    let remainder = [limb3, limb2, limb1, limb0]
        .iter()
        .fold(0u128, |remainder, limb| {
            ((remainder << 64) | u64::from_le_bytes(**limb) as u128) % modulus
        });

    Ok(remainder as u64)
}
