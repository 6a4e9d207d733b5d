use anchor_lang::prelude::*;

use crate::{
    constants::{
        MAX_CALLBACK_GAS_LIMIT, MAX_PLAYERS, MIN_CALLBACK_GAS_LIMIT, NUM_WORDS,
        REQUEST_CONFIRMATIONS,
    },
    error::RaffleError,
    payout::PrizeTransfer,
    state::Treasury,
    vrf::{winner_index, RandomWord, RandomWordsRequest, RandomnessOracle},
};

// Space calculation:
// 8 (discriminator) +
// 32 (authority) +
// 32 (coordinator) +
// 32 (treasury) +
// 8 (entrance_fee) +
// 8 (interval) +
// 32 (key_hash) +
// 8 (subscription_id) +
// 4 (callback_gas_limit) +
// 1 (raffle_state) +
// 8 (last_timestamp) +
// 33 (recent_winner: Option<Pubkey>) +
// 9 (pending_request_id: Option<u64>) +
// 8 (request_counter) +
// 1 (bump) +
// 4 + 32 * MAX_PLAYERS (players) =
// 228 + 6400 = 6628 total bytes
pub const RAFFLE_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 32 + 8 + 8 + 32 + 8 + 4 + 1 + 8 + 33 + 9 + 8 + 1 + 4 + 32 * MAX_PLAYERS;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    Open = 0,
    Calculating = 1,
}

/// Configuration supplied once when the raffle is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeRaffleParams {
    /// Minimum payment in lamports for one entry
    pub entrance_fee: u64,
    /// Seconds that must pass between draws
    pub interval: i64,
    /// Coordinator gas lane
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
}

/// What the host knows at the moment an instruction runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Current unix timestamp
    pub now: i64,
    /// Lamports available for the prize, excluding rent
    pub balance: u64,
}

impl PoolSnapshot {
    /// Reads the clock and the spendable balance of the treasury.
    pub fn capture(treasury: &AccountInfo) -> Result<Self> {
        Ok(Self {
            now: Clock::get()?.unix_timestamp,
            balance: Treasury::prize_pool(treasury.lamports(), &Rent::get()?),
        })
    }
}

#[account]
#[derive(Debug)]
pub struct Raffle {
    pub authority: Pubkey,
    pub coordinator: Pubkey,
    pub treasury: Pubkey,
    pub entrance_fee: u64,
    pub interval: i64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub raffle_state: RaffleState,
    pub last_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    pub pending_request_id: Option<u64>,
    pub request_counter: u64,
    pub bump: u8,
    pub players: Vec<Pubkey>,
}

impl Raffle {
    /// Builds an open raffle with no players.
    ///
    /// # Errors
    /// - `EntranceFeeTooLow` if the fee is zero
    /// - `InvalidInterval` if the interval is not positive
    /// - `InvalidCallbackGasLimit` if the callback budget is outside coordinator bounds
    pub fn new(
        authority: Pubkey,
        coordinator: Pubkey,
        treasury: Pubkey,
        params: &InitializeRaffleParams,
        bump: u8,
        now: i64,
    ) -> Result<Self> {
        require!(params.entrance_fee > 0, RaffleError::EntranceFeeTooLow);
        require!(params.interval > 0, RaffleError::InvalidInterval);
        require!(
            (MIN_CALLBACK_GAS_LIMIT..=MAX_CALLBACK_GAS_LIMIT).contains(&params.callback_gas_limit),
            RaffleError::InvalidCallbackGasLimit
        );

        Ok(Self {
            authority,
            coordinator,
            treasury,
            entrance_fee: params.entrance_fee,
            interval: params.interval,
            key_hash: params.key_hash,
            subscription_id: params.subscription_id,
            callback_gas_limit: params.callback_gas_limit,
            raffle_state: RaffleState::Open,
            last_timestamp: now,
            recent_winner: None,
            pending_request_id: None,
            request_counter: 0,
            bump,
            players: Vec::new(),
        })
    }

    /// Records one entry for `entrant`.
    ///
    /// The same key may enter any number of times; every entry is a separate
    /// chance to win.
    pub fn enter(&mut self, entrant: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.entrance_fee,
            RaffleError::InsufficientEntryFee
        );
        require!(
            self.raffle_state == RaffleState::Open,
            RaffleError::LotteryNotOpen
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.players.push(entrant);
        Ok(())
    }

    /// The due predicate polled by the automation trigger. Never mutates.
    pub fn upkeep_needed(&self, snapshot: &PoolSnapshot) -> bool {
        let is_open = self.raffle_state == RaffleState::Open;
        let time_passed = snapshot.now.saturating_sub(self.last_timestamp) > self.interval;
        let has_players = !self.players.is_empty();
        let has_balance = snapshot.balance > 0;

        is_open && time_passed && has_players && has_balance
    }

    pub fn randomness_request(&self) -> RandomWordsRequest {
        RandomWordsRequest {
            key_hash: self.key_hash,
            subscription_id: self.subscription_id,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit: self.callback_gas_limit,
            num_words: NUM_WORDS,
        }
    }

    /// Closes entries and asks the oracle for a random word.
    ///
    /// The due predicate is evaluated here again; whatever the caller
    /// observed earlier is not trusted.
    pub fn request_draw<O: RandomnessOracle>(
        &mut self,
        snapshot: &PoolSnapshot,
        oracle: &mut O,
    ) -> Result<u64> {
        if !self.upkeep_needed(snapshot) {
            msg!(
                "Upkeep not needed: balance={}, players={}, state={:?}",
                snapshot.balance,
                self.players.len(),
                self.raffle_state
            );
            return err!(RaffleError::UpkeepNotNeeded);
        }

        let request_counter = self
            .request_counter
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        let request_id = oracle.request_random_words(&self.randomness_request())?;

        self.raffle_state = RaffleState::Calculating;
        self.pending_request_id = Some(request_id);
        self.request_counter = request_counter;

        Ok(request_id)
    }

    /// Picks the winner from the delivered word, reopens the raffle and pays
    /// the whole pool to the winner.
    ///
    /// State is reset before the transfer is attempted. If the transfer
    /// fails the reset is undone and the raffle stays `Calculating` with its
    /// players intact, so the draw never completes without a payout.
    pub fn complete_draw<P: PrizeTransfer>(
        &mut self,
        snapshot: &PoolSnapshot,
        request_id: u64,
        random_words: &[RandomWord],
        payout: &mut P,
    ) -> Result<Pubkey> {
        require!(
            self.raffle_state == RaffleState::Calculating,
            RaffleError::RaffleNotCalculating
        );
        require!(
            self.pending_request_id == Some(request_id),
            RaffleError::UnknownRequest
        );
        require!(
            random_words.len() == NUM_WORDS as usize,
            RaffleError::InvalidRandomWords
        );

        let index = winner_index(&random_words[0], self.players.len() as u64)?;
        let winner = self.players[index as usize];

        let previous_winner = self.recent_winner.replace(winner);
        let previous_timestamp = std::mem::replace(&mut self.last_timestamp, snapshot.now);
        let players = std::mem::take(&mut self.players);
        self.raffle_state = RaffleState::Open;
        self.pending_request_id = None;

        if let Err(error) = payout.transfer(&winner, snapshot.balance) {
            msg!("Payout of {} lamports to {} failed", snapshot.balance, winner);
            self.recent_winner = previous_winner;
            self.last_timestamp = previous_timestamp;
            self.players = players;
            self.raffle_state = RaffleState::Calculating;
            self.pending_request_id = Some(request_id);
            return Err(error);
        }

        Ok(winner)
    }

    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.players.get(index))
            .copied()
            .ok_or_else(|| RaffleError::IndexOutOfRange.into())
    }

    pub fn recent_winner(&self) -> Option<Pubkey> {
        self.recent_winner
    }

    pub fn raffle_state(&self) -> RaffleState {
        self.raffle_state
    }

    pub fn num_words(&self) -> u32 {
        NUM_WORDS
    }

    pub fn number_of_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    pub fn request_confirmations(&self) -> u16 {
        REQUEST_CONFIRMATIONS
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE: u64 = 100;
    const INTERVAL: i64 = 30;
    const START: i64 = 1_700_000_000;

    struct FixedOracle(u64);

    impl RandomnessOracle for FixedOracle {
        fn request_random_words(&mut self, _request: &RandomWordsRequest) -> Result<u64> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct RecordingPayout {
        fail: bool,
        paid: Vec<(Pubkey, u64)>,
    }

    impl PrizeTransfer for RecordingPayout {
        fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            if self.fail {
                return err!(RaffleError::PayoutTransferFailed);
            }
            self.paid.push((*to, amount));
            Ok(())
        }
    }

    fn params() -> InitializeRaffleParams {
        InitializeRaffleParams {
            entrance_fee: FEE,
            interval: INTERVAL,
            key_hash: [7; 32],
            subscription_id: 42,
            callback_gas_limit: 500_000,
        }
    }

    fn raffle() -> Raffle {
        Raffle::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &params(),
            255,
            START,
        )
        .unwrap()
    }

    fn due_snapshot(raffle: &Raffle) -> PoolSnapshot {
        PoolSnapshot {
            now: START + INTERVAL + 1,
            balance: FEE * raffle.players.len() as u64,
        }
    }

    fn word(value: u64) -> RandomWord {
        let mut word = [0u8; 32];
        word[..8].copy_from_slice(&value.to_le_bytes());
        word
    }

    fn code_of(error: anchor_lang::error::Error) -> u32 {
        match error {
            anchor_lang::error::Error::AnchorError(error) => error.error_code_number,
            anchor_lang::error::Error::ProgramError(error) => {
                panic!("unexpected program error: {error:?}")
            }
        }
    }

    fn assert_raffle_error<T: std::fmt::Debug>(result: Result<T>, expected: RaffleError) {
        let error = result.expect_err("expected the call to fail");
        assert_eq!(code_of(error), u32::from(expected));
    }

    #[test]
    fn new_raffle_starts_open_and_empty() {
        let raffle = raffle();
        assert_eq!(raffle.raffle_state(), RaffleState::Open);
        assert_eq!(raffle.number_of_players(), 0);
        assert_eq!(raffle.last_timestamp(), START);
        assert_eq!(raffle.recent_winner(), None);
        assert_eq!(raffle.pending_request_id, None);
        assert_eq!(raffle.entrance_fee(), FEE);
        assert_eq!(raffle.interval(), INTERVAL);
        assert_eq!(raffle.num_words(), 1);
        assert_eq!(raffle.request_confirmations(), 3);
    }

    #[test]
    fn new_raffle_validates_config() {
        let key = Pubkey::new_unique();

        let mut zero_fee = params();
        zero_fee.entrance_fee = 0;
        assert_raffle_error(
            Raffle::new(key, key, key, &zero_fee, 0, START),
            RaffleError::EntranceFeeTooLow,
        );

        let mut zero_interval = params();
        zero_interval.interval = 0;
        assert_raffle_error(
            Raffle::new(key, key, key, &zero_interval, 0, START),
            RaffleError::InvalidInterval,
        );

        for gas in [MIN_CALLBACK_GAS_LIMIT - 1, MAX_CALLBACK_GAS_LIMIT + 1] {
            let mut bad_gas = params();
            bad_gas.callback_gas_limit = gas;
            assert_raffle_error(
                Raffle::new(key, key, key, &bad_gas, 0, START),
                RaffleError::InvalidCallbackGasLimit,
            );
        }
    }

    #[test]
    fn entries_keep_order_and_allow_duplicates() {
        let mut raffle = raffle();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let entrants = [alice, bob, alice, alice, bob];

        for entrant in entrants {
            raffle.enter(entrant, FEE).unwrap();
        }

        assert_eq!(raffle.number_of_players(), entrants.len() as u64);
        for (index, entrant) in entrants.iter().enumerate() {
            assert_eq!(raffle.player(index as u64).unwrap(), *entrant);
        }
    }

    #[test]
    fn overpaying_is_accepted() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE * 3).unwrap();
        assert_eq!(raffle.number_of_players(), 1);
    }

    #[test]
    fn underpaying_is_rejected_without_recording() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();

        assert_raffle_error(
            raffle.enter(Pubkey::new_unique(), FEE - 1),
            RaffleError::InsufficientEntryFee,
        );
        assert_raffle_error(
            raffle.enter(Pubkey::new_unique(), 0),
            RaffleError::InsufficientEntryFee,
        );
        assert_eq!(raffle.number_of_players(), 1);
    }

    #[test]
    fn entries_are_refused_while_calculating() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let snapshot = due_snapshot(&raffle);
        raffle.request_draw(&snapshot, &mut FixedOracle(1)).unwrap();

        assert_raffle_error(
            raffle.enter(Pubkey::new_unique(), FEE),
            RaffleError::LotteryNotOpen,
        );
        assert_eq!(raffle.number_of_players(), 1);
    }

    #[test]
    fn full_raffle_refuses_entries() {
        let mut raffle = raffle();
        for _ in 0..MAX_PLAYERS {
            raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        }

        assert_raffle_error(
            raffle.enter(Pubkey::new_unique(), FEE),
            RaffleError::RaffleFull,
        );
        assert_eq!(raffle.number_of_players(), MAX_PLAYERS as u64);
    }

    #[test]
    fn upkeep_needed_only_when_all_conditions_hold() {
        for mask in 0u8..16 {
            let is_open = mask & 0b0001 != 0;
            let time_passed = mask & 0b0010 != 0;
            let has_players = mask & 0b0100 != 0;
            let has_balance = mask & 0b1000 != 0;

            let mut raffle = raffle();
            if has_players {
                raffle.enter(Pubkey::new_unique(), FEE).unwrap();
            }
            if !is_open {
                raffle.raffle_state = RaffleState::Calculating;
            }
            let snapshot = PoolSnapshot {
                now: if time_passed { START + INTERVAL + 1 } else { START + INTERVAL },
                balance: if has_balance { FEE } else { 0 },
            };

            let before = raffle.clone();
            let expected = is_open && time_passed && has_players && has_balance;
            assert_eq!(raffle.upkeep_needed(&snapshot), expected, "mask {mask:04b}");
            // polling twice answers the same and changes nothing
            assert_eq!(raffle.upkeep_needed(&snapshot), expected, "mask {mask:04b}");
            assert_eq!(raffle.players, before.players);
            assert_eq!(raffle.raffle_state, before.raffle_state);
        }
    }

    #[test]
    fn request_draw_follows_the_due_predicate() {
        let mut raffle = raffle();
        let early = PoolSnapshot {
            now: START + 1,
            balance: 0,
        };
        assert_raffle_error(
            raffle.request_draw(&early, &mut FixedOracle(9)),
            RaffleError::UpkeepNotNeeded,
        );

        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let not_yet = PoolSnapshot {
            now: START + INTERVAL,
            balance: FEE,
        };
        assert_raffle_error(
            raffle.request_draw(&not_yet, &mut FixedOracle(9)),
            RaffleError::UpkeepNotNeeded,
        );
        assert_eq!(raffle.raffle_state(), RaffleState::Open);
        assert_eq!(raffle.pending_request_id, None);

        let snapshot = due_snapshot(&raffle);
        let request_id = raffle.request_draw(&snapshot, &mut FixedOracle(9)).unwrap();
        assert_eq!(request_id, 9);
        assert_eq!(raffle.raffle_state(), RaffleState::Calculating);
        assert_eq!(raffle.pending_request_id, Some(9));
        assert_eq!(raffle.request_counter, 1);

        assert_raffle_error(
            raffle.request_draw(&snapshot, &mut FixedOracle(10)),
            RaffleError::UpkeepNotNeeded,
        );
        assert_eq!(raffle.pending_request_id, Some(9));
    }

    #[test]
    fn request_carries_configured_parameters() {
        let request = raffle().randomness_request();
        assert_eq!(request.key_hash, [7; 32]);
        assert_eq!(request.subscription_id, 42);
        assert_eq!(request.callback_gas_limit, 500_000);
        assert_eq!(request.request_confirmations, REQUEST_CONFIRMATIONS);
        assert_eq!(request.num_words, NUM_WORDS);
    }

    #[test]
    fn fulfillment_picks_word_mod_player_count() {
        for (player_count, random) in [(1u64, 0u64), (3, 7), (5, 5), (7, 1_000_003), (200, u64::MAX)] {
            let mut raffle = raffle();
            let players: Vec<Pubkey> = (0..player_count).map(|_| Pubkey::new_unique()).collect();
            for player in &players {
                raffle.enter(*player, FEE).unwrap();
            }
            let snapshot = due_snapshot(&raffle);
            let request_id = raffle.request_draw(&snapshot, &mut FixedOracle(1)).unwrap();

            let mut payout = RecordingPayout::default();
            let winner = raffle
                .complete_draw(&snapshot, request_id, &[word(random)], &mut payout)
                .unwrap();

            let expected = players[(random % player_count) as usize];
            assert_eq!(winner, expected);
            assert_eq!(raffle.recent_winner(), Some(expected));
            assert_eq!(raffle.number_of_players(), 0);
            assert_eq!(raffle.raffle_state(), RaffleState::Open);
            assert_eq!(raffle.pending_request_id, None);
            assert_eq!(raffle.last_timestamp(), snapshot.now);
            assert_eq!(payout.paid, vec![(expected, snapshot.balance)]);
        }
    }

    #[test]
    fn second_fulfillment_is_rejected() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let snapshot = due_snapshot(&raffle);
        let request_id = raffle.request_draw(&snapshot, &mut FixedOracle(3)).unwrap();

        let mut payout = RecordingPayout::default();
        raffle
            .complete_draw(&snapshot, request_id, &[word(0)], &mut payout)
            .unwrap();

        assert_raffle_error(
            raffle.complete_draw(&snapshot, request_id, &[word(0)], &mut payout),
            RaffleError::RaffleNotCalculating,
        );
        assert_eq!(payout.paid.len(), 1);
    }

    #[test]
    fn fulfillment_rejects_foreign_request_and_bad_word_count() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let snapshot = due_snapshot(&raffle);
        let request_id = raffle.request_draw(&snapshot, &mut FixedOracle(3)).unwrap();
        let mut payout = RecordingPayout::default();

        assert_raffle_error(
            raffle.complete_draw(&snapshot, request_id + 1, &[word(0)], &mut payout),
            RaffleError::UnknownRequest,
        );
        assert_raffle_error(
            raffle.complete_draw(&snapshot, request_id, &[], &mut payout),
            RaffleError::InvalidRandomWords,
        );
        assert_raffle_error(
            raffle.complete_draw(&snapshot, request_id, &[word(0), word(1)], &mut payout),
            RaffleError::InvalidRandomWords,
        );
        assert_eq!(raffle.raffle_state(), RaffleState::Calculating);
        assert!(payout.paid.is_empty());
    }

    #[test]
    fn failed_payout_rolls_back_the_draw() {
        let mut raffle = raffle();
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for player in &players {
            raffle.enter(*player, FEE).unwrap();
        }
        let snapshot = due_snapshot(&raffle);
        let request_id = raffle.request_draw(&snapshot, &mut FixedOracle(3)).unwrap();

        let mut payout = RecordingPayout {
            fail: true,
            ..Default::default()
        };
        assert_raffle_error(
            raffle.complete_draw(&snapshot, request_id, &[word(7)], &mut payout),
            RaffleError::PayoutTransferFailed,
        );

        assert_eq!(raffle.raffle_state(), RaffleState::Calculating);
        assert_eq!(raffle.pending_request_id, Some(request_id));
        assert_eq!(raffle.players, players);
        assert_eq!(raffle.recent_winner(), None);
        assert_eq!(raffle.last_timestamp(), START);
    }

    #[test]
    fn player_lookup_out_of_range() {
        let mut raffle = raffle();
        assert_raffle_error(raffle.player(0), RaffleError::IndexOutOfRange);

        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        assert!(raffle.player(0).is_ok());
        assert_raffle_error(raffle.player(1), RaffleError::IndexOutOfRange);
        assert_raffle_error(raffle.player(u64::MAX), RaffleError::IndexOutOfRange);
    }
}
