use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Payment does not cover the entrance fee")]
    InsufficientEntryFee,
    #[msg("Raffle is not open for entries")]
    LotteryNotOpen,
    #[msg("Raffle already holds the maximum number of players")]
    RaffleFull,
    #[msg("A draw is not due yet")]
    UpkeepNotNeeded,
    #[msg("Raffle is not waiting for randomness")]
    RaffleNotCalculating,
    #[msg("Randomness response does not match the pending request")]
    UnknownRequest,
    #[msg("Expected exactly one random word")]
    InvalidRandomWords,
    #[msg("Cannot pick a winner without players")]
    NoPlayers,
    #[msg("Only the configured coordinator can deliver randomness")]
    OnlyCoordinatorCanFulfill,
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Prize transfer to the winner failed")]
    PayoutTransferFailed,
    #[msg("Entry fee transfer failed")]
    TransferFailed,
    #[msg("Player index out of range")]
    IndexOutOfRange,
    #[msg("Entrance fee must be greater than zero")]
    EntranceFeeTooLow,
    #[msg("Draw interval must be greater than zero")]
    InvalidInterval,
    #[msg("Callback gas limit is outside the coordinator bounds")]
    InvalidCallbackGasLimit,
    #[msg("Check data does not fit in the upkeep answer")]
    CheckDataTooLarge,
}
