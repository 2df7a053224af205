use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Unauthorized")]
    Unauthorized,

    // -----------------
    // Entry
    // -----------------
    #[msg("Not enough lamports sent to enter the lottery")]
    InsufficientStake,
    #[msg("Lottery is not open")]
    RoundNotOpen,
    #[msg("Lottery is full for this round")]
    LotteryFull,

    // -----------------
    // Upkeep / close-round
    // -----------------
    #[msg("Upkeep not needed")]
    CloseNotEligible,

    // -----------------
    // Fulfillment
    // -----------------
    #[msg("Unknown or stale randomness request")]
    UnknownRequest,
    #[msg("No random words delivered")]
    EmptyRandomWords,
    #[msg("Payout to winner failed")]
    PayoutFailed,

    // -----------------
    // Accessors
    // -----------------
    #[msg("Player index out of range")]
    IndexOutOfRange,

    // -----------------
    // Construction
    // -----------------
    #[msg("Invalid entrance fee")]
    InvalidEntranceFee,
    #[msg("Invalid interval")]
    InvalidInterval,
    #[msg("Invalid callback compute limit")]
    InvalidCallbackLimit,
    #[msg("Invalid number of random words")]
    InvalidNumWords,
    #[msg("VRF coordinator not set")]
    InvalidCoordinator,

    #[msg("Math overflow")]
    MathOverflow,
}
