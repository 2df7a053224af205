use anchor_lang::prelude::*;

#[event]
pub struct LotteryEnter {
    pub player: Pubkey,
    pub amount: u64,
    pub player_count: u32,
}

/// Picked up by the off-chain oracle, which answers with `fulfill_random_words`.
#[event]
pub struct RandomWordsRequested {
    pub request_id: [u8; 32],
    pub lottery: Pubkey,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
    pub requester: Pubkey,
}

#[event]
pub struct RequestedLotteryWinner {
    pub request_id: [u8; 32],
}

#[event]
pub struct LotteryRecentWinners {
    pub winner: Pubkey,
    pub winner_index: u32,
    pub payout: u64,
    pub request_id: [u8; 32],
}
