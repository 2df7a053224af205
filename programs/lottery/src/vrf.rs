use anchor_lang::prelude::*;

use crate::{
    errors::LotteryError,
    events::RandomWordsRequested,
    state::{Config, Lottery},
    utils::derive_request_id,
};

/// Fixed request parameters taken from `Config`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomWordsRequest {
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
}

impl From<&Config> for RandomWordsRequest {
    fn from(cfg: &Config) -> Self {
        Self {
            key_hash: cfg.key_hash,
            subscription_id: cfg.subscription_id,
            request_confirmations: cfg.request_confirmations,
            callback_compute_limit: cfg.callback_compute_limit,
            num_words: cfg.num_words,
        }
    }
}

/// Issues one request to the oracle and returns its identifier.
/// The nonce only moves forward, so identifiers never repeat for a lottery.
pub fn request_random_words(
    lottery: &mut Lottery,
    lottery_key: &Pubkey,
    request: &RandomWordsRequest,
    requester: Pubkey,
) -> Result<[u8; 32]> {
    let nonce = lottery.request_nonce;
    let request_id = derive_request_id(lottery_key, &request.key_hash, request.subscription_id, nonce);

    lottery.request_nonce = nonce.checked_add(1).ok_or(LotteryError::MathOverflow)?;

    emit!(RandomWordsRequested {
        request_id,
        lottery: *lottery_key,
        key_hash: request.key_hash,
        subscription_id: request.subscription_id,
        request_confirmations: request.request_confirmations,
        callback_compute_limit: request.callback_compute_limit,
        num_words: request.num_words,
        requester,
    });

    Ok(request_id)
}
