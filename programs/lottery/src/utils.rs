use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::{constants::MAX_NUM_WORDS, errors::LotteryError};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const LOTTERY_SEED: &[u8] = b"lottery_v1";
pub const VAULT_SEED: &[u8] = b"vault_v1";

pub const REQUEST_ID_DOMAIN: &[u8] = b"vrf_request_v1";

// ---------------
// Init payload
// ---------------
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotteryParams {
    pub entrance_fee: u64,
    pub interval: i64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
    pub request_confirmations: u16,
    pub num_words: u32,
    pub vrf_coordinator: Pubkey,
}

impl LotteryParams {
    /// `rent_floor` is the rent-exempt minimum of a zero-byte account. A smaller
    /// stake could leave a drained winner below it and make every payout fail.
    pub fn validate(&self, rent_floor: u64) -> Result<()> {
        require!(
            self.entrance_fee > 0 && self.entrance_fee >= rent_floor,
            LotteryError::InvalidEntranceFee
        );
        require!(self.interval > 0, LotteryError::InvalidInterval);
        require!(self.callback_compute_limit > 0, LotteryError::InvalidCallbackLimit);
        require!(
            self.num_words > 0 && self.num_words <= MAX_NUM_WORDS,
            LotteryError::InvalidNumWords
        );
        require!(
            self.vrf_coordinator != Pubkey::default(),
            LotteryError::InvalidCoordinator
        );
        Ok(())
    }
}

// -------------------------
// Fulfillment guards
// -------------------------
pub fn check_coordinator(configured: &Pubkey, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*configured, *signer, LotteryError::Unauthorized);
    Ok(())
}

/// The winner account handed in by the coordinator must be the drawn player.
pub fn check_payout_target(drawn: &Pubkey, given: &Pubkey) -> Result<()> {
    require_keys_eq!(*drawn, *given, LotteryError::PayoutFailed);
    Ok(())
}

// -------------------------
// Request id derivation
// -------------------------
pub fn derive_request_id(
    lottery: &Pubkey,
    key_hash: &[u8; 32],
    subscription_id: u64,
    nonce: u64,
) -> [u8; 32] {
    hashv(&[
        REQUEST_ID_DOMAIN,
        lottery.as_ref(),
        key_hash.as_ref(),
        subscription_id.to_le_bytes().as_ref(),
        nonce.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

// -------------------------
// Winner selection + pool
// -------------------------

/// `None` when nobody entered.
pub fn winner_index(random_word: u64, player_count: usize) -> Option<usize> {
    random_word
        .checked_rem(player_count as u64)
        .map(|i| i as usize)
}

/// Lamports in the vault above its rent-exempt floor.
pub fn pool_balance(vault_lamports: u64, rent_floor: u64) -> u64 {
    vault_lamports.saturating_sub(rent_floor)
}

pub fn current_pool(vault: &AccountInfo) -> Result<u64> {
    let rent_floor = Rent::get()?.minimum_balance(0);
    Ok(pool_balance(vault.lamports(), rent_floor))
}
