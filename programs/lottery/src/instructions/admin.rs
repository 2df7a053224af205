use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{Config, Lottery, LotteryState};
use crate::utils::LotteryParams;
use crate::InitializeLottery;

/// Config is written once here and never mutated afterwards.
pub fn initialize_lottery(ctx: Context<InitializeLottery>, params: LotteryParams) -> Result<()> {
    params.validate(Rent::get()?.minimum_balance(0))?;

    let now = Clock::get()?.unix_timestamp;
    let config_key = ctx.accounts.config.key();

    let cfg: &mut Account<Config> = &mut ctx.accounts.config;
    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;

    cfg.entrance_fee = params.entrance_fee;
    cfg.interval = params.interval;

    cfg.key_hash = params.key_hash;
    cfg.subscription_id = params.subscription_id;
    cfg.callback_compute_limit = params.callback_compute_limit;
    cfg.request_confirmations = params.request_confirmations;
    cfg.num_words = params.num_words;
    cfg.vrf_coordinator = params.vrf_coordinator;

    cfg.version = INITIAL_VERSION;

    let lottery: &mut Account<Lottery> = &mut ctx.accounts.lottery;
    lottery.config = config_key;
    lottery.bump = ctx.bumps.lottery;

    lottery.vault = ctx.accounts.vault.key();
    lottery.vault_bump = ctx.bumps.vault;

    lottery.state = LotteryState::Open;
    lottery.players = Vec::new();
    lottery.pending_request = None;
    lottery.request_nonce = INITIAL_REQUEST_NONCE;

    lottery.recent_winner = None;
    lottery.latest_timestamp = now;
    lottery.rounds_completed = 0;

    lottery.version = INITIAL_VERSION;

    msg!(
        "lottery initialized: fee={} interval={}s coordinator={}",
        params.entrance_fee,
        params.interval,
        params.vrf_coordinator
    );

    Ok(())
}
