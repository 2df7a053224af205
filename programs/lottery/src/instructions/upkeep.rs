use anchor_lang::prelude::*;

use crate::{
    events::RequestedLotteryWinner,
    state::UpkeepStatus,
    utils::current_pool,
    vrf::{request_random_words, RandomWordsRequest},
    CheckUpkeep, PerformUpkeep,
};

/// Read-only. Polled by the automation bot via simulation.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    let pool = current_pool(&ctx.accounts.vault.to_account_info())?;

    Ok(ctx
        .accounts
        .lottery
        .upkeep_status(ctx.accounts.config.interval, pool, now))
}

// Never trusts the caller's own check_upkeep result: conditions are re-evaluated here.
pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;
    let pool = current_pool(&ctx.accounts.vault.to_account_info())?;

    let lottery_key = ctx.accounts.lottery.key();
    let requester = ctx.accounts.caller.key();
    let request = RandomWordsRequest::from(&**cfg);

    let lottery = &mut ctx.accounts.lottery;
    let request_id = lottery.close_round(cfg.interval, pool, now, |l| {
        request_random_words(l, &lottery_key, &request, requester)
    })?;

    emit!(RequestedLotteryWinner { request_id });

    Ok(())
}
