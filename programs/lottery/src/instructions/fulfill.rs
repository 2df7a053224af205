use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    events::LotteryRecentWinners,
    utils::{check_coordinator, check_payout_target, current_pool, VAULT_SEED},
    FulfillRandomWords,
};

// Only the configured coordinator may answer. The round is committed
// only after the vault transfer to the winner went through.
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: [u8; 32],
    random_words: Vec<u64>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    check_coordinator(&cfg.vrf_coordinator, &ctx.accounts.vrf_coordinator.key())?;

    let now = Clock::get()?.unix_timestamp;
    let vault_info = ctx.accounts.vault.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();
    let system_info = ctx.accounts.system_program.to_account_info();
    let pool = current_pool(&vault_info)?;

    let lottery_key = ctx.accounts.lottery.key();
    let lottery = &mut ctx.accounts.lottery;
    let vault_bump = lottery.vault_bump;

    let outcome = lottery.fulfill(request_id, &random_words, pool, now, |_, winner, amount| {
        check_payout_target(&winner, winner_info.key)?;

        let ix = system_instruction::transfer(vault_info.key, winner_info.key, amount);
        let signer_seeds: &[&[u8]] = &[VAULT_SEED, lottery_key.as_ref(), &[vault_bump]];

        invoke_signed(
            &ix,
            &[vault_info.clone(), winner_info.clone(), system_info.clone()],
            &[signer_seeds],
        )?;

        Ok(())
    })?;

    emit!(LotteryRecentWinners {
        winner: outcome.winner,
        winner_index: outcome.winner_index,
        payout: outcome.payout,
        request_id,
    });

    Ok(())
}
