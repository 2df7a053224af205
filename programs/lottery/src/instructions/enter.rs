use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::{events::LotteryEnter, EnterLottery};

pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    ctx.accounts.lottery.check_entry(amount, cfg.entrance_fee)?;

    // --- TRANSFER stake to vault ---
    let ix = system_instruction::transfer(
        &ctx.accounts.player.key(),
        &ctx.accounts.vault.key(),
        amount,
    );

    invoke(
        &ix,
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    let player = ctx.accounts.player.key();
    let lottery = &mut ctx.accounts.lottery;
    lottery.record_entry(player);

    emit!(LotteryEnter {
        player,
        amount,
        player_count: lottery.number_of_players(),
    });

    Ok(())
}
