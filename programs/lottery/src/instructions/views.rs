use anchor_lang::prelude::*;

use crate::GetPlayer;

pub fn get_player(ctx: Context<GetPlayer>, index: u32) -> Result<Pubkey> {
    ctx.accounts.lottery.player(index)
}
