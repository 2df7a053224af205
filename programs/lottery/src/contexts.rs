// programs/lottery/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::{Config, Lottery};

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: system-owned vault PDA, holds the pool lamports, no data
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, lottery.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct EnterLottery<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, lottery.key().as_ref()],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: read-only balance lookup. Address is enforced by seeds/bump.
    #[account(
        seeds = [crate::VAULT_SEED, lottery.key().as_ref()],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,
}

/// Permissionless: anyone (normally the automation bot) may close an eligible round.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: read-only balance lookup. Address is enforced by seeds/bump.
    #[account(
        seeds = [crate::VAULT_SEED, lottery.key().as_ref()],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, lottery.key().as_ref()],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: compared against the drawn player inside the handler
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    pub vrf_coordinator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetPlayer<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::LOTTERY_SEED, config.key().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}
