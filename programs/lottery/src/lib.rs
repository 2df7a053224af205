use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod vrf;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    // Required fields
    name: "Lottery",
    project_url: "https://github.com/lottery-program/lottery",
    contacts: "link:https://github.com/lottery-program/lottery/issues",
    policy: "https://github.com/lottery-program/lottery/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/lottery-program/lottery"
}

declare_id!("6sCvUHQq8TN5eU2aeTWsqJWnS3MpPBg9rWZspW1PDKWs");

#[program]
pub mod lottery {
    use super::*;
    use crate::instructions::{admin, enter, fulfill, upkeep, views};

    pub fn initialize_lottery(ctx: Context<InitializeLottery>, params: LotteryParams) -> Result<()> {
        admin::initialize_lottery(ctx, params)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        enter::enter_lottery(ctx, amount)
    }

    // ----------------------------
    // Automation
    // ----------------------------
    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
        upkeep::check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        upkeep::perform_upkeep(ctx)
    }

    // ----------------------------
    // Oracle callback
    // ----------------------------
    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: [u8; 32],
        random_words: Vec<u64>,
    ) -> Result<()> {
        fulfill::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn get_player(ctx: Context<GetPlayer>, index: u32) -> Result<Pubkey> {
        views::get_player(ctx, index)
    }
}
