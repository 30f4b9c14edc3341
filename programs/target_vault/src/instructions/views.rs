//libraries
use anchor_lang::prelude::*;

//local imports
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::{Position, PriceFeed, VaultState};
use crate::utils;

/// Ledger reads never fail: a position account that was never created
/// reads as zero, like an untouched mapping slot.
fn read_position(info: &AccountInfo) -> Option<Position> {
    Account::<Position>::try_from(info)
        .map(|position| (*position).clone())
        .ok()
}

pub fn get_balance(ctx: Context<ViewPosition>, _depositor: Pubkey) -> Result<u64> {
    Ok(read_position(&ctx.accounts.position)
        .map(|position| position.balance)
        .unwrap_or(0))
}

pub fn get_deposit_price(ctx: Context<ViewPosition>, _depositor: Pubkey) -> Result<u64> {
    Ok(read_position(&ctx.accounts.position)
        .map(|position| position.target_price_usd)
        .unwrap_or(0))
}

/// Same gate as the internal withdrawal check: stale or non-positive
/// readings fail here too.
pub fn get_latest_oracle_price(ctx: Context<ViewOraclePrice>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let price = utils::read_gated_price(&ctx.accounts.usd_price_feed, now, USD_PRICE_DECIMALS)?;
    u64::try_from(price).map_err(|_| error!(ErrorCode::Overflow))
}

#[derive(Accounts)]
#[instruction(depositor: Pubkey)]
pub struct ViewPosition<'info> {
    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// CHECK: read leniently, absent position accounts report zero
    #[account(
        seeds = [POSITION_SEED, vault_state.key().as_ref(), depositor.as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ViewOraclePrice<'info> {
    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = vault_state.usd_price_feed)]
    pub usd_price_feed: Account<'info, PriceFeed>,
}
