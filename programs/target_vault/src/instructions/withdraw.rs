//libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use whirlpools::{self, state::*};

//local imports
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::WithdrawEvent;
use crate::states::{Position, PriceFeed, VaultState};
use crate::utils;

/// Shared by `withdraw` (fixed default slippage) and
/// `withdraw_with_slippage` (caller-chosen, same bounds as deposit).
pub fn handle(ctx: Context<Withdraw>, slippage_bps: u64) -> Result<()> {
    require!(ctx.accounts.position.balance > 0, ErrorCode::NoBalance);
    utils::validate_slippage(slippage_bps)?;

    let now = Clock::get()?.unix_timestamp;

    // Withdrawal gate: the USD feed must strictly exceed the stored target,
    // equality is rejected
    let current_price =
        utils::read_gated_price(&ctx.accounts.usd_price_feed, now, USD_PRICE_DECIMALS)?;
    let current_price =
        u64::try_from(current_price).map_err(|_| error!(ErrorCode::Overflow))?;
    utils::check_price_target(current_price, ctx.accounts.position.target_price_usd)?;

    // Zero the ledger before the router call; the swap CPI is the only
    // reentrancy surface on this path and must observe an empty position
    let staked_amount = ctx.accounts.position.clear();

    let rate_e18 = utils::read_gated_price(&ctx.accounts.rate_price_feed, now, RATE_DECIMALS)?;
    let native_per_staked = utils::invert_rate(rate_e18)?;
    let min_native_out = utils::min_out_from_rate(staked_amount, native_per_staked, slippage_bps)?;

    let vault_state = &ctx.accounts.vault_state;
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_STATE_SEED, &[vault_state.bump]]];

    let native_bal_before = ctx.accounts.user_native_ata.amount;

    let token_account_a;
    let token_account_b;

    // This check is necessary, since orca uses cardinal ordering for the mints, and the pool can be either A/B or B/A
    let a_to_b = ctx.accounts.vault_staked_ata.mint == ctx.accounts.whirlpool.token_mint_a;
    if a_to_b {
        token_account_a = &ctx.accounts.vault_staked_ata;
        token_account_b = &ctx.accounts.user_native_ata;
    } else {
        token_account_a = &ctx.accounts.user_native_ata;
        token_account_b = &ctx.accounts.vault_staked_ata;
    }
    let sqrt_price_limit = if a_to_b {
        MIN_SQRT_PRICE_X64
    } else {
        MAX_SQRT_PRICE_X64
    };

    let cpi_program = ctx.accounts.whirlpool_program.to_account_info();

    // Proceeds land in the caller's native account directly, never in
    // vault custody
    let cpi_accounts = whirlpools::cpi::accounts::Swap {
        whirlpool: ctx.accounts.whirlpool.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        token_authority: vault_state.to_account_info(),
        token_owner_account_a: token_account_a.to_account_info(),
        token_vault_a: ctx.accounts.token_vault_a.to_account_info(),
        token_owner_account_b: token_account_b.to_account_info(),
        token_vault_b: ctx.accounts.token_vault_b.to_account_info(),
        tick_array0: ctx.accounts.tick_array_0.to_account_info(),
        tick_array1: ctx.accounts.tick_array_1.to_account_info(),
        tick_array2: ctx.accounts.tick_array_2.to_account_info(),
        oracle: ctx.accounts.oracle.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);

    // execute CPI
    msg!("CPI: whirlpool swap instruction");
    whirlpools::cpi::swap(
        cpi_ctx,
        staked_amount,
        min_native_out,
        sqrt_price_limit,
        true, // amount_specified_is_input
        a_to_b,
    )?;

    ctx.accounts.user_native_ata.reload()?;
    let native_bal_after = ctx.accounts.user_native_ata.amount;
    let native_received = native_bal_after
        .checked_sub(native_bal_before)
        .ok_or(error!(ErrorCode::Overflow))?;

    emit!(WithdrawEvent {
        depositor: ctx.accounts.user_authority.key(),
        native_amount: native_received,
        staked_amount,
        slippage_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user_authority: Signer<'info>,

    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault_state.key().as_ref(), user_authority.key().as_ref()],
        bump = position.bump,
        constraint = user_authority.key() == position.authority.key() @ ErrorCode::Unauthorized
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = user_native_ata.mint == vault_state.native_mint,
        constraint = user_native_ata.owner == user_authority.key() @ ErrorCode::Unauthorized
    )]
    pub user_native_ata: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = vault_state.vault_staked_ata)]
    pub vault_staked_ata: Box<Account<'info, TokenAccount>>,

    #[account(address = vault_state.usd_price_feed)]
    pub usd_price_feed: Account<'info, PriceFeed>,

    #[account(address = vault_state.rate_price_feed)]
    pub rate_price_feed: Account<'info, PriceFeed>,

    pub whirlpool_program: Program<'info, whirlpools::program::Whirlpool>,

    #[account(mut, address = vault_state.whirlpool)]
    pub whirlpool: Box<Account<'info, Whirlpool>>,

    #[account(mut, address = whirlpool.token_vault_a)]
    pub token_vault_a: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = whirlpool.token_vault_b)]
    pub token_vault_b: Box<Account<'info, TokenAccount>>,

    #[account(mut, has_one = whirlpool)]
    pub tick_array_0: AccountLoader<'info, TickArray>,

    #[account(mut, has_one = whirlpool)]
    pub tick_array_1: AccountLoader<'info, TickArray>,

    #[account(mut, has_one = whirlpool)]
    pub tick_array_2: AccountLoader<'info, TickArray>,

    /// CHECK: checked by whirlpool_program
    pub oracle: UncheckedAccount<'info>,

    // Programs and Sysvars
    #[account(address = token::ID)]
    pub token_program: Program<'info, Token>,
}
