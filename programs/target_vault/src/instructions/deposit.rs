//libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use std::mem::size_of;
use whirlpools::{self, state::*};

//local imports
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::DepositEvent;
use crate::states::{Position, PriceFeed, VaultState};
use crate::utils;

pub fn handle(
    ctx: Context<Deposit>,
    amount: u64,
    target_price_usd: u64,
    slippage_bps: u64,
    tip_bps: u64,
) -> Result<()> {
    utils::validate_deposit_args(amount, target_price_usd, slippage_bps, tip_bps)?;

    utils::check_no_active_position(&ctx.accounts.position)?;

    let vault_state = &ctx.accounts.vault_state;
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_STATE_SEED, &[vault_state.bump]]];

    // Pull the full amount into vault custody
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_native_ata.to_account_info(),
        to: ctx.accounts.vault_native_ata.to_account_info(),
        authority: ctx.accounts.user_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    let (tip_amount, swap_amount) = utils::split_tip(amount, tip_bps)?;

    if tip_amount > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.vault_native_ata.to_account_info(),
            to: ctx.accounts.admin_native_ata.to_account_info(),
            authority: vault_state.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
            tip_amount,
        )?;
    }

    // Exchange-rate feed floors the swap output
    let now = Clock::get()?.unix_timestamp;
    let rate_e18 = utils::read_gated_price(&ctx.accounts.rate_price_feed, now, RATE_DECIMALS)?;
    let min_staked_out = utils::min_out_from_rate(swap_amount, rate_e18, slippage_bps)?;

    let staked_bal_before = ctx.accounts.vault_staked_ata.amount;

    let token_account_a;
    let token_account_b;

    // This check is necessary, since orca uses cardinal ordering for the mints, and the pool can be either A/B or B/A
    let a_to_b = ctx.accounts.vault_native_ata.mint == ctx.accounts.whirlpool.token_mint_a;
    if a_to_b {
        token_account_a = &ctx.accounts.vault_native_ata;
        token_account_b = &ctx.accounts.vault_staked_ata;
    } else {
        token_account_a = &ctx.accounts.vault_staked_ata;
        token_account_b = &ctx.accounts.vault_native_ata;
    }
    let sqrt_price_limit = if a_to_b {
        MIN_SQRT_PRICE_X64
    } else {
        MAX_SQRT_PRICE_X64
    };

    let cpi_program = ctx.accounts.whirlpool_program.to_account_info();

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
        swap_amount,
        min_staked_out,
        sqrt_price_limit,
        true, // amount_specified_is_input
        a_to_b,
    )?;

    ctx.accounts.vault_staked_ata.reload()?;
    let staked_bal_after = ctx.accounts.vault_staked_ata.amount;
    let staked_received = staked_bal_after
        .checked_sub(staked_bal_before)
        .ok_or(error!(ErrorCode::Overflow))?;

    // The ledger write lands after the router call returns, mirroring the
    // deposit-side ordering of the withdraw/deposit asymmetry (DESIGN.md)
    let position = &mut ctx.accounts.position;
    position.bump = *ctx.bumps.get("position").unwrap();
    position.authority = ctx.accounts.user_authority.key();
    position.open(staked_received, target_price_usd);

    emit!(DepositEvent {
        depositor: ctx.accounts.user_authority.key(),
        native_amount: amount,
        staked_amount: staked_received,
        target_price_usd,
        slippage_bps,
        tip_bps,
        tip_amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user_authority: Signer<'info>,

    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(init_if_needed,
        seeds = [POSITION_SEED, vault_state.key().as_ref(), user_authority.key().as_ref()],
        bump,
        payer = user_authority,
        space = 8 + size_of::<Position>()
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = user_native_ata.mint == vault_state.native_mint,
        constraint = user_native_ata.owner == user_authority.key() @ ErrorCode::Unauthorized
    )]
    pub user_native_ata: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = admin_native_ata.mint == vault_state.native_mint,
        constraint = admin_native_ata.owner == vault_state.admin
    )]
    pub admin_native_ata: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = vault_state.vault_native_ata)]
    pub vault_native_ata: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = vault_state.vault_staked_ata)]
    pub vault_staked_ata: Box<Account<'info, TokenAccount>>,

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
    pub system_program: Program<'info, System>,
}
