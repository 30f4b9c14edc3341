// libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{spl_token, Mint, Token, TokenAccount};
use std::mem::size_of;
use whirlpools::state::Whirlpool;

// local imports
use crate::constants::*;
use crate::states::{PriceFeed, VaultState};

pub fn handle(ctx: Context<InitializeVault>, admin: Pubkey) -> Result<()> {
    msg!("INITIALIZING VAULT");

    // canonical bump, derived rather than trusted from the caller
    let bump = *ctx.bumps.get("vault_state").unwrap();
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.bump = bump;
    vault_state.admin = admin;
    vault_state.native_mint = ctx.accounts.native_mint.key();
    vault_state.staked_mint = ctx.accounts.staked_mint.key();
    vault_state.vault_native_ata = ctx.accounts.vault_native_ata.key();
    vault_state.vault_staked_ata = ctx.accounts.vault_staked_ata.key();
    vault_state.usd_price_feed = ctx.accounts.usd_price_feed.key();
    vault_state.rate_price_feed = ctx.accounts.rate_price_feed.key();
    vault_state.whirlpool = ctx.accounts.whirlpool.key();

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [VAULT_STATE_SEED],
        bump,
        space = 8 + size_of::<VaultState>()
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(address = spl_token::native_mint::ID)]
    pub native_mint: Box<Account<'info, Mint>>,
    pub staked_mint: Box<Account<'info, Mint>>,

    #[account(init,
        token::mint = native_mint,
        token::authority = vault_state,
        seeds = [
          VAULT_NATIVE_SEED,
          vault_state.key().as_ref(),
          native_mint.key().as_ref(),
        ],
        bump,
        payer = payer
      )]
    pub vault_native_ata: Box<Account<'info, TokenAccount>>,

    #[account(init,
        token::mint = staked_mint,
        token::authority = vault_state,
        seeds = [
          VAULT_STAKED_SEED,
          vault_state.key().as_ref(),
          staked_mint.key().as_ref(),
        ],
        bump,
        payer = payer
      )]
    pub vault_staked_ata: Box<Account<'info, TokenAccount>>,

    pub usd_price_feed: Account<'info, PriceFeed>,
    pub rate_price_feed: Account<'info, PriceFeed>,

    #[account(
        constraint = (whirlpool.token_mint_a == native_mint.key() && whirlpool.token_mint_b == staked_mint.key())
            || (whirlpool.token_mint_a == staked_mint.key() && whirlpool.token_mint_b == native_mint.key())
    )]
    pub whirlpool: Box<Account<'info, Whirlpool>>,

    // Programs and Sysvars
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
