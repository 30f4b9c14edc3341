//libraries
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

//local imports
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::EmergencyWithdrawEvent;
use crate::states::{Position, VaultState};

/// Admin-only escape hatch: returns the held staked balance to the
/// depositor directly, no swap and no price gate.
pub fn handle(ctx: Context<EmergencyWithdraw>, depositor: Pubkey) -> Result<()> {
    let position = &mut ctx.accounts.position;
    require!(position.is_active, ErrorCode::NotADepositor);
    require!(position.balance > 0, ErrorCode::NoBalance);

    let staked_amount = position.clear();

    let vault_state = &ctx.accounts.vault_state;
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_STATE_SEED, &[vault_state.bump]]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault_staked_ata.to_account_info(),
        to: ctx.accounts.depositor_staked_ata.to_account_info(),
        authority: vault_state.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, staked_amount)?;

    emit!(EmergencyWithdrawEvent {
        depositor,
        staked_amount,
        initiated_by: ctx.accounts.admin.key(),
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(depositor: Pubkey)]
pub struct EmergencyWithdraw<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump,
        constraint = admin.key() == vault_state.admin @ ErrorCode::Unauthorized
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault_state.key().as_ref(), depositor.as_ref()],
        bump = position.bump
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(mut, address = vault_state.vault_staked_ata)]
    pub vault_staked_ata: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = depositor_staked_ata.mint == vault_state.staked_mint,
        constraint = depositor_staked_ata.owner == depositor
    )]
    pub depositor_staked_ata: Box<Account<'info, TokenAccount>>,

    // Programs and Sysvars
    #[account(address = token::ID)]
    pub token_program: Program<'info, Token>,
}
