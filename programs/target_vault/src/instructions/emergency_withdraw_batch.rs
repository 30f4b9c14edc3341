//libraries
use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

//local imports
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::EmergencyWithdrawEvent;
use crate::states::{Position, VaultState};
use crate::utils;

/// Batch variant of the escape hatch. The depositor list is scanned in
/// order up to the first default pubkey (a terminator, not an error);
/// inactive or zero-balance entries are skipped. Per entry, the caller
/// supplies a (position, staked token account) pair through
/// `remaining_accounts`, in list order. A failing transfer reverts the
/// whole batch, there is no per-entry isolation.
pub fn handle<'info>(
    ctx: Context<'_, '_, '_, 'info, EmergencyWithdrawBatch<'info>>,
    depositors: Vec<Pubkey>,
) -> Result<()> {
    require!(depositors.len() <= MAX_BATCH_SIZE, ErrorCode::BatchTooLarge);

    let vault_state = &ctx.accounts.vault_state;
    let vault_key = vault_state.key();
    let admin_key = ctx.accounts.admin.key();
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_STATE_SEED, &[vault_state.bump]]];

    let targets = utils::batch_targets(&depositors);
    require!(
        ctx.remaining_accounts.len() >= targets.len() * 2,
        ErrorCode::BatchAccountsMismatch
    );

    for (i, depositor) in targets.iter().enumerate() {
        let position_info = &ctx.remaining_accounts[2 * i];
        let ata_info = &ctx.remaining_accounts[2 * i + 1];

        let (expected_position, _) = Pubkey::find_program_address(
            &[POSITION_SEED, vault_key.as_ref(), depositor.as_ref()],
            ctx.program_id,
        );
        // A missing or foreign position account means this entry never
        // deposited, skip it like any other non-depositor
        if position_info.key() != expected_position {
            continue;
        }
        let mut position: Account<Position> = match Account::try_from(position_info) {
            Ok(position) => position,
            Err(_) => continue,
        };
        if !position.is_active || position.balance == 0 {
            continue;
        }

        let depositor_ata: Account<TokenAccount> = Account::try_from(ata_info)?;
        require!(
            depositor_ata.mint == vault_state.staked_mint,
            ErrorCode::BatchAccountsMismatch
        );
        require_keys_eq!(
            depositor_ata.owner,
            *depositor,
            ErrorCode::BatchAccountsMismatch
        );

        let staked_amount = position.clear();

        let cpi_accounts = Transfer {
            from: ctx.accounts.vault_staked_ata.to_account_info(),
            to: ata_info.to_account_info(),
            authority: vault_state.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, staked_amount)?;

        position.exit(ctx.program_id)?;

        emit!(EmergencyWithdrawEvent {
            depositor: *depositor,
            staked_amount,
            initiated_by: admin_key,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct EmergencyWithdrawBatch<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump,
        constraint = admin.key() == vault_state.admin @ ErrorCode::Unauthorized
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(mut, address = vault_state.vault_staked_ata)]
    pub vault_staked_ata: Box<Account<'info, TokenAccount>>,

    // Programs and Sysvars
    #[account(address = token::ID)]
    pub token_program: Program<'info, Token>,
}
