// libraries
use anchor_lang::prelude::*;

//local imports
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod states;
pub mod utils;

// crates
use crate::constants::*;
use crate::instructions::*;

#[cfg(feature = "dev")]
declare_id!("2oUmUDgTvVFBDqNC2TpVLhtvaenKgiNnuvsPMUYT4yJq");

#[cfg(feature = "prod")]
declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod target_vault {

    use super::*;

    /**
     * Create the vault state account
     * Stores the administrator identity and the fixed collaborator
     * addresses (mints, custody accounts, price feeds, whirlpool)
     *
     * Immutable after this call
     */
    pub fn initialize_vault(ctx: Context<InitializeVault>, admin: Pubkey) -> Result<()> {
        initialize_vault::handle(ctx, admin)
    }

    /**
     * Deposit native (wSOL) into the vault
     *
     * Splits off the optional admin tip, swaps the rest into the staked
     * token through the whirlpool with an oracle-derived output floor,
     * and records the position with its withdrawal target price
     */
    pub fn deposit(
        ctx: Context<Deposit>,
        amount: u64,
        target_price_usd: u64,
        slippage_bps: u64,
        tip_bps: u64,
    ) -> Result<()> {
        deposit::handle(ctx, amount, target_price_usd, slippage_bps, tip_bps)
    }

    /**
     * Swap the held staked balance back to native with the default 1%
     * slippage, if the USD oracle strictly exceeds the stored target
     */
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        withdraw::handle(ctx, DEFAULT_WITHDRAW_SLIPPAGE_BPS)
    }

    /**
     * Same as withdraw, with a caller-chosen slippage validated against
     * the deposit bounds
     */
    pub fn withdraw_with_slippage(ctx: Context<Withdraw>, slippage_bps: u64) -> Result<()> {
        withdraw::handle(ctx, slippage_bps)
    }

    /**
     * Emergency withdraw
     *
     * Admin only: returns the held staked balance to the depositor
     * without swapping and without consulting the price gate
     */
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, depositor: Pubkey) -> Result<()> {
        emergency_withdraw::handle(ctx, depositor)
    }

    /**
     * Emergency withdraw for up to 50 depositors in one call
     *
     * Scanning stops at the first default pubkey; inactive entries are
     * skipped; any failing transfer reverts the whole batch
     */
    pub fn emergency_withdraw_batch<'info>(
        ctx: Context<'_, '_, '_, 'info, EmergencyWithdrawBatch<'info>>,
        depositors: Vec<Pubkey>,
    ) -> Result<()> {
        emergency_withdraw_batch::handle(ctx, depositors)
    }

    /**
     * Staked-token balance held for a depositor (zero if none)
     */
    pub fn get_balance(ctx: Context<ViewPosition>, depositor: Pubkey) -> Result<u64> {
        views::get_balance(ctx, depositor)
    }

    /**
     * Target price recorded at deposit time (zero if none)
     */
    pub fn get_deposit_price(ctx: Context<ViewPosition>, depositor: Pubkey) -> Result<u64> {
        views::get_deposit_price(ctx, depositor)
    }

    /**
     * Latest native/USD oracle price (1e8), gated like the internal reads
     */
    pub fn get_latest_oracle_price(ctx: Context<ViewOraclePrice>) -> Result<u64> {
        views::get_latest_oracle_price(ctx)
    }
}
