use anchor_lang::prelude::*;

#[event]
pub struct DepositEvent {
    #[index]
    pub depositor: Pubkey,
    pub native_amount: u64,
    pub staked_amount: u64,
    pub target_price_usd: u64,
    pub slippage_bps: u64,
    pub tip_bps: u64,
    pub tip_amount: u64,
}

#[event]
pub struct WithdrawEvent {
    #[index]
    pub depositor: Pubkey,
    pub native_amount: u64,
    pub staked_amount: u64,
    pub slippage_bps: u64,
}

#[event]
pub struct EmergencyWithdrawEvent {
    #[index]
    pub depositor: Pubkey,
    pub staked_amount: u64,
    #[index]
    pub initiated_by: Pubkey,
}
