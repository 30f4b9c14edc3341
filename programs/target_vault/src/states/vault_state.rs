use anchor_lang::prelude::*;

/// Process-wide configuration, written once at initialization and
/// never mutated afterwards.
#[account]
#[derive(Default)]
pub struct VaultState {
    /// Bump/nonce for the vault state pda
    pub bump: u8, // 1
    /// Administrator allowed to receive tips and trigger emergency paths
    pub admin: Pubkey, // 32

    pub native_mint: Pubkey, // 32
    pub staked_mint: Pubkey, // 32

    /// Custody token accounts, both owned by this pda
    pub vault_native_ata: Pubkey, // 32
    pub vault_staked_ata: Pubkey, // 32

    /// Pyth native/USD feed, gates withdrawals and the price view
    pub usd_price_feed: Pubkey, // 32
    /// Pyth staked-per-native exchange rate feed, floors both swap directions
    pub rate_price_feed: Pubkey, // 32

    /// Whirlpool the vault swaps through
    pub whirlpool: Pubkey, // 32

    /// extra space
    pub reserved: [u64; 8],
}
