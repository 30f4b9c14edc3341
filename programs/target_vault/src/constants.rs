// PDA Seeds
pub const VAULT_STATE_SEED: &[u8] = b"vault_state";
pub const POSITION_SEED: &[u8] = b"position";
pub const VAULT_NATIVE_SEED: &[u8] = b"native";
pub const VAULT_STAKED_SEED: &[u8] = b"staked";

// Deposit bounds (lamports, 1 SOL = 10^9)
pub const MIN_DEPOSIT: u64 = 100_000_000; // 0.1 SOL
pub const MAX_DEPOSIT: u64 = 100_000_000_000; // 100 SOL

// Basis points
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const MIN_SLIPPAGE_BPS: u64 = 10; // 0.1%
pub const MAX_SLIPPAGE_BPS: u64 = 500; // 5%
pub const DEFAULT_WITHDRAW_SLIPPAGE_BPS: u64 = 100; // 1%
pub const MAX_TIP_BPS: u64 = 500; // 5%

// Oracle staleness threshold (15 minutes)
pub const MAX_ORACLE_AGE: i64 = 900;

// Maximum depositors per batch emergency withdrawal
pub const MAX_BATCH_SIZE: usize = 50;

// Fixed point scales
pub const USD_PRICE_DECIMALS: i32 = 8;
pub const RATE_DECIMALS: i32 = 18;
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000; // 10^18
pub const RATE_SCALE_SQUARED: u128 = RATE_SCALE * RATE_SCALE; // 10^36

// Whirlpool no-limit sqrt price bounds (orca cardinal bounds)
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;
pub const MAX_SQRT_PRICE_X64: u128 = 79226673515401279992447579055;
