use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("You are not authorized to perform this action.")]
    Unauthorized,
    #[msg("Deposit below minimum")]
    DepositBelowMinimum,
    #[msg("Deposit above maximum")]
    DepositAboveMaximum,
    #[msg("Price must be greater than 0")]
    InvalidTargetPrice,
    #[msg("Slippage too low")]
    SlippageTooLow,
    #[msg("Slippage too high")]
    SlippageTooHigh,
    #[msg("Tip too high")]
    TipTooHigh,
    #[msg("Existing deposit must be withdrawn first")]
    ActivePositionExists,
    #[msg("Swap amount too low")]
    SwapAmountTooLow,
    #[msg("Invalid oracle price")]
    InvalidOraclePrice,
    #[msg("Oracle too old")]
    StaleOracle,
    #[msg("Oracle price too low")]
    PriceNotMet,
    #[msg("No balance to withdraw")]
    NoBalance,
    #[msg("Not a depositor")]
    NotADepositor,
    #[msg("Batch exceeds maximum size")]
    BatchTooLarge,
    #[msg("Batch accounts do not match depositor list")]
    BatchAccountsMismatch,
    #[msg("An overflow occurs.")]
    Overflow,
    #[msg("Pyth has an internal error.")]
    PythError,
    #[msg("Program should not try to serialize a price account.")]
    TryToSerializePriceAccount,
}
