use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::states::Position;

// Asserts a caller-chosen slippage sits inside the accepted band
pub fn validate_slippage(slippage_bps: u64) -> Result<()> {
    require!(slippage_bps >= MIN_SLIPPAGE_BPS, ErrorCode::SlippageTooLow);
    require!(slippage_bps <= MAX_SLIPPAGE_BPS, ErrorCode::SlippageTooHigh);
    Ok(())
}

// Asserts all deposit arguments, first failure wins
pub fn validate_deposit_args(
    amount: u64,
    target_price_usd: u64,
    slippage_bps: u64,
    tip_bps: u64,
) -> Result<()> {
    require!(amount >= MIN_DEPOSIT, ErrorCode::DepositBelowMinimum);
    require!(amount <= MAX_DEPOSIT, ErrorCode::DepositAboveMaximum);
    require!(target_price_usd > 0, ErrorCode::InvalidTargetPrice);
    validate_slippage(slippage_bps)?;
    require!(tip_bps <= MAX_TIP_BPS, ErrorCode::TipTooHigh);
    Ok(())
}

// A depositor may hold at most one open position at a time
pub fn check_no_active_position(position: &Position) -> Result<()> {
    require!(
        !position.is_active && position.balance == 0,
        ErrorCode::ActivePositionExists
    );
    Ok(())
}

// Withdrawal gate: the current reading must strictly exceed the
// recorded target, equality is rejected
pub fn check_price_target(current_price: u64, target_price: u64) -> Result<()> {
    require!(current_price > target_price, ErrorCode::PriceNotMet);
    Ok(())
}

/// Splits a deposit into (tip, swap_amount). The tip rounds down, the
/// remainder is what actually hits the pool.
pub fn split_tip(amount: u64, tip_bps: u64) -> Result<(u64, u64)> {
    let tip = (amount as u128)
        .checked_mul(tip_bps as u128)
        .ok_or(error!(ErrorCode::Overflow))?
        / BPS_DENOMINATOR as u128;
    let tip = u64::try_from(tip).map_err(|_| error!(ErrorCode::Overflow))?;
    let swap_amount = amount
        .checked_sub(tip)
        .ok_or(error!(ErrorCode::Overflow))?;
    require!(swap_amount > 0, ErrorCode::SwapAmountTooLow);
    Ok((tip, swap_amount))
}

// Positivity and recency gate, applied to every feed read the same way
pub fn check_oracle_fresh(price: i64, publish_time: i64, now: i64) -> Result<()> {
    require!(price > 0, ErrorCode::InvalidOraclePrice);
    require!(
        now <= publish_time.saturating_add(MAX_ORACLE_AGE),
        ErrorCode::StaleOracle
    );
    Ok(())
}

/// Rescales a pyth mantissa/exponent pair to a fixed number of decimals.
/// Downscaling truncates toward zero.
pub fn normalize_price(price: i64, expo: i32, target_decimals: i32) -> Result<u128> {
    let price = u128::try_from(price).map_err(|_| error!(ErrorCode::InvalidOraclePrice))?;
    let shift = target_decimals
        .checked_add(expo)
        .ok_or(error!(ErrorCode::Overflow))?;
    if shift >= 0 {
        let factor = 10u128
            .checked_pow(shift as u32)
            .ok_or(error!(ErrorCode::Overflow))?;
        price
            .checked_mul(factor)
            .ok_or(error!(ErrorCode::Overflow))
    } else {
        let factor = 10u128
            .checked_pow((-shift) as u32)
            .ok_or(error!(ErrorCode::Overflow))?;
        Ok(price / factor)
    }
}

/// Gates a feed reading and returns it at the requested precision.
pub fn read_gated_price(
    feed: &pyth_sdk::PriceFeed,
    now: i64,
    target_decimals: i32,
) -> Result<u128> {
    let price = feed.get_price_unchecked();
    check_oracle_fresh(price.price, price.publish_time, now)?;
    normalize_price(price.price, price.expo, target_decimals)
}

/// Floor for a swap output: oracle-implied gross minus the slippage margin.
/// Both divisions truncate, matching the economic floor offered to users.
pub fn min_out_from_rate(amount_in: u64, rate_e18: u128, slippage_bps: u64) -> Result<u64> {
    let gross = (amount_in as u128)
        .checked_mul(rate_e18)
        .ok_or(error!(ErrorCode::Overflow))?
        / RATE_SCALE;
    let retained_bps = BPS_DENOMINATOR
        .checked_sub(slippage_bps)
        .ok_or(error!(ErrorCode::Overflow))?;
    let min_out = gross
        .checked_mul(retained_bps as u128)
        .ok_or(error!(ErrorCode::Overflow))?
        / BPS_DENOMINATOR as u128;
    u64::try_from(min_out).map_err(|_| error!(ErrorCode::Overflow))
}

/// Inverts a staked-per-native rate into native-per-staked, both 1e18
/// fixed point. Integer division, lossy by design.
pub fn invert_rate(rate_e18: u128) -> Result<u128> {
    require!(rate_e18 > 0, ErrorCode::InvalidOraclePrice);
    Ok(RATE_SCALE_SQUARED / rate_e18)
}

/// Prefix of a batch list up to (excluding) the first default pubkey,
/// which terminates the scan rather than erroring.
pub fn batch_targets(depositors: &[Pubkey]) -> &[Pubkey] {
    let end = depositors
        .iter()
        .position(|d| *d == Pubkey::default())
        .unwrap_or(depositors.len());
    &depositors[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: ErrorCode) {
        match result {
            Err(Error::AnchorError(e)) => {
                assert_eq!(e.error_code_number, u32::from(expected))
            }
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    const ONE_SOL: u64 = 1_000_000_000;

    #[test]
    fn deposit_amount_bounds() {
        // 0.05 SOL is under the floor
        assert_err(
            validate_deposit_args(ONE_SOL / 20, 1, 100, 0),
            ErrorCode::DepositBelowMinimum,
        );
        assert_err(
            validate_deposit_args(100 * ONE_SOL + 1, 1, 100, 0),
            ErrorCode::DepositAboveMaximum,
        );
        // exact boundaries pass
        assert!(validate_deposit_args(MIN_DEPOSIT, 1, 100, 0).is_ok());
        assert!(validate_deposit_args(MAX_DEPOSIT, 1, 100, 0).is_ok());
    }

    #[test]
    fn deposit_target_price_must_be_positive() {
        assert_err(
            validate_deposit_args(ONE_SOL, 0, 100, 0),
            ErrorCode::InvalidTargetPrice,
        );
    }

    #[test]
    fn deposit_slippage_bounds() {
        assert_err(
            validate_deposit_args(ONE_SOL, 1, MIN_SLIPPAGE_BPS - 1, 0),
            ErrorCode::SlippageTooLow,
        );
        assert_err(
            validate_deposit_args(ONE_SOL, 1, MAX_SLIPPAGE_BPS + 1, 0),
            ErrorCode::SlippageTooHigh,
        );
        assert!(validate_deposit_args(ONE_SOL, 1, MIN_SLIPPAGE_BPS, 0).is_ok());
        assert!(validate_deposit_args(ONE_SOL, 1, MAX_SLIPPAGE_BPS, 0).is_ok());
    }

    #[test]
    fn deposit_tip_bound() {
        assert_err(
            validate_deposit_args(ONE_SOL, 1, 100, MAX_TIP_BPS + 1),
            ErrorCode::TipTooHigh,
        );
        assert!(validate_deposit_args(ONE_SOL, 1, 100, MAX_TIP_BPS).is_ok());
    }

    #[test]
    fn first_failing_precondition_wins() {
        // everything out of bounds, the amount check fires first
        assert_err(
            validate_deposit_args(0, 0, 0, 10_000),
            ErrorCode::DepositBelowMinimum,
        );
    }

    #[test]
    fn second_deposit_with_open_position_is_rejected() {
        let mut position = Position::default();
        assert!(check_no_active_position(&position).is_ok());

        position.open(1_000, 1);
        assert_err(
            check_no_active_position(&position),
            ErrorCode::ActivePositionExists,
        );

        // clearing (withdraw or emergency path) reopens the slot
        position.clear();
        assert!(check_no_active_position(&position).is_ok());
    }

    #[test]
    fn price_target_equality_is_rejected() {
        let target = 2_000_00000000;
        assert_err(check_price_target(target, target), ErrorCode::PriceNotMet);
        assert_err(check_price_target(target - 1, target), ErrorCode::PriceNotMet);
        assert!(check_price_target(target + 1, target).is_ok());
    }

    #[test]
    fn tip_split_one_percent_of_one_sol() {
        let (tip, swap_amount) = split_tip(ONE_SOL, 100).unwrap();
        assert_eq!(tip, ONE_SOL / 100);
        assert_eq!(swap_amount, ONE_SOL - ONE_SOL / 100);
        assert_eq!(tip + swap_amount, ONE_SOL);
    }

    #[test]
    fn tip_split_zero_tip() {
        let (tip, swap_amount) = split_tip(ONE_SOL, 0).unwrap();
        assert_eq!(tip, 0);
        assert_eq!(swap_amount, ONE_SOL);
    }

    #[test]
    fn tip_split_rounds_tip_down() {
        // 33 bps of 101 lamports = 0.3333 -> 0
        let (tip, swap_amount) = split_tip(101, 33).unwrap();
        assert_eq!(tip, 0);
        assert_eq!(swap_amount, 101);
    }

    #[test]
    fn oracle_gate_rejects_nonpositive_price() {
        assert_err(check_oracle_fresh(0, 1_000, 1_000), ErrorCode::InvalidOraclePrice);
        assert_err(check_oracle_fresh(-1, 1_000, 1_000), ErrorCode::InvalidOraclePrice);
    }

    #[test]
    fn oracle_gate_staleness_boundary() {
        let published = 1_700_000_000;
        // exactly at the max age still passes
        assert!(check_oracle_fresh(1, published, published + MAX_ORACLE_AGE).is_ok());
        assert_err(
            check_oracle_fresh(1, published, published + MAX_ORACLE_AGE + 1),
            ErrorCode::StaleOracle,
        );
    }

    #[test]
    fn oracle_gate_survives_extreme_publish_time() {
        // a corrupt feed reporting the far future must not overflow the
        // staleness arithmetic
        assert!(check_oracle_fresh(1, i64::MAX, 1_700_000_000).is_ok());
    }

    #[test]
    fn normalize_usd_price_expo_minus_eight() {
        // 2000 USD at pyth's usual -8 exponent stays put at 8 decimals
        let price = normalize_price(2_000_00000000, -8, USD_PRICE_DECIMALS).unwrap();
        assert_eq!(price, 2_000_00000000);
    }

    #[test]
    fn normalize_rate_upscales_to_e18() {
        // 0.96 staked per native reported at -8
        let rate = normalize_price(96_000_000, -8, RATE_DECIMALS).unwrap();
        assert_eq!(rate, 960_000_000_000_000_000);
    }

    #[test]
    fn normalize_truncates_when_downscaling() {
        // 1.9 at -1 squeezed to 0 decimals drops the fraction
        assert_eq!(normalize_price(19, -1, 0).unwrap(), 1);
    }

    #[test]
    fn read_gated_price_applies_gate() {
        use pyth_sdk::{Price, PriceFeed, PriceIdentifier};

        let price = Price {
            price: 2_000_00000000,
            conf: 0,
            expo: -8,
            publish_time: 1_700_000_000,
        };
        let feed = PriceFeed::new(PriceIdentifier::new([0u8; 32]), price, price);

        let now_fresh = 1_700_000_000 + MAX_ORACLE_AGE;
        assert_eq!(
            read_gated_price(&feed, now_fresh, USD_PRICE_DECIMALS).unwrap(),
            2_000_00000000
        );
        assert_err(
            read_gated_price(&feed, now_fresh + 1, USD_PRICE_DECIMALS),
            ErrorCode::StaleOracle,
        );
    }

    #[test]
    fn min_out_deposit_direction() {
        // 0.99 SOL at 0.96 staked/native, 50 bps slippage
        let swap_amount = 990_000_000u64;
        let rate = 960_000_000_000_000_000u128;
        let min_out = min_out_from_rate(swap_amount, rate, 50).unwrap();
        // gross = 950_400_000, floor = gross * 9950 / 10000
        assert_eq!(min_out, 945_648_000);
    }

    #[test]
    fn min_out_zero_amount_is_zero() {
        assert_eq!(min_out_from_rate(0, RATE_SCALE, 500).unwrap(), 0);
    }

    #[test]
    fn invert_rate_truncates_toward_zero() {
        // 1e36 / 3e18 = 333...333.33 -> truncated
        assert_eq!(
            invert_rate(3_000_000_000_000_000_000).unwrap(),
            333_333_333_333_333_333
        );
        // identity rate inverts to itself
        assert_eq!(invert_rate(RATE_SCALE).unwrap(), RATE_SCALE);
    }

    #[test]
    fn invert_rate_rejects_zero() {
        assert_err(invert_rate(0), ErrorCode::InvalidOraclePrice);
    }

    #[test]
    fn withdraw_floor_through_inverted_rate() {
        // round trip of the documented formulas at 0.96 staked/native
        let rate = 960_000_000_000_000_000u128;
        let inv = invert_rate(rate).unwrap();
        assert_eq!(inv, 1_041_666_666_666_666_666);

        let staked_amount = 945_648_000u64;
        let min_native = min_out_from_rate(staked_amount, inv, 100).unwrap();
        let gross = (staked_amount as u128) * inv / RATE_SCALE;
        assert_eq!(min_native as u128, gross * 9_900 / 10_000);
    }

    #[test]
    fn batch_scan_stops_at_sentinel() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();

        let list = [a, b, Pubkey::default(), c];
        assert_eq!(batch_targets(&list), &[a, b]);
    }

    #[test]
    fn batch_scan_without_sentinel_takes_all() {
        let list = [Pubkey::new_unique(), Pubkey::new_unique()];
        assert_eq!(batch_targets(&list).len(), 2);
    }

    #[test]
    fn batch_scan_leading_sentinel_is_empty() {
        let list = [Pubkey::default(), Pubkey::new_unique()];
        assert!(batch_targets(&list).is_empty());
    }
}
