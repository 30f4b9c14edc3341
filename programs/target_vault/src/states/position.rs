use anchor_lang::prelude::*;

/// Per-depositor ledger record. A depositor holds at most one active
/// position; the three tracked fields are only ever written together,
/// either by `open` after a deposit swap or by `clear` on the way out.
#[account]
#[derive(Default)]
pub struct Position {
    pub bump: u8,          // 1
    pub authority: Pubkey, // 32

    /// Staked token held on the depositor's behalf
    pub balance: u64, // 8
    /// USD price (1e8 fixed point) the oracle must strictly exceed
    pub target_price_usd: u64, // 8
    pub is_active: bool, // 1

    /// extra space
    pub reserved: [u64; 4],
}

impl Position {
    pub fn open(&mut self, balance: u64, target_price_usd: u64) {
        self.balance = balance;
        self.target_price_usd = target_price_usd;
        self.is_active = true;
    }

    /// Zeroes the record and hands back the held amount. Runs before any
    /// external transfer so a reentrant observer sees an empty position.
    pub fn clear(&mut self) -> u64 {
        let balance = self.balance;
        self.balance = 0;
        self.target_price_usd = 0;
        self.is_active = false;
        balance
    }

    pub fn is_consistent(&self) -> bool {
        (self.balance > 0) == self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sets_all_fields() {
        let mut position = Position::default();
        assert!(position.is_consistent());

        position.open(1_000, 2_000_00000000);
        assert_eq!(position.balance, 1_000);
        assert_eq!(position.target_price_usd, 2_000_00000000);
        assert!(position.is_active);
        assert!(position.is_consistent());
    }

    #[test]
    fn clear_returns_balance_and_zeroes_everything() {
        let mut position = Position::default();
        position.open(987_654_321, 1_500_00000000);

        let captured = position.clear();
        assert_eq!(captured, 987_654_321);
        assert_eq!(position.balance, 0);
        assert_eq!(position.target_price_usd, 0);
        assert!(!position.is_active);
        assert!(position.is_consistent());
    }

    #[test]
    fn position_reusable_after_clear() {
        let mut position = Position::default();
        position.open(10, 1);
        position.clear();

        position.open(20, 2);
        assert_eq!(position.balance, 20);
        assert_eq!(position.target_price_usd, 2);
        assert!(position.is_active);
    }

    #[test]
    fn clear_on_empty_position_is_zero() {
        let mut position = Position::default();
        assert_eq!(position.clear(), 0);
        assert!(position.is_consistent());
    }
}
