use rust_decimal::Decimal;

use crate::Ledger;

/// The limits withdrawals from an account are subject to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalLimits {
    /// The largest amount a single withdrawal may take out
    pub max_per_transaction: Decimal,
    /// The number of withdrawals an account may make
    ///
    /// Withdrawals are counted over the whole lifetime of the account, the
    /// count does not reset at the end of a calendar day.
    pub max_withdrawals_per_day: u32,
}

impl Default for WithdrawalLimits {
    fn default() -> Self {
        Self {
            max_per_transaction: Decimal::new(50000, 2),
            max_withdrawals_per_day: 3,
        }
    }
}

/// The result of evaluating a withdrawal against the withdrawal rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawalOutcome {
    Approved,
    /// The balance does not cover the amount
    InsufficientFunds,
    /// The amount is above [`WithdrawalLimits::max_per_transaction`]
    ExceedsPerTransactionCap,
    /// The account already made [`WithdrawalLimits::max_withdrawals_per_day`] withdrawals
    DailyLimitReached,
}

impl WithdrawalOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, WithdrawalOutcome::Approved)
    }
}

/// Decides whether `amount` may be withdrawn from an account
///
/// The rules are checked in order: balance, per-transaction cap, number of
/// withdrawals. The first failing rule determines the outcome.
pub fn can_withdraw(amount: Decimal, ledger: &Ledger, limits: &WithdrawalLimits) -> WithdrawalOutcome {
    if ledger.balance() < amount {
        return WithdrawalOutcome::InsufficientFunds;
    }

    if amount > limits.max_per_transaction {
        return WithdrawalOutcome::ExceedsPerTransactionCap;
    }

    let withdrawals = ledger.withdrawal_count();
    if withdrawals >= limits.max_withdrawals_per_day as usize {
        return WithdrawalOutcome::DailyLimitReached;
    }

    WithdrawalOutcome::Approved
}
