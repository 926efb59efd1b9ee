use std::sync::atomic::{AtomicU32, Ordering};

use rust_decimal::Decimal;

use crate::{
    client::ClientId,
    ledger::{Ledger, BALANCE_SCALE},
    policy::{self, WithdrawalLimits, WithdrawalOutcome},
    statement::Statement,
    transaction::Operation,
};

/// The branch code every account belongs to
pub const AGENCY: &str = "0001";

/// Possible errors to occur during account operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("The amount has to be positive")]
    InvalidAmount,
    #[error("The account does not hold enough funds")]
    InsufficientFunds,
    #[error("A single withdrawal may not exceed R$ {limit:.2}")]
    ExceedsPerTransactionCap { limit: Decimal },
    #[error("The account reached its limit of {limit} withdrawals")]
    DailyLimitReached { limit: u32 },
    #[error("The amount would overflow the balance")]
    BalanceOverflow,
}

impl AccountError {
    /// The withdrawal outcome this error was caused by, if any
    pub fn outcome(&self) -> Option<WithdrawalOutcome> {
        match self {
            AccountError::InvalidAmount | AccountError::BalanceOverflow => None,
            AccountError::InsufficientFunds => Some(WithdrawalOutcome::InsufficientFunds),
            AccountError::ExceedsPerTransactionCap { .. } => Some(WithdrawalOutcome::ExceedsPerTransactionCap),
            AccountError::DailyLimitReached { .. } => Some(WithdrawalOutcome::DailyLimitReached),
        }
    }
}

/// The unique number of an account
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountNumber(u32);

impl AccountNumber {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for AccountNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl std::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Hands out account numbers
///
/// Numbers start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct AccountSequence {
    next: AtomicU32,
}

impl AccountSequence {
    pub fn new() -> Self {
        Self { next: AtomicU32::new(1) }
    }

    /// Takes the next free number
    pub fn next(&self) -> AccountNumber {
        AccountNumber(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AccountSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// A checking account
///
/// The account keeps all its transactions in a [`Ledger`] and derives its
/// balance from it. Withdrawals have to pass the rules in [`policy`] first,
/// rejected operations leave the account untouched.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    owner: ClientId,
    ledger: Ledger,
    limits: WithdrawalLimits,
    withdrawals: u32,
}

impl Account {
    /// Opens a new, empty account for `owner`
    pub fn open(number: AccountNumber, owner: ClientId, limits: WithdrawalLimits) -> Self {
        Self {
            number,
            owner,
            ledger: Ledger::new(),
            limits,
            withdrawals: 0,
        }
    }

    /// The number of the account
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// The branch the account belongs to
    pub fn agency(&self) -> &'static str {
        AGENCY
    }

    /// The identifier of the client holding the account
    pub fn owner(&self) -> &ClientId {
        &self.owner
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn limits(&self) -> &WithdrawalLimits {
        &self.limits
    }

    /// The number of successful withdrawals
    pub fn withdrawals_today(&self) -> u32 {
        self.withdrawals
    }

    /// The current balance, see [`Ledger::balance`]
    pub fn balance(&self) -> Decimal {
        self.ledger.balance()
    }

    /// Deposits the specified amount and returns the new balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.apply(Operation::Deposit(amount))
    }

    /// Withdraws the specified amount and returns the new balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.apply(Operation::Withdrawal(amount))
    }

    /// Applies an operation and records it on success
    ///
    /// Returns the new balance. On failure neither the ledger nor the
    /// withdrawal counter are modified.
    pub fn apply(&mut self, operation: Operation) -> Result<Decimal, AccountError> {
        let amount = operation.amount();
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }

        // every later balance fold adds this entry, so it has to fit
        self.ledger
            .balance()
            .checked_add(operation.signed_amount())
            .ok_or(AccountError::BalanceOverflow)?;

        if let Operation::Withdrawal(_) = operation {
            match policy::can_withdraw(amount, &self.ledger, &self.limits) {
                WithdrawalOutcome::Approved => self.withdrawals += 1,
                WithdrawalOutcome::InsufficientFunds => return Err(AccountError::InsufficientFunds),
                WithdrawalOutcome::ExceedsPerTransactionCap => {
                    return Err(AccountError::ExceedsPerTransactionCap {
                        limit: self.limits.max_per_transaction,
                    });
                }
                WithdrawalOutcome::DailyLimitReached => {
                    return Err(AccountError::DailyLimitReached {
                        limit: self.limits.max_withdrawals_per_day,
                    });
                }
            }
        }

        self.ledger.append(amount, operation.kind());
        let balance = self.ledger.balance();
        tracing::debug!(account = %self.number, kind = %operation.kind(), %amount, %balance, "recorded transaction");

        Ok(balance)
    }

    /// The statement of all transactions and the current balance
    pub fn statement(&self) -> Statement {
        Statement::from_ledger(&self.ledger)
    }

    /// A flat summary of the account, used for reports
    pub fn summary(&self) -> AccountSummary {
        let mut balance = self.balance();
        balance.rescale(BALANCE_SCALE);

        AccountSummary {
            client: self.owner.clone(),
            agency: AGENCY.to_owned(),
            account: self.number,
            balance,
            withdrawals: self.withdrawals,
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Agency:\t{}", self.agency())?;
        write!(f, "Account:\t{}", self.number)
    }
}

/// One row of the account report
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    pub client: ClientId,
    pub agency: String,
    pub account: AccountNumber,
    pub balance: Decimal,
    pub withdrawals: u32,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TransactionKind;

    fn account() -> Account {
        Account::open(AccountNumber(1), ClientId::normalize("123.456.789-00"), WithdrawalLimits::default())
    }

    #[test]
    fn deposit_returns_new_balance() {
        let mut account = account();

        assert_eq!(account.deposit(dec!(1000.00)), Ok(dec!(1000.00)));
        assert_eq!(account.deposit(dec!(0.50)), Ok(dec!(1000.50)));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut account = account();

        assert_eq!(account.deposit(dec!(0)), Err(AccountError::InvalidAmount));
        assert_eq!(account.deposit(dec!(-5)), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(dec!(0)), Err(AccountError::InvalidAmount));
        assert!(account.ledger().is_empty());
    }

    #[test]
    fn drains_to_zero_then_insufficient() {
        let mut account = account();

        assert_eq!(account.deposit(dec!(1000.00)), Ok(dec!(1000.00)));
        assert_eq!(account.withdraw(dec!(500.00)), Ok(dec!(500.00)));
        assert_eq!(account.withdraw(dec!(500.00)), Ok(dec!(0.00)));
        assert_eq!(account.withdraw(dec!(500.00)), Err(AccountError::InsufficientFunds));
        assert_eq!(account.balance(), dec!(0.00));
    }

    #[test]
    fn insufficient_funds_leaves_account_unchanged() {
        let mut account = account();
        account.deposit(dec!(100)).unwrap();

        for _ in 0..2 {
            assert_eq!(account.withdraw(dec!(100.01)), Err(AccountError::InsufficientFunds));
            assert_eq!(account.balance(), dec!(100));
            assert_eq!(account.ledger().len(), 1);
            assert_eq!(account.withdrawals_today(), 0);
        }
    }

    #[test]
    fn cap_rejects_with_sufficient_balance() {
        let mut account = account();
        account.deposit(dec!(1000.00)).unwrap();

        let err = account.withdraw(dec!(600.00)).unwrap_err();
        assert_eq!(err, AccountError::ExceedsPerTransactionCap { limit: dec!(500.00) });
        assert_eq!(err.outcome(), Some(WithdrawalOutcome::ExceedsPerTransactionCap));
        assert_eq!(account.balance(), dec!(1000.00));
    }

    #[test]
    fn fourth_withdrawal_hits_daily_limit() {
        let mut account = account();
        account.deposit(dec!(2000.00)).unwrap();

        for _ in 0..3 {
            account.withdraw(dec!(100.00)).unwrap();
        }

        assert_eq!(account.withdraw(dec!(100.00)), Err(AccountError::DailyLimitReached { limit: 3 }));
        assert_eq!(account.balance(), dec!(1700.00));
        assert_eq!(account.withdrawals_today(), 3);
    }

    #[test]
    fn rejected_withdrawals_do_not_count() {
        let mut account = account();
        account.deposit(dec!(300)).unwrap();

        account.withdraw(dec!(600)).unwrap_err();
        account.withdraw(dec!(100)).unwrap();
        account.withdraw(dec!(100)).unwrap();
        account.withdraw(dec!(100)).unwrap();

        assert_eq!(account.withdrawals_today(), 3);
        assert_eq!(account.balance(), dec!(0));
    }

    #[test]
    fn overflowing_deposit_is_rejected() {
        let mut account = account();
        account.deposit(Decimal::MAX).unwrap();

        assert_eq!(account.deposit(dec!(1)), Err(AccountError::BalanceOverflow));
        assert_eq!(account.ledger().len(), 1);
        assert_eq!(account.balance(), Decimal::MAX);

        // the account stays usable
        assert_eq!(account.withdraw(dec!(500)), Ok(Decimal::MAX - dec!(500)));
        assert_eq!(account.statement().lines.len(), 2);
    }

    #[test]
    fn apply_records_kind() {
        let mut account = account();
        account.apply(Operation::Deposit(dec!(10))).unwrap();
        account.apply(Operation::Withdrawal(dec!(4))).unwrap();

        let kinds = account.ledger().entries().map(|entry| entry.kind()).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::Withdrawal]);
    }

    #[test]
    fn sequence_starts_at_one_and_never_repeats() {
        let sequence = AccountSequence::new();

        assert_eq!(sequence.next(), AccountNumber(1));
        assert_eq!(sequence.next(), AccountNumber(2));
        assert_eq!(sequence.next(), AccountNumber(3));
    }

    #[test]
    fn summary_and_confirmation() {
        let mut account = account();
        account.deposit(dec!(12.5)).unwrap();

        let summary = account.summary();
        assert_eq!(summary.agency, "0001");
        assert_eq!(summary.balance.to_string(), "12.50");
        assert_eq!(account.to_string(), "Agency:\t0001\nAccount:\t1");
    }
}
