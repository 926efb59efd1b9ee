use chrono::Local;
use rust_decimal::Decimal;

use crate::{Transaction, TransactionKind};

/// The number of decimal places the balance is rounded to after every step
pub const BALANCE_SCALE: u32 = 2;

/// An append-only record of the transactions of one account
///
/// The ledger keeps no running balance. The balance is always derived from
/// the recorded transactions, see [`Ledger::balance`].
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    /// Creates a new, empty ledger
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Records a transaction stamped with the current local time
    ///
    /// The amount is not validated here, callers have to make sure it is
    /// positive and permitted.
    pub fn append(&mut self, amount: Decimal, kind: TransactionKind) -> &Transaction {
        let index = self.entries.len();
        self.entries.push(Transaction::new(kind, amount, Local::now()));

        &self.entries[index]
    }

    /// The current balance
    ///
    /// The signed amounts are summed up in insertion order and the running
    /// sum is rounded to two decimal places after each addition.
    pub fn balance(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |balance, entry| {
                (balance + entry.signed_amount()).round_dp(BALANCE_SCALE)
            })
    }

    /// All transactions in the order they were recorded
    pub fn entries(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    /// The number of recorded withdrawals
    pub fn withdrawal_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind() == TransactionKind::Withdrawal)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_balance_is_zero() {
        let ledger = Ledger::new();

        assert_eq!(ledger.balance(), dec!(0.00));
        assert!(ledger.is_empty());
        assert_eq!(ledger.entries().count(), 0);
    }

    #[test]
    fn balance_nets_deposits_and_withdrawals() {
        let mut ledger = Ledger::new();
        ledger.append(dec!(100.00), TransactionKind::Deposit);
        ledger.append(dec!(30.25), TransactionKind::Withdrawal);
        ledger.append(dec!(0.75), TransactionKind::Deposit);

        assert_eq!(ledger.balance(), dec!(70.50));
        assert_eq!(ledger.withdrawal_count(), 1);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn balance_rounds_after_every_step() {
        let mut ledger = Ledger::new();
        ledger.append(dec!(0.005), TransactionKind::Deposit);
        ledger.append(dec!(0.005), TransactionKind::Deposit);

        // rounding only the final sum would yield 0.01
        assert_eq!(ledger.balance(), dec!(0.00));
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(dec!(1), TransactionKind::Deposit);
        ledger.append(dec!(2), TransactionKind::Withdrawal);
        ledger.append(dec!(3), TransactionKind::Deposit);

        let amounts = ledger.entries().map(Transaction::amount).collect::<Vec<_>>();
        assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);

        // the view can be restarted
        let again = (&ledger).into_iter().map(Transaction::amount).collect::<Vec<_>>();
        assert_eq!(amounts, again);
    }

    proptest! {
        #[test]
        fn deposit_balance_matches_stepwise_sum(mills in prop::collection::vec(1u32..1_000_000, 0..50)) {
            let mut ledger = Ledger::new();
            let mut expected = Decimal::ZERO;

            for mill in mills {
                let amount = Decimal::new(i64::from(mill), 3);
                ledger.append(amount, TransactionKind::Deposit);
                expected = (expected + amount).round_dp(2);
            }

            prop_assert_eq!(ledger.balance(), expected);
        }
    }
}
