use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::{Ledger, TransactionKind};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One transaction as shown on a statement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementLine {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Local>,
}

impl std::fmt::Display for StatementLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: R$ {:.2}", self.kind, self.amount.round_dp(2))
    }
}

/// A snapshot of an account's transactions and balance
///
/// `{}` renders one line per transaction followed by the balance, `{:#}`
/// prefixes every transaction with the time it was recorded at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub lines: Vec<StatementLine>,
    pub balance: Decimal,
}

impl Statement {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let lines = ledger
            .entries()
            .map(|entry| StatementLine {
                kind: entry.kind(),
                amount: entry.amount().abs(),
                timestamp: entry.timestamp(),
            })
            .collect();

        Self {
            lines,
            balance: ledger.balance(),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            if f.alternate() {
                write!(f, "{} - ", line.timestamp.format(TIMESTAMP_FORMAT))?;
            }
            writeln!(f, "{}", line)?;
        }
        write!(f, "Balance: R$ {:.2}", self.balance)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(dec!(150), TransactionKind::Deposit);
        ledger.append(dec!(49.999), TransactionKind::Withdrawal);
        ledger
    }

    #[test]
    fn renders_lines_and_balance() {
        let statement = Statement::from_ledger(&ledger());

        assert_eq!(
            statement.to_string(),
            "Deposit: R$ 150.00\nWithdrawal: R$ 50.00\nBalance: R$ 100.00",
        );
    }

    #[test]
    fn empty_statement_shows_zero_balance() {
        let statement = Statement::from_ledger(&Ledger::new());

        assert!(statement.lines.is_empty());
        assert_eq!(statement.to_string(), "Balance: R$ 0.00");
    }

    #[test]
    fn alternate_form_prefixes_timestamps() {
        let statement = Statement::from_ledger(&ledger());
        let rendered = format!("{:#}", statement);
        let first = rendered.lines().next().unwrap();

        let expected = format!("{} - Deposit: R$ 150.00", statement.lines[0].timestamp.format(TIMESTAMP_FORMAT));
        assert_eq!(first, expected);
    }

    #[test]
    fn is_restartable() {
        let ledger = ledger();

        assert_eq!(Statement::from_ledger(&ledger), Statement::from_ledger(&ledger));
    }
}
