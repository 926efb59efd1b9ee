use chrono::{DateTime, Local};
use rust_decimal::Decimal;

/// The kinds of transactions an account records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    /// A credit to the account
    Deposit,
    /// A debit from the account
    Withdrawal,
}

impl TransactionKind {
    /// The label used when rendering statements
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded transaction
///
/// Transactions are created once by the [`Ledger`](crate::Ledger) and never
/// change afterwards. The amount is always the positive amount requested by
/// the client, the direction is carried by the kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Local>,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal, timestamp: DateTime<Local>) -> Self {
        Self { kind, amount, timestamp }
    }

    /// The kind of the transaction
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount as requested, always positive
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The net effect on the balance
    /// Withdrawals are negative
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }

    /// The local time the transaction was recorded at
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// An operation a client requests on one of their accounts
///
/// See [`Account::apply`](crate::Account::apply).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Deposit(Decimal),
    Withdrawal(Decimal),
}

impl Operation {
    /// The kind of transaction this operation records on success
    pub fn kind(&self) -> TransactionKind {
        match self {
            Operation::Deposit(_) => TransactionKind::Deposit,
            Operation::Withdrawal(_) => TransactionKind::Withdrawal,
        }
    }

    /// The requested amount
    pub fn amount(&self) -> Decimal {
        match *self {
            Operation::Deposit(amount) | Operation::Withdrawal(amount) => amount,
        }
    }

    /// The effect on the balance if the operation succeeds
    pub fn signed_amount(&self) -> Decimal {
        match *self {
            Operation::Deposit(amount) => amount,
            Operation::Withdrawal(amount) => -amount,
        }
    }
}
