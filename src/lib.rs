pub use self::{
    account::{Account, AccountError, AccountNumber, AccountSequence, AccountSummary, AGENCY},
    client::{Address, Client, ClientId, Profile, ProfileError},
    command::{Command, CommandType},
    directory::{Directory, DirectoryError},
    ledger::Ledger,
    policy::{can_withdraw, WithdrawalLimits, WithdrawalOutcome},
    statement::{Statement, StatementLine},
    transaction::{Operation, Transaction, TransactionKind},
};

mod account;
mod client;
mod command;
mod directory;
mod ledger;
mod policy;
mod statement;
mod transaction;
