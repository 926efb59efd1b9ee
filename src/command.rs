use rust_decimal::Decimal;

use crate::ClientId;

/// The operations a command script can request
#[derive(Clone, Copy, Debug, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Registers a new client
    Register,
    /// Opens a new account for a registered client
    Open,
    /// Deposits on one of the client's accounts
    Deposit,
    /// Withdraws from one of the client's accounts
    Withdrawal,
}

/// One line of a command script
///
/// Only the columns the command type needs have to be filled in.
/// `account` is the position of the account in the client's account list,
/// not the account number.
#[derive(Debug, serde::Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    command_type: CommandType,
    client: ClientId,
    account: Option<usize>,
    amount: Option<Decimal>,
    name: Option<String>,
    birth_date: Option<String>,
    address: Option<String>,
}

impl Command {
    /// The type of the command
    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// The client the command is issued by
    pub fn client(&self) -> &ClientId {
        &self.client
    }

    /// The selected account, for deposits and withdrawals
    pub fn account(&self) -> Option<usize> {
        self.account
    }

    /// The amount, for deposits and withdrawals
    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
