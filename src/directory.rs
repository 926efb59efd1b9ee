use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::Entry;

use rust_decimal::Decimal;

use crate::{
    Account, AccountError, AccountNumber, AccountSequence, Client, ClientId, Command, CommandType,
    Profile, ProfileError, Statement, WithdrawalLimits,
};

/// Possible errors to occur during directory operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
    #[error("There's no client with this identifier")]
    ClientNotFound,
    #[error("The referenced account was not found")]
    AccountNotFound,
    #[error("There's already a client with the same identifier")]
    DuplicateIdentity,
    #[error("The command is missing the `{0}` field")]
    MissingField(&'static str),
}

/// The registry of all clients and their accounts
///
/// The directory owns the account number sequence, so numbers are unique
/// across all clients. Every account it opens gets the same withdrawal
/// limits.
#[derive(Debug, Default)]
pub struct Directory {
    /// All registered clients by identifier
    clients: HashMap<ClientId, Client>,
    /// All accounts by number
    accounts: BTreeMap<AccountNumber, Account>,
    sequence: AccountSequence,
    limits: WithdrawalLimits,
}

impl Directory {
    /// Creates a new, empty directory with the default withdrawal limits
    pub fn new() -> Self {
        Self::with_limits(WithdrawalLimits::default())
    }

    /// Creates a new, empty directory opening accounts with `limits`
    pub fn with_limits(limits: WithdrawalLimits) -> Self {
        Self {
            clients: HashMap::new(),
            accounts: BTreeMap::new(),
            sequence: AccountSequence::new(),
            limits,
        }
    }

    /// Registers a new client
    pub fn create_client(&mut self, profile: Profile) -> Result<ClientId, DirectoryError> {
        match self.clients.entry(profile.id.clone()) {
            Entry::Vacant(v) => {
                let id = profile.id.clone();
                tracing::info!(client = %id, "registered client");
                v.insert(Client::new(profile));
                Ok(id)
            }
            Entry::Occupied(_) => Err(DirectoryError::DuplicateIdentity),
        }
    }

    pub fn find_client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    /// Like [`Directory::find_client`], but fails for unknown clients
    pub fn client(&self, id: &ClientId) -> Result<&Client, DirectoryError> {
        self.find_client(id).ok_or(DirectoryError::ClientNotFound)
    }

    /// Opens a new account for a registered client
    ///
    /// No account number is used up if the client is unknown.
    pub fn create_account(&mut self, client_id: &ClientId) -> Result<&Account, DirectoryError> {
        let client = self.clients
            .get_mut(client_id)
            .ok_or(DirectoryError::ClientNotFound)?;
        let number = self.sequence.next();
        client.add_account(number);
        tracing::info!(client = %client_id, account = %number, "opened account");

        let account = Account::open(number, client_id.clone(), self.limits);
        Ok(self.accounts.entry(number).or_insert(account))
    }

    /// The accounts of a client in the order they were opened
    pub fn list_accounts(&self, client_id: &ClientId) -> Result<Vec<&Account>, DirectoryError> {
        self.client(client_id)?
            .accounts()
            .iter()
            .map(|number| self.account(*number))
            .collect()
    }

    /// Resolves the `index`th account of a client
    pub fn select_account(&self, client_id: &ClientId, index: usize) -> Result<AccountNumber, DirectoryError> {
        self.client(client_id)?
            .accounts()
            .get(index)
            .copied()
            .ok_or(DirectoryError::AccountNotFound)
    }

    pub fn account(&self, number: AccountNumber) -> Result<&Account, DirectoryError> {
        self.accounts.get(&number).ok_or(DirectoryError::AccountNotFound)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, DirectoryError> {
        self.accounts.get_mut(&number).ok_or(DirectoryError::AccountNotFound)
    }

    /// All accounts ordered by number
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Deposits on an account and returns its new balance
    pub fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<Decimal, DirectoryError> {
        Ok(self.account_mut(number)?.deposit(amount)?)
    }

    /// Withdraws from an account and returns its new balance
    pub fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<Decimal, DirectoryError> {
        Ok(self.account_mut(number)?.withdraw(amount)?)
    }

    pub fn statement(&self, number: AccountNumber) -> Result<Statement, DirectoryError> {
        Ok(self.account(number)?.statement())
    }

    /// Processes one command of a command script
    pub fn handle_command(&mut self, command: Command) -> Result<(), DirectoryError> {
        match command.command_type() {
            CommandType::Register => {
                let profile = Profile::parse(
                    command.client().as_str(),
                    command.name().ok_or(DirectoryError::MissingField("name"))?,
                    command.birth_date().ok_or(DirectoryError::MissingField("birth_date"))?,
                    command.address().ok_or(DirectoryError::MissingField("address"))?,
                )?;
                self.create_client(profile)?;
            }
            CommandType::Open => {
                self.create_account(command.client())?;
            }
            CommandType::Deposit => {
                let (number, amount) = self.resolve_transfer(&command)?;
                self.deposit(number, amount)?;
            }
            CommandType::Withdrawal => {
                let (number, amount) = self.resolve_transfer(&command)?;
                self.withdraw(number, amount)?;
            }
        }

        Ok(())
    }

    /// The account number and amount of a deposit or withdrawal command
    fn resolve_transfer(&self, command: &Command) -> Result<(AccountNumber, Decimal), DirectoryError> {
        let index = command.account().ok_or(DirectoryError::MissingField("account"))?;
        let amount = command.amount().ok_or(DirectoryError::MissingField("amount"))?;
        let number = self.select_account(command.client(), index)?;

        Ok((number, amount))
    }
}
