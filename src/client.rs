use chrono::NaiveDate;

use crate::AccountNumber;

const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Possible errors to occur while reading client profiles
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("The client identifier is empty")]
    EmptyIdentifier,
    #[error("The birth date `{0}` is not formatted as dd/mm/yyyy")]
    BirthDate(String),
    #[error("The address `{0}` is not formatted as `street - district - city/state`")]
    Address(String),
}

/// The unique identifier of a client
///
/// Identifiers are national tax ids with all punctuation and whitespace
/// removed, so `123.456.789-00` and `12345678900` name the same client.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn normalize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ClientId {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for ClientId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A postal address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}/{}", self.street, self.district, self.city, self.state)
    }
}

impl std::str::FromStr for Address {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProfileError::Address(s.to_owned());
        let filled = |part: &str| {
            let part = part.trim();
            (!part.is_empty()).then(|| part.to_owned())
        };

        let mut parts = s.splitn(3, " - ");
        let street = parts.next().and_then(filled).ok_or_else(invalid)?;
        let district = parts.next().and_then(filled).ok_or_else(invalid)?;
        let (city, state) = parts
            .next()
            .and_then(|rest| rest.rsplit_once('/'))
            .ok_or_else(invalid)?;

        Ok(Self {
            street,
            district,
            city: filled(city).ok_or_else(invalid)?,
            state: filled(state).ok_or_else(invalid)?,
        })
    }
}

/// The personal data a client registers with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: ClientId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: Address,
}

impl Profile {
    /// Builds a profile from the raw values a client entered
    pub fn parse(id: &str, name: &str, birth_date: &str, address: &str) -> Result<Self, ProfileError> {
        let id = ClientId::normalize(id);
        if id.is_empty() {
            return Err(ProfileError::EmptyIdentifier);
        }

        let birth_date = NaiveDate::parse_from_str(birth_date.trim(), BIRTH_DATE_FORMAT)
            .map_err(|_| ProfileError::BirthDate(birth_date.to_owned()))?;

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            birth_date,
            address: address.parse()?,
        })
    }
}

/// A registered client and the accounts they hold
#[derive(Clone, Debug)]
pub struct Client {
    profile: Profile,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub(crate) fn new(profile: Profile) -> Self {
        Self {
            profile,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> &ClientId {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The numbers of the client's accounts in the order they were opened
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub(crate) fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }
}
