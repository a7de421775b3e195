//! Account entity and related types

use serde::{Deserialize, Serialize};

use super::super::DomainError;

/// Account identifier - assigned by the store at insert time, immutable after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a path-level identifier. Anything that is not a plain integer
    /// is rejected before it can reach the store.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a numeric account ID", raw)))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted identity record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    id: AccountId,
    firstname: String,
    lastname: String,
    middlename: String,
    email: String,
    /// Bcrypt hash of the account secret - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
}

impl Account {
    pub fn new(
        id: AccountId,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        middlename: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            middlename: middlename.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    // Getters

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn middlename(&self) -> &str {
        &self.middlename
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Merge a partial update into this record. Only fields present in
    /// `changes` are touched; everything else keeps its stored value.
    pub fn apply(&mut self, changes: &AccountChanges) {
        if let Some(firstname) = &changes.firstname {
            self.firstname = firstname.clone();
        }
        if let Some(lastname) = &changes.lastname {
            self.lastname = lastname.clone();
        }
        if let Some(middlename) = &changes.middlename {
            self.middlename = middlename.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            self.password_hash = password_hash.clone();
        }
    }
}

/// Pre-insert draft. The store assigns the ID; the service sets the hash.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub email: String,
    pub password_hash: String,
}

/// Field-level partial update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.middlename.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        Account::new(
            AccountId::new(1),
            "Ada",
            "Byron",
            "L",
            "ada@x.io",
            "$2b$10$stored_hash",
        )
    }

    #[test]
    fn test_account_id_parse_valid() {
        assert_eq!(AccountId::parse("42").unwrap(), AccountId::new(42));
        assert_eq!(AccountId::parse(" 7 ").unwrap(), AccountId::new(7));
    }

    #[test]
    fn test_account_id_parse_invalid() {
        assert!(AccountId::parse("abc").is_err());
        assert!(AccountId::parse("12abc").is_err());
        assert!(AccountId::parse("").is_err());
        assert!(AccountId::parse("1.5").is_err());
    }

    #[test]
    fn test_account_getters() {
        let account = create_test_account();

        assert_eq!(account.id(), AccountId::new(1));
        assert_eq!(account.firstname(), "Ada");
        assert_eq!(account.lastname(), "Byron");
        assert_eq!(account.middlename(), "L");
        assert_eq!(account.email(), "ada@x.io");
        assert_eq!(account.password_hash(), "$2b$10$stored_hash");
    }

    #[test]
    fn test_serialization_excludes_password_hash() {
        let account = create_test_account();

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("stored_hash"));
        assert!(json.contains("\"email\":\"ada@x.io\""));
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut account = create_test_account();
        let before = account.clone();

        account.apply(&AccountChanges {
            firstname: Some("Augusta".to_string()),
            ..Default::default()
        });

        assert_eq!(account.firstname(), "Augusta");
        assert_eq!(account.lastname(), before.lastname());
        assert_eq!(account.middlename(), before.middlename());
        assert_eq!(account.email(), before.email());
        assert_eq!(account.password_hash(), before.password_hash());
    }

    #[test]
    fn test_apply_all_fields() {
        let mut account = create_test_account();

        account.apply(&AccountChanges {
            firstname: Some("Grace".to_string()),
            lastname: Some("Hopper".to_string()),
            middlename: Some("B".to_string()),
            email: Some("grace@x.io".to_string()),
            password_hash: Some("$2b$10$new_hash".to_string()),
        });

        assert_eq!(account.firstname(), "Grace");
        assert_eq!(account.lastname(), "Hopper");
        assert_eq!(account.middlename(), "B");
        assert_eq!(account.email(), "grace@x.io");
        assert_eq!(account.password_hash(), "$2b$10$new_hash");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(AccountChanges::default().is_empty());
        assert!(!AccountChanges {
            email: Some("a@b.co".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
