//! Account service: validation, hashing, and persistence orchestration
//!
//! Every write goes validate -> hash -> persist, in that order, so a failed
//! validation or hash leaves no partial record behind. Secrets are hashed
//! here and nowhere else; stored hashes never travel outward.

use std::sync::Arc;

use crate::domain::account::repository::{AccountFilter, AccountPage, Pagination};
use crate::domain::account::validation::{
    collect_create_violations, collect_update_violations,
};
use crate::domain::{Account, AccountChanges, AccountId, AccountRepository, DomainError, NewAccount};

use super::password::PasswordHasher;

/// Payload for creating a new account. All fields required.
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub email: String,
    pub password: String,
}

/// Payload for a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account service over a repository and a credential hasher
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher> AccountService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Validate, hash the secret, and insert. Email collisions are
    /// arbitrated by the store, not checked here first.
    pub async fn create(&self, request: CreateAccountRequest) -> Result<Account, DomainError> {
        let violations = collect_create_violations(
            &request.firstname,
            &request.lastname,
            &request.middlename,
            &request.email,
            &request.password,
        );

        if !violations.is_empty() {
            return Err(DomainError::validation(
                violations.iter().map(|v| v.to_string()).collect(),
            ));
        }

        let password_hash = self.hasher.hash(&request.password).await?;

        self.repository
            .insert(NewAccount {
                firstname: request.firstname,
                lastname: request.lastname,
                middlename: request.middlename,
                email: request.email,
                password_hash,
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Account>, DomainError> {
        let account_id = AccountId::parse(id)?;
        self.repository.find_by_id(account_id).await
    }

    pub async fn list(
        &self,
        filter: AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError> {
        self.repository.find_page(&filter, pagination).await
    }

    /// Merge the present fields into the stored record. A present password
    /// is hashed to a fresh credential hash; an empty or omitted password
    /// leaves the stored hash unchanged. Never creates a record.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAccountRequest,
    ) -> Result<Account, DomainError> {
        let account_id = AccountId::parse(id)?;

        // Empty-string secrets count as omitted, matching the legacy check
        let password = request.password.as_deref().filter(|p| !p.is_empty());

        let violations = collect_update_violations(
            request.firstname.as_deref(),
            request.lastname.as_deref(),
            request.middlename.as_deref(),
            request.email.as_deref(),
            password,
        );

        if !violations.is_empty() {
            return Err(DomainError::validation(
                violations.iter().map(|v| v.to_string()).collect(),
            ));
        }

        let password_hash = match password {
            Some(secret) => Some(self.hasher.hash(secret).await?),
            None => None,
        };

        self.repository
            .update(
                account_id,
                AccountChanges {
                    firstname: request.firstname,
                    lastname: request.lastname,
                    middlename: request.middlename,
                    email: request.email,
                    password_hash,
                },
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let account_id = AccountId::parse(id)?;
        self.repository.delete(account_id).await
    }

    /// Look the account up by email and check the secret against the stored
    /// hash. An unknown email is a distinct `NotFound`; a wrong secret and
    /// any internal verify failure both read as `false`.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", email)))?;

        Ok(self.hasher.verify(password, account.password_hash()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::account::password::BcryptHasher;
    use crate::infrastructure::account::repository::InMemoryAccountRepository;

    fn create_service() -> AccountService<InMemoryAccountRepository, BcryptHasher> {
        let repository = Arc::new(InMemoryAccountRepository::new());
        // Minimum cost keeps the tests fast
        let hasher = Arc::new(BcryptHasher::with_work_factor(4));
        AccountService::new(repository, hasher)
    }

    fn make_request(firstname: &str, email: &str, password: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            firstname: firstname.to_string(),
            lastname: "Byron".to_string(),
            middlename: "L".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_account() {
        let service = create_service();

        let account = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        assert_eq!(account.firstname(), "Ada");
        assert_eq!(account.email(), "ada@x.io");
        assert_eq!(account.id().as_i64(), 1);
    }

    #[tokio::test]
    async fn test_created_account_stores_a_hash_not_the_secret() {
        let service = create_service();

        let account = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        assert_ne!(account.password_hash(), "secret1");

        // Nothing resembling the secret in the serialized form either
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret1"));
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn test_create_collects_all_violations() {
        let service = create_service();

        let result = service
            .create(CreateAccountRequest {
                firstname: String::new(),
                lastname: String::new(),
                middlename: "L".to_string(),
                email: "nope".to_string(),
                password: "123".to_string(),
            })
            .await;

        match result {
            Err(DomainError::Validation { messages }) => {
                assert_eq!(messages.len(), 4);
                assert!(messages[0].contains("firstname"));
                assert!(messages[1].contains("lastname"));
                assert!(messages[2].contains("email"));
                assert!(messages[3].contains("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = create_service();

        service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        let result = service
            .create(make_request("Other", "ada@x.io", "secret2"))
            .await;

        assert_eq!(result, Err(DomainError::duplicate_email("ada@x.io")));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_email_admit_exactly_one() {
        let service = create_service();

        // The service does no check-then-insert of its own; the store
        // arbitrates, so concurrent creates still admit at most one.
        let (first, second) = tokio::join!(
            service.create(make_request("Ada", "ada@x.io", "secret1")),
            service.create(make_request("Rival", "ada@x.io", "secret2")),
        );

        let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let loser = if first.is_err() { first } else { second };
        assert_eq!(
            loser.unwrap_err(),
            DomainError::duplicate_email("ada@x.io")
        );

        let page = service
            .list(AccountFilter::new(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_failed_validation_leaves_no_record() {
        let service = create_service();

        let result = service
            .create(make_request("Ada", "ada@x.io", "123"))
            .await;
        assert!(result.is_err());

        let page = service
            .list(AccountFilter::new(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let service = create_service();

        let result = service.get("abc").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_and_existing() {
        let service = create_service();

        assert!(service.get("42").await.unwrap().is_none());

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        let fetched = service
            .get(&created.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_with_filter_and_pagination() {
        let service = create_service();

        service
            .create(make_request("Anna", "anna@x.io", "secret1"))
            .await
            .unwrap();
        service
            .create(make_request("Annabel", "annabel@x.io", "secret1"))
            .await
            .unwrap();
        service
            .create(make_request("Grace", "grace@x.io", "secret1"))
            .await
            .unwrap();

        let page = service
            .list(
                AccountFilter::new().with_firstname("Ann"),
                Pagination::new(1, 1),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.accounts.len(), 1);
        assert_eq!(page.accounts[0].firstname(), "Anna");
    }

    #[tokio::test]
    async fn test_update_touches_only_present_fields() {
        let service = create_service();

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        let updated = service
            .update(
                &created.id().to_string(),
                UpdateAccountRequest {
                    firstname: Some("Augusta".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.firstname(), "Augusta");
        assert_eq!(updated.lastname(), created.lastname());
        assert_eq!(updated.middlename(), created.middlename());
        assert_eq!(updated.email(), created.email());
        // The credential hash is bit-identical when no password was sent
        assert_eq!(updated.password_hash(), created.password_hash());
    }

    #[tokio::test]
    async fn test_update_password_rotates_the_hash() {
        let service = create_service();

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();
        let id = created.id().to_string();

        let updated = service
            .update(
                &id,
                UpdateAccountRequest {
                    password: Some("newsecret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.password_hash(), created.password_hash());
        assert!(service.verify_credentials("ada@x.io", "newsecret").await.unwrap());
        assert!(!service.verify_credentials("ada@x.io", "secret1").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_empty_password_leaves_hash_unchanged() {
        let service = create_service();

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        let updated = service
            .update(
                &created.id().to_string(),
                UpdateAccountRequest {
                    password: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.password_hash(), created.password_hash());
        assert!(service.verify_credentials("ada@x.io", "secret1").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_present_fields() {
        let service = create_service();

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        let result = service
            .update(
                &created.id().to_string(),
                UpdateAccountRequest {
                    firstname: Some(String::new()),
                    email: Some("broken".to_string()),
                    ..Default::default()
                },
            )
            .await;

        match result {
            Err(DomainError::Validation { messages }) => assert_eq!(messages.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_account_is_not_an_upsert() {
        let service = create_service();

        let result = service
            .update(
                "42",
                UpdateAccountRequest {
                    firstname: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let page = service
            .list(AccountFilter::new(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();

        let created = service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();
        let id = created.id().to_string();

        assert!(service.delete(&id).await.unwrap());
        assert!(!service.delete(&id).await.unwrap());
        assert!(matches!(
            service.delete("abc").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let service = create_service();

        service
            .create(make_request("Ada", "ada@x.io", "secret1"))
            .await
            .unwrap();

        assert!(service.verify_credentials("ada@x.io", "secret1").await.unwrap());
        assert!(!service.verify_credentials("ada@x.io", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let service = create_service();

        let result = service.verify_credentials("ghost@x.io", "secret1").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
