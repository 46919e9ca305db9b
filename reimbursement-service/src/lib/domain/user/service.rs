use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected, username taken");
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: Role::Employee,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, username: &Username, password: &str) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            tracing::info!(username = %username, "Login failed, unknown username");
            return Err(UserError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login failed, password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn delete_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn stored_user(username: &str, password: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.role == Role::Employee
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            "p".to_string(),
        );

        let user = service.register(command).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.role, Role::Employee);
        assert_ne!(user.password_hash, "p");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("alice", "p", Role::Employee);
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            "other".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_storage_failure_propagates() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(UserError::StorageFailure("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository));

        let command = RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            "p".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::StorageFailure(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("bob", "secret", Role::Manager);
        let expected_id = existing.id;
        repository
            .expect_find_by_username()
            .withf(|u| u.as_str() == "bob")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("bob".to_string()).unwrap();
        let user = service.login(&username, "secret").await.unwrap();
        assert_eq!(user.id, expected_id);
        assert_eq!(user.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("bob", "secret", Role::Employee);
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("bob".to_string()).unwrap();
        let result = service.login(&username, "not-secret").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.login(&username, "secret").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
