use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new employee account.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Created user entity with a hashed password and role `Employee`
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `StorageFailure` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check a username and password pair.
    ///
    /// # Returns
    /// The matching user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `StorageFailure` - Store operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StorageFailure` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user records (the credential store).
///
/// Lookups and deletes report absence as `None`, never as an error. The store
/// does not guarantee username uniqueness on its own; callers check first.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - A backing unique index rejected the insert
    /// * `StorageFailure` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Remove user by identifier, returning the removed record.
    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Remove user by username, returning the removed record.
    async fn delete_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
