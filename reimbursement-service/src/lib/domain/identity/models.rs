use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Who a verified token says the caller is.
///
/// The role is a snapshot taken at login; authorization decisions look the
/// current role up again instead of trusting this copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.as_str().to_string(),
            role: user.role,
        }
    }
}
