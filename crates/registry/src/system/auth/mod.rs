pub mod password;

use contracts::system::auth::UserInfo;

use crate::shared::error::AuthError;

/// Only administrators may change data; guests are read-only
pub fn authorize_modification(user: &UserInfo, action: &str) -> Result<(), AuthError> {
    if user.role.can_modify() {
        return Ok(());
    }
    tracing::warn!("{} ({}) tried to {}", user.login, user.role, action);
    Err(AuthError::Forbidden {
        role: user.role.to_string(),
        action: action.to_string(),
    })
}
