use serde::{Deserialize, Serialize};

use crate::system::users::{Role, SystemUser};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Authenticated user as seen by callers; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub login: String,
    pub display_name: String,
    pub role: Role,
}

impl From<&SystemUser> for UserInfo {
    fn from(user: &SystemUser) -> Self {
        Self {
            id: user.id.clone(),
            login: user.login.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
        }
    }
}
