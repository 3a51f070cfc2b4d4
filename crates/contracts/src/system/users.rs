use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;

/// Роль пользователя системы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Guest,
}

impl Role {
    /// Гости только читают данные
    pub fn can_modify(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Guest => "GUEST",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" | "ADMINISTRATOR" => Ok(Role::Admin),
            "GUEST" => Ok(Role::Guest),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Пользователь системы (доступ к консоли), не связан с сотрудниками
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    pub id: String,
    pub login: String,
    pub role: Role,
    pub display_name: String,
    /// Хэш пароля в формате PHC (argon2)
    pub password_hash: String,
    pub created_at: String,
}

impl AggregateRoot for SystemUser {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn collection_name() -> &'static str {
        "access_users"
    }

    fn element_name() -> &'static str {
        "System user"
    }

    fn list_name() -> &'static str {
        "System users"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSystemUserDto {
    pub login: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
}
