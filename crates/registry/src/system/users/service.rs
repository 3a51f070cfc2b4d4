use anyhow::Result;
use contracts::domain::common::AggregateRoot;
use contracts::system::auth::{LoginRequest, UserInfo};
use contracts::system::users::{CreateSystemUserDto, Role, SystemUser};

use super::repository::SystemUserRepository;
use crate::shared::clock::Clock;
use crate::shared::data::BlobStore;
use crate::shared::error::{AuthError, DuplicateField, StoreError};
use crate::shared::ids::IdGenerator;
use crate::system::auth::password;

pub const DEFAULT_ADMIN_LOGIN: &str = "ADMIN";
pub const DEFAULT_ADMIN_PASSWORD: &str = "123";

/// Console access accounts (administrator or guest)
pub struct SystemUserService<'a> {
    repository: SystemUserRepository<'a>,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> SystemUserService<'a> {
    pub fn new(
        store: &'a dyn BlobStore,
        key: String,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        Self {
            repository: SystemUserRepository::new(store, key),
            clock,
            ids,
        }
    }

    /// List all users
    pub fn list_all(&self) -> Result<Vec<SystemUser>> {
        Ok(self.repository.list_all()?)
    }

    /// Create a new user
    pub fn create(&self, dto: CreateSystemUserDto) -> Result<SystemUser> {
        let login = dto.login.trim().to_uppercase();
        if login.is_empty() {
            return Err(StoreError::Validation("Login cannot be empty".into()).into());
        }
        if let Err(e) = password::validate_password_strength(&dto.password) {
            return Err(StoreError::Validation(e.to_string()).into());
        }

        let mut users = self.repository.list_all()?;
        if users.iter().any(|u| u.login == login) {
            return Err(StoreError::DuplicateKey {
                field: DuplicateField::Login,
                value: login,
            }
            .into());
        }

        let display_name = match dto.display_name.trim() {
            "" => login.clone(),
            name => name.to_uppercase(),
        };

        let user = SystemUser {
            id: self.ids.next_id(),
            login,
            role: dto.role,
            display_name,
            password_hash: password::hash_password(&dto.password)?,
            created_at: self.clock.now().to_rfc3339(),
        };

        users.push(user.clone());
        self.repository.save_all(&users)?;

        tracing::info!("System user {} created with role {}", user.login, user.role);
        Ok(user)
    }

    /// Delete user (hard delete). The last administrator cannot be removed.
    pub fn delete(&self, id: &str) -> Result<()> {
        let users = self.repository.list_all()?;
        let target = users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found(SystemUser::element_name(), id))?;

        let admins = users.iter().filter(|u| u.role == Role::Admin).count();
        if target.role == Role::Admin && admins == 1 {
            return Err(
                StoreError::Validation("The last administrator cannot be deleted".into()).into(),
            );
        }

        let login = target.login.clone();
        let remaining: Vec<SystemUser> = users.into_iter().filter(|u| u.id != id).collect();
        self.repository.save_all(&remaining)?;

        tracing::info!("System user {} deleted", login);
        Ok(())
    }

    /// Verify user credentials (for login).
    ///
    /// Unknown login and wrong password produce the same error.
    pub fn verify_credentials(&self, request: &LoginRequest) -> Result<UserInfo, AuthError> {
        let login = request.login.trim().to_uppercase();

        let user = match self.repository.get_by_login(&login)? {
            Some(u) => u,
            None => {
                tracing::debug!("Login rejected for {}: unknown user", login);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !password::verify_password(&request.password, &user.password_hash) {
            tracing::debug!("Login rejected for {}: password mismatch", login);
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("User {} logged in", user.login);
        Ok(UserInfo::from(&user))
    }

    /// Ensure admin user exists (create if collection is empty)
    pub fn ensure_admin_user_exists(&self) -> Result<bool> {
        if self.repository.count_users()? > 0 {
            return Ok(false);
        }

        tracing::info!("No system users found. Creating default admin user...");
        self.create(CreateSystemUserDto {
            login: DEFAULT_ADMIN_LOGIN.into(),
            password: DEFAULT_ADMIN_PASSWORD.into(),
            display_name: "ADMINISTRADOR".into(),
            role: Role::Admin,
        })?;

        tracing::warn!(
            "Default admin user created (login {}). Change the password!",
            DEFAULT_ADMIN_LOGIN
        );
        Ok(true)
    }

    /// Replace the whole collection (backup import)
    pub fn replace_all(&self, users: &[SystemUser]) -> Result<()> {
        Ok(self.repository.save_all(users)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::Database;
    use crate::shared::ids::SequentialIds;

    fn db_with_admin() -> Database {
        let db = Database::in_memory().with_ids(SequentialIds::new("usr"));
        db.system_users().ensure_admin_user_exists().unwrap();
        db
    }

    fn login(login: &str, password: &str) -> LoginRequest {
        LoginRequest {
            login: login.into(),
            password: password.into(),
        }
    }

    fn guest(login: &str) -> CreateSystemUserDto {
        CreateSystemUserDto {
            login: login.into(),
            password: "guest".into(),
            display_name: "Visitante".into(),
            role: Role::Guest,
        }
    }

    #[test]
    fn test_default_admin_can_log_in() {
        let db = db_with_admin();
        let info = db.system_users().verify_credentials(&login("admin", "123")).unwrap();
        assert_eq!(info.login, "ADMIN");
        assert_eq!(info.role, Role::Admin);

        // only once
        assert!(!db.system_users().ensure_admin_user_exists().unwrap());
    }

    #[test]
    fn test_password_is_not_stored_in_plain_text() {
        let db = db_with_admin();
        let raw = db.store().get(&db.keys().system_users()).unwrap().unwrap();
        assert!(raw.contains("passwordHash"));
        assert!(!raw.contains("\"123\""));
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let db = db_with_admin();
        let users = db.system_users();

        let unknown = users.verify_credentials(&login("NOBODY", "123")).unwrap_err();
        let wrong = users.verify_credentials(&login("ADMIN", "999")).unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn test_create_rejects_duplicate_login() {
        let db = db_with_admin();
        db.system_users().create(guest("visitor")).unwrap();

        let err = db.system_users().create(guest("VISITOR")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::DuplicateKey { field: DuplicateField::Login, .. })
        ));
    }

    #[test]
    fn test_create_rejects_short_password() {
        let db = db_with_admin();
        let mut dto = guest("short");
        dto.password = "12".into();

        let err = db.system_users().create(dto).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Validation(_))));
    }

    #[test]
    fn test_last_admin_cannot_be_deleted() {
        let db = db_with_admin();
        let admin_id = db.system_users().list_all().unwrap()[0].id.clone();

        let err = db.system_users().delete(&admin_id).unwrap_err();
        assert!(err.to_string().contains("last administrator"));

        let visitor = db.system_users().create(guest("visitor")).unwrap();
        db.system_users().delete(&visitor.id).unwrap();
        assert_eq!(db.system_users().list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_user_is_not_found() {
        let db = db_with_admin();
        let err = db.system_users().delete("missing").unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }
}
