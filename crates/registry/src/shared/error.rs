use thiserror::Error;

/// Which unique key of an employee collided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Number,
    Login,
}

/// Ошибки хранилища записей
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", duplicate_message(.field, .value))]
    DuplicateKey { field: DuplicateField, value: String },

    #[error("{element} not found: {id}")]
    NotFound { element: &'static str, id: String },

    #[error("Stored data under '{key}' is corrupt: {source}")]
    CorruptStore {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No free id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

fn duplicate_message(field: &DuplicateField, value: &str) -> String {
    match field {
        DuplicateField::Number => format!("Employee number {} is already registered", value),
        DuplicateField::Login => format!("Login {} is already in use", value),
    }
}

impl StoreError {
    pub fn not_found(element: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            element,
            id: id.into(),
        }
    }
}

/// Ошибки аутентификации и прав доступа
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login and wrong password are reported identically
    #[error("Access denied. Check your credentials.")]
    InvalidCredentials,

    #[error("The {role} role is not allowed to {action}")]
    Forbidden { role: String, action: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_messages_name_the_conflicting_value() {
        let err = StoreError::DuplicateKey {
            field: DuplicateField::Number,
            value: "1001".into(),
        };
        assert_eq!(err.to_string(), "Employee number 1001 is already registered");

        let err = StoreError::DuplicateKey {
            field: DuplicateField::Login,
            value: "JSILVA".into(),
        };
        assert_eq!(err.to_string(), "Login JSILVA is already in use");
    }

    #[test]
    fn test_corrupt_store_keeps_parse_error_as_source() {
        let parse_err = serde_json::from_str::<Vec<String>>("[1,").unwrap_err();
        let err = StoreError::CorruptStore {
            key: "k_system_setores".into(),
            source: parse_err,
        };
        assert!(err.to_string().contains("k_system_setores"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
