use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use contracts::domain::a001_employee::Employee;
use contracts::domain::a002_reference_list::{normalize_reference_name, ReferenceKind};
use contracts::system::users::{Role, SystemUser};
use contracts::usecases::u501_backup::{ImportSummary, StoreSnapshot, SNAPSHOT_FORMAT_VERSION};

use crate::shared::data::Database;
use crate::shared::error::{DuplicateField, StoreError};
use crate::system::auth::password;

/// Executor для резервного копирования хранилища (выгрузка / загрузка)
pub struct BackupExecutor<'a> {
    db: &'a Database,
}

impl<'a> BackupExecutor<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Снимок всех коллекций
    pub fn export_snapshot(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            exported_at: self.db.clock().now().to_rfc3339(),
            employees: self.db.employees().list_all()?,
            branches: self.db.branches().list()?,
            departments: self.db.departments().list()?,
            sectors: self.db.sectors().list()?,
            system_users: self.db.system_users().list_all()?,
        })
    }

    /// Выгрузить снимок в JSON файл
    pub fn export_to_file(&self, path: &Path) -> Result<StoreSnapshot> {
        let snapshot = self.export_snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Cannot write backup {}", path.display()))?;

        tracing::info!(
            "Backup written to {} ({} employees)",
            path.display(),
            snapshot.employees.len()
        );
        Ok(snapshot)
    }

    /// Загрузить снимок из JSON файла
    pub fn import_from_file(&self, path: &Path) -> Result<ImportSummary> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read backup {}", path.display()))?;
        let snapshot: StoreSnapshot = serde_json::from_str(&contents)
            .with_context(|| format!("Backup {} is not a valid snapshot", path.display()))?;
        self.import_snapshot(snapshot)
    }

    /// Replace every collection with the snapshot contents.
    ///
    /// The whole snapshot is validated first; nothing is written if any part
    /// is rejected. An empty user list keeps the current system users.
    pub fn import_snapshot(&self, snapshot: StoreSnapshot) -> Result<ImportSummary> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            bail!(
                "Unsupported backup format version {} (expected {})",
                snapshot.format_version,
                SNAPSHOT_FORMAT_VERSION
            );
        }

        let employees = prepare_employees(snapshot.employees)?;
        let branches = prepare_reference_list(&snapshot.branches);
        let departments = prepare_reference_list(&snapshot.departments);
        let sectors = prepare_reference_list(&snapshot.sectors);
        let system_users = prepare_system_users(snapshot.system_users)?;

        self.db.employees().replace_all(&employees)?;
        for (kind, values) in [
            (ReferenceKind::Branch, &branches),
            (ReferenceKind::Department, &departments),
            (ReferenceKind::Sector, &sectors),
        ] {
            self.db.reference_list(kind).replace_all(values)?;
        }
        if !system_users.is_empty() {
            self.db.system_users().replace_all(&system_users)?;
        }

        let summary = ImportSummary {
            employees: employees.len(),
            branches: branches.len(),
            departments: departments.len(),
            sectors: sectors.len(),
            system_users: system_users.len(),
        };
        tracing::info!("Backup imported: {:?}", summary);
        Ok(summary)
    }
}

/// Normalize every record and re-check id, number and login uniqueness
fn prepare_employees(employees: Vec<Employee>) -> Result<Vec<Employee>> {
    let mut ids = HashSet::new();
    let mut numbers = HashSet::new();
    let mut logins = HashSet::new();
    let mut prepared = Vec::with_capacity(employees.len());

    for employee in employees {
        if employee.id.as_str().trim().is_empty() {
            bail!(StoreError::Validation(format!(
                "Employee {} has an empty id",
                employee.number
            )));
        }

        let dto = employee.to_dto().normalized();
        dto.validate()
            .map_err(|e| StoreError::Validation(format!("Employee {}: {}", employee.id, e)))?;

        if !ids.insert(employee.id.clone()) {
            bail!(StoreError::Validation(format!(
                "Employee id {} appears twice",
                employee.id
            )));
        }
        if !numbers.insert(dto.number.clone()) {
            bail!(StoreError::DuplicateKey {
                field: DuplicateField::Number,
                value: dto.number,
            });
        }
        if !logins.insert(dto.login.clone()) {
            bail!(StoreError::DuplicateKey {
                field: DuplicateField::Login,
                value: dto.login,
            });
        }

        prepared.push(Employee::from_dto(employee.id, dto, employee.registered_at));
    }

    Ok(prepared)
}

/// Trim, uppercase, drop blanks and duplicates (first occurrence wins)
fn prepare_reference_list(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| normalize_reference_name(v))
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Uppercase logins, then require parseable hashes, unique logins and an admin
fn prepare_system_users(users: Vec<SystemUser>) -> Result<Vec<SystemUser>> {
    if users.is_empty() {
        return Ok(users);
    }

    let mut logins = HashSet::new();
    let mut prepared = Vec::with_capacity(users.len());
    for mut user in users {
        user.login = user.login.trim().to_uppercase();
        if user.login.is_empty() {
            bail!(StoreError::Validation(format!(
                "System user {} has an empty login",
                user.id
            )));
        }
        if !password::is_valid_hash(&user.password_hash) {
            bail!(StoreError::Validation(format!(
                "System user {} has an unreadable password hash",
                user.login
            )));
        }
        if !logins.insert(user.login.clone()) {
            bail!(StoreError::DuplicateKey {
                field: DuplicateField::Login,
                value: user.login,
            });
        }
        prepared.push(user);
    }

    if !prepared.iter().any(|u| u.role == Role::Admin) {
        bail!(StoreError::Validation(
            "Backup contains no administrator".into()
        ));
    }

    Ok(prepared)
}
