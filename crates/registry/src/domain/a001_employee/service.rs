use contracts::domain::a001_employee::{default_employees, Employee, EmployeeDto, EmployeeId};
use contracts::domain::common::AggregateRoot;

use super::repository::EmployeeRepository;
use crate::shared::clock::Clock;
use crate::shared::data::BlobStore;
use crate::shared::error::{DuplicateField, StoreError, StoreResult};
use crate::shared::ids::IdGenerator;
use crate::shared::outcome::Outcome;

const MAX_ID_ATTEMPTS: usize = 16;

/// Employee CRUD with the number/login uniqueness rules
pub struct EmployeeService<'a> {
    repository: EmployeeRepository<'a>,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> EmployeeService<'a> {
    pub fn new(
        store: &'a dyn BlobStore,
        key: String,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        Self {
            repository: EmployeeRepository::new(store, key),
            clock,
            ids,
        }
    }

    /// List all employees
    pub fn list_all(&self) -> StoreResult<Vec<Employee>> {
        self.repository.list_all()
    }

    /// Get employee by ID
    pub fn get_by_id(&self, id: &EmployeeId) -> StoreResult<Option<Employee>> {
        Ok(self.list_all()?.into_iter().find(|e| &e.id == id))
    }

    /// Register a new employee.
    ///
    /// Name and login are uppercased before the uniqueness checks, which are
    /// exact matches against the stored (already normalized) records.
    pub fn add(&self, dto: EmployeeDto) -> StoreResult<Outcome<Employee>> {
        let dto = dto.normalized();
        dto.validate().map_err(StoreError::Validation)?;

        let mut employees = self.repository.list_all()?;

        if employees.iter().any(|e| e.number == dto.number) {
            tracing::warn!("Rejected employee: number {} already registered", dto.number);
            return Err(StoreError::DuplicateKey {
                field: DuplicateField::Number,
                value: dto.number,
            });
        }
        if employees.iter().any(|e| e.login == dto.login) {
            tracing::warn!("Rejected employee: login {} already in use", dto.login);
            return Err(StoreError::DuplicateKey {
                field: DuplicateField::Login,
                value: dto.login,
            });
        }

        let id = self.fresh_id(&employees)?;
        let employee = Employee::from_dto(id, dto, self.clock.now());
        employees.push(employee.clone());
        self.repository.save_all(&employees)?;

        tracing::info!(
            "Employee {} ({}) registered with id {}",
            employee.number,
            employee.login,
            employee.id
        );
        Ok(Outcome::new(employee, "Employee registered successfully"))
    }

    /// Replace an employee record in place.
    ///
    /// The stored ID and registration time are kept; a record without a
    /// password keeps the stored one.
    pub fn update(&self, record: Employee) -> StoreResult<Outcome<Employee>> {
        let dto = record.to_dto().normalized();
        dto.validate().map_err(StoreError::Validation)?;

        let mut employees = self.repository.list_all()?;
        let index = employees
            .iter()
            .position(|e| e.id == record.id)
            .ok_or_else(|| StoreError::not_found(Employee::element_name(), record.id.as_str()))?;

        let others = || employees.iter().filter(|e| e.id != record.id);
        if others().any(|e| e.number == dto.number) {
            tracing::warn!("Rejected update of {}: number {} taken", record.id, dto.number);
            return Err(StoreError::DuplicateKey {
                field: DuplicateField::Number,
                value: dto.number,
            });
        }
        if others().any(|e| e.login == dto.login) {
            tracing::warn!("Rejected update of {}: login {} taken", record.id, dto.login);
            return Err(StoreError::DuplicateKey {
                field: DuplicateField::Login,
                value: dto.login,
            });
        }

        let current = &employees[index];
        let password = dto.password.clone().or_else(|| current.password.clone());
        let mut updated = Employee::from_dto(current.id.clone(), dto, current.registered_at);
        updated.password = password;

        employees[index] = updated.clone();
        self.repository.save_all(&employees)?;

        tracing::info!("Employee {} updated", updated.id);
        Ok(Outcome::new(updated, "Employee updated successfully"))
    }

    /// Delete employee (hard delete)
    pub fn delete(&self, id: &EmployeeId) -> StoreResult<Outcome> {
        let employees = self.repository.list_all()?;
        let before = employees.len();
        let remaining: Vec<Employee> = employees.into_iter().filter(|e| &e.id != id).collect();

        if remaining.len() == before {
            tracing::warn!("Delete failed: employee {} not found", id);
            return Err(StoreError::not_found(Employee::element_name(), id.as_str()));
        }

        self.repository.save_all(&remaining)?;
        tracing::info!("Employee {} deleted", id);
        Ok(Outcome::message("Employee deleted successfully"))
    }

    /// Empty the collection. Always succeeds on a healthy store.
    pub fn delete_all(&self) -> StoreResult<Outcome> {
        self.repository.save_all(&[])?;
        tracing::warn!("All employees deleted from {}", self.repository.key());
        Ok(Outcome::message("All employees deleted"))
    }

    /// Write the default employees if the collection was never initialized
    pub fn seed_defaults(&self) -> StoreResult<bool> {
        if self.repository.is_initialized()? {
            return Ok(false);
        }
        let seed = default_employees(self.clock.now());
        self.repository.save_all(&seed)?;
        tracing::info!("Seeded {} default employees", seed.len());
        Ok(true)
    }

    /// Replace the whole collection with already validated records (backup import)
    pub fn replace_all(&self, employees: &[Employee]) -> StoreResult<()> {
        self.repository.save_all(employees)?;
        tracing::info!("Employee collection replaced with {} records", employees.len());
        Ok(())
    }

    fn fresh_id(&self, employees: &[Employee]) -> StoreResult<EmployeeId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = EmployeeId::new(self.ids.next_id());
            if !id.as_str().is_empty() && employees.iter().all(|e| e.id != id) {
                return Ok(id);
            }
        }
        tracing::error!("Id generator produced no free id in {} attempts", MAX_ID_ATTEMPTS);
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::clock::SteppingClock;
    use crate::shared::data::{Database, MemoryBlobStore, StorageKeys};
    use crate::shared::ids::SequentialIds;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn seeded_db() -> Database {
        let db = Database::in_memory()
            .with_clock(SteppingClock::starting_at(start()))
            .with_ids(SequentialIds::new("emp"));
        db.employees().seed_defaults().unwrap();
        db
    }

    fn candidate(number: &str, login: &str) -> EmployeeDto {
        EmployeeDto {
            number: number.into(),
            full_name: "Maria Souza".into(),
            branch: "CURITIBA".into(),
            login: login.into(),
            password: Some("secret".into()),
            department: "FINANCEIRO".into(),
            sector: "CONTABILIDADE".into(),
        }
    }

    #[test]
    fn test_list_all_is_empty_before_seeding() {
        let db = Database::in_memory();
        assert!(db.employees().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults_is_idempotent() {
        let db = seeded_db();
        assert!(!db.employees().seed_defaults().unwrap());

        let all = db.employees().list_all().unwrap();
        let logins: Vec<&str> = all.iter().map(|e| e.login.as_str()).collect();
        assert_eq!(logins, vec!["ADMIN", "JSILVA"]);
    }

    #[test]
    fn test_duplicate_scenario_from_default_seed() {
        let db = seeded_db();
        let employees = db.employees();

        let err = employees.add(candidate("1001", "X")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateKey { field: DuplicateField::Number, ref value } if value == "1001"
        ));
        assert!(err.to_string().contains("1001"));

        let err = employees.add(candidate("1003", "JSILVA")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateKey { field: DuplicateField::Login, .. }
        ));
        assert!(err.to_string().contains("JSILVA"));

        let outcome = employees.add(candidate("1003", "NEWUSER")).unwrap();
        assert_eq!(outcome.message, "Employee registered successfully");
        assert_eq!(employees.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_rejected_add_leaves_stored_text_unchanged() {
        let store = MemoryBlobStore::new();
        let keys = StorageKeys::default();
        let clock = SteppingClock::starting_at(start());
        let ids = SequentialIds::new("emp");
        let service = EmployeeService::new(&store, keys.employees(), &clock, &ids);
        service.seed_defaults().unwrap();

        let before = store.raw(&keys.employees());
        assert!(service.add(candidate("1002", "OTHER")).is_err());
        assert_eq!(store.raw(&keys.employees()), before);
    }

    #[test]
    fn test_add_normalizes_login_and_assigns_id_and_timestamp() {
        let db = seeded_db();
        let added = db.employees().add(candidate("2000", "msouza")).unwrap().value;

        assert_eq!(added.login, "MSOUZA");
        assert_eq!(added.full_name, "MARIA SOUZA");
        assert_eq!(added.id, EmployeeId::new("emp-1"));
        assert!(added.registered_at > start());

        // lowercase login collides with the normalized stored one
        let err = db.employees().add(candidate("2001", "Msouza")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { field: DuplicateField::Login, .. }));
    }

    #[test]
    fn test_add_skips_generated_id_already_in_use() {
        let db = Database::in_memory().with_ids(SequentialIds::new("emp"));
        let employees = db.employees();
        let first = employees.add(candidate("1", "A")).unwrap().value;

        // plant a record that owns the next generated id
        let mut all = employees.list_all().unwrap();
        let mut planted = first.clone();
        planted.id = EmployeeId::new("emp-2");
        planted.number = "2".into();
        planted.login = "B".into();
        all.push(planted);
        EmployeeRepository::new(db.store(), db.keys().employees())
            .save_all(&all)
            .unwrap();

        let third = employees.add(candidate("3", "C")).unwrap().value;
        assert_eq!(third.id, EmployeeId::new("emp-3"));
    }

    #[test]
    fn test_add_gives_up_when_generator_repeats_taken_id() {
        struct FixedIds;
        impl IdGenerator for FixedIds {
            fn next_id(&self) -> String {
                "1".into()
            }
        }

        let db = Database::in_memory().with_ids(FixedIds);
        db.employees().seed_defaults().unwrap();
        let before = db.employees().list_all().unwrap();

        let err = db.employees().add(candidate("5000", "FIXED")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdExhausted { attempts: MAX_ID_ATTEMPTS }
        ));
        assert_eq!(db.employees().list_all().unwrap(), before);
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let db = seeded_db();
        let mut dto = candidate("3000", "BLANK");
        dto.sector = " ".into();

        assert!(matches!(
            db.employees().add(dto),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(db.employees().list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_preserves_id_and_registration_time() {
        let db = seeded_db();
        let original = db.employees().get_by_id(&EmployeeId::new("2")).unwrap().unwrap();

        let mut edited = original.clone();
        edited.branch = "CURITIBA".into();
        edited.login = "joao".into();
        edited.password = None;
        edited.registered_at = start() + chrono::Duration::days(30);

        let updated = db.employees().update(edited).unwrap().value;
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.registered_at, original.registered_at);
        assert_eq!(updated.login, "JOAO");
        assert_eq!(updated.branch, "CURITIBA");
        assert_eq!(updated.password, original.password);

        let stored = db.employees().list_all().unwrap();
        assert_eq!(stored[1], updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let db = seeded_db();
        let mut ghost = db.employees().list_all().unwrap()[0].clone();
        ghost.id = EmployeeId::new("ghost");

        assert!(matches!(
            db.employees().update(ghost),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_rejects_number_owned_by_another_record() {
        let db = seeded_db();
        let mut jsilva = db.employees().get_by_id(&EmployeeId::new("2")).unwrap().unwrap();
        jsilva.number = "1001".into();

        let err = db.employees().update(jsilva.clone()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { field: DuplicateField::Number, .. }));

        // keeping its own number and login is fine
        jsilva.number = "1002".into();
        assert!(db.employees().update(jsilva).is_ok());
    }

    #[test]
    fn test_delete_unknown_id_leaves_collection_unchanged() {
        let db = seeded_db();
        let before = db.employees().list_all().unwrap();

        let err = db.employees().delete(&EmployeeId::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(db.employees().list_all().unwrap(), before);
    }

    #[test]
    fn test_delete_removes_record() {
        let db = seeded_db();
        db.employees().delete(&EmployeeId::new("1")).unwrap();

        let remaining = db.employees().list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].login, "JSILVA");
    }

    #[test]
    fn test_delete_all_is_idempotent() {
        let db = seeded_db();
        db.employees().delete_all().unwrap();
        assert!(db.employees().list_all().unwrap().is_empty());

        db.employees().delete_all().unwrap();
        assert!(db.employees().list_all().unwrap().is_empty());

        // an emptied collection is still initialized and is not reseeded
        assert!(!db.employees().seed_defaults().unwrap());
    }

    #[test]
    fn test_corrupt_collection_fails_loudly() {
        let db = Database::in_memory();
        db.store().set(&db.keys().employees(), "[{\"id\": 1}").unwrap();

        assert!(matches!(
            db.employees().list_all(),
            Err(StoreError::CorruptStore { .. })
        ));
        assert!(matches!(
            db.employees().add(candidate("1", "A")),
            Err(StoreError::CorruptStore { .. })
        ));
    }
}
