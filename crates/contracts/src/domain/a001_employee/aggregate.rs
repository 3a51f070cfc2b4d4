use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a002_reference_list::normalize_reference_name;
use crate::domain::common::AggregateRoot;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор сотрудника (непрозрачный токен)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сотрудник
///
/// Имена полей в JSON совпадают с форматом, который уже лежит в хранилище.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,

    /// Табельный номер, уникален в реестре
    #[serde(rename = "matricula")]
    pub number: String,

    #[serde(rename = "nomeCompleto")]
    pub full_name: String,

    #[serde(rename = "filial")]
    pub branch: String,

    /// Логин, уникален в реестре
    pub login: String,

    #[serde(rename = "senha", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "departamento")]
    pub department: String,

    #[serde(rename = "setor")]
    pub sector: String,

    /// Дата регистрации, не меняется после создания
    #[serde(rename = "dataCadastro")]
    pub registered_at: DateTime<Utc>,
}

impl Employee {
    /// Создать запись из DTO с уже выданными ID и временем регистрации
    pub fn from_dto(id: EmployeeId, dto: EmployeeDto, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            number: dto.number,
            full_name: dto.full_name,
            branch: dto.branch,
            login: dto.login,
            password: dto.password,
            department: dto.department,
            sector: dto.sector,
            registered_at,
        }
    }

    /// Редактируемая часть записи
    pub fn to_dto(&self) -> EmployeeDto {
        EmployeeDto {
            number: self.number.clone(),
            full_name: self.full_name.clone(),
            branch: self.branch.clone(),
            login: self.login.clone(),
            password: self.password.clone(),
            department: self.department.clone(),
            sector: self.sector.clone(),
        }
    }

    /// Значение поля в виде строки (для поиска, таблиц и экспорта)
    pub fn field_value(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::Number => self.number.clone(),
            EmployeeField::FullName => self.full_name.clone(),
            EmployeeField::Branch => self.branch.clone(),
            EmployeeField::Login => self.login.clone(),
            EmployeeField::Department => self.department.clone(),
            EmployeeField::Sector => self.sector.clone(),
            EmployeeField::RegisteredAt => self.registered_at.to_rfc3339(),
        }
    }
}

impl AggregateRoot for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn collection_name() -> &'static str {
        "users_db"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания сотрудника (без ID и даты регистрации)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmployeeDto {
    #[serde(rename = "matricula")]
    pub number: String,

    #[serde(rename = "nomeCompleto")]
    pub full_name: String,

    #[serde(rename = "filial")]
    pub branch: String,

    pub login: String,

    #[serde(rename = "senha", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(rename = "departamento")]
    pub department: String,

    #[serde(rename = "setor")]
    pub sector: String,
}

impl EmployeeDto {
    /// Нормализация ввода: обрезка пробелов, всё кроме номера и пароля в
    /// верхнем регистре.
    ///
    /// Филиал, департамент и сектор приводятся к виду значений справочников.
    /// Табельный номер только обрезается: он сравнивается как есть.
    pub fn normalized(self) -> Self {
        Self {
            number: self.number.trim().to_string(),
            full_name: self.full_name.trim().to_uppercase(),
            branch: normalize_reference_name(&self.branch),
            login: self.login.trim().to_uppercase(),
            password: self.password.filter(|p| !p.is_empty()),
            department: normalize_reference_name(&self.department),
            sector: normalize_reference_name(&self.sector),
        }
    }

    /// Валидация обязательных полей
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("employee number", &self.number),
            ("full name", &self.full_name),
            ("branch", &self.branch),
            ("login", &self.login),
            ("department", &self.department),
            ("sector", &self.sector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("The {} must not be empty", name));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Колонки списка сотрудников, по которым работают поиск и сортировка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeField {
    Number,
    FullName,
    Branch,
    Login,
    Department,
    Sector,
    RegisteredAt,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 7] = [
        EmployeeField::Number,
        EmployeeField::FullName,
        EmployeeField::Branch,
        EmployeeField::Login,
        EmployeeField::Department,
        EmployeeField::Sector,
        EmployeeField::RegisteredAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::Number => "number",
            EmployeeField::FullName => "full_name",
            EmployeeField::Branch => "branch",
            EmployeeField::Login => "login",
            EmployeeField::Department => "department",
            EmployeeField::Sector => "sector",
            EmployeeField::RegisteredAt => "registered_at",
        }
    }

    /// Заголовок колонки в отчётах
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeField::Number => "Number",
            EmployeeField::FullName => "Full name",
            EmployeeField::Branch => "Branch",
            EmployeeField::Login => "Login",
            EmployeeField::Department => "Department",
            EmployeeField::Sector => "Sector",
            EmployeeField::RegisteredAt => "Registered",
        }
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmployeeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "number" | "matricula" => Ok(EmployeeField::Number),
            "full_name" | "name" | "nomecompleto" => Ok(EmployeeField::FullName),
            "branch" | "filial" => Ok(EmployeeField::Branch),
            "login" => Ok(EmployeeField::Login),
            "department" | "departamento" => Ok(EmployeeField::Department),
            "sector" | "setor" => Ok(EmployeeField::Sector),
            "registered_at" | "registered" | "datacadastro" => Ok(EmployeeField::RegisteredAt),
            other => Err(format!("Unknown employee field: {}", other)),
        }
    }
}

// ============================================================================
// Seed data
// ============================================================================

/// Начальный набор сотрудников для пустого хранилища
pub fn default_employees(now: DateTime<Utc>) -> Vec<Employee> {
    vec![
        Employee {
            id: EmployeeId::new("1"),
            number: "1001".into(),
            full_name: "ADMINISTRADOR".into(),
            branch: "MATRIZ".into(),
            login: "ADMIN".into(),
            password: Some("123".into()),
            department: "TECNOLOGIA DA INFORMAÇÃO".into(),
            sector: "INFRAESTRUTURA".into(),
            registered_at: now,
        },
        Employee {
            id: EmployeeId::new("2"),
            number: "1002".into(),
            full_name: "JOAO SILVA".into(),
            branch: "SÃO PAULO".into(),
            login: "JSILVA".into(),
            password: Some("123".into()),
            department: "COMERCIAL".into(),
            sector: "VENDAS".into(),
            registered_at: now - Duration::days(2),
        },
    ]
}
