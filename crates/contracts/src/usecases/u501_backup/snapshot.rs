use serde::{Deserialize, Serialize};

use crate::domain::a001_employee::Employee;
use crate::system::users::SystemUser;

/// Текущая версия формата резервной копии
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Полная выгрузка всех коллекций хранилища
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub format_version: u32,
    pub exported_at: String,
    pub employees: Vec<Employee>,
    pub branches: Vec<String>,
    pub departments: Vec<String>,
    pub sectors: Vec<String>,
    #[serde(default)]
    pub system_users: Vec<SystemUser>,
}

/// Итог импорта резервной копии
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub employees: usize,
    pub branches: usize,
    pub departments: usize,
    pub sectors: usize,
    pub system_users: usize,
}
