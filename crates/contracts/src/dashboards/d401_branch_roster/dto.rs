use serde::{Deserialize, Serialize};

use crate::domain::a001_employee::Employee;
use crate::shared::list::SortState;

/// Request for the branch roster (staffing) report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRosterRequest {
    pub branch: String,
    /// Optional search term applied before sorting
    pub search: Option<String>,
    pub sort: SortState,
}

impl BranchRosterRequest {
    pub fn for_branch(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            search: None,
            sort: SortState::default(),
        }
    }
}

/// Employees of one branch, in display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRoster {
    pub branch: String,
    pub sort: SortState,
    /// Employees of the branch before the search filter
    pub branch_total: usize,
    pub rows: Vec<Employee>,
}

impl BranchRoster {
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}
