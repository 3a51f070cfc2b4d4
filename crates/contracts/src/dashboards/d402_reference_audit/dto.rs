use serde::{Deserialize, Serialize};

use crate::domain::a001_employee::EmployeeId;
use crate::domain::a002_reference_list::ReferenceKind;

/// Employee attribute whose value is missing from its reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedReference {
    pub employee_id: EmployeeId,
    pub number: String,
    pub full_name: String,
    pub kind: ReferenceKind,
    pub value: String,
}

/// Result of checking every employee against the reference lists.
///
/// Orphans are reported, never repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAuditReport {
    pub employees_checked: usize,
    pub orphans: Vec<OrphanedReference>,
}

impl ReferenceAuditReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
    }

    /// Orphans of one reference kind
    pub fn of_kind(&self, kind: ReferenceKind) -> impl Iterator<Item = &OrphanedReference> {
        self.orphans.iter().filter(move |o| o.kind == kind)
    }
}
