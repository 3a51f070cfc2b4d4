use serde::{Deserialize, Serialize};

/// Branch filter of the dashboard: every branch or a single one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "branch", rename_all = "lowercase")]
pub enum BranchScope {
    #[default]
    All,
    Branch(String),
}

impl BranchScope {
    /// `None` or the literal "TODAS" mean all branches
    pub fn from_option(branch: Option<&str>) -> Self {
        match branch.map(str::trim) {
            None | Some("") => BranchScope::All,
            Some(b) if b.eq_ignore_ascii_case("todas") || b.eq_ignore_ascii_case("all") => {
                BranchScope::All
            }
            Some(b) => BranchScope::Branch(b.to_uppercase()),
        }
    }

    pub fn includes(&self, branch: &str) -> bool {
        match self {
            BranchScope::All => true,
            BranchScope::Branch(b) => b == branch,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BranchScope::All => "ALL BRANCHES",
            BranchScope::Branch(b) => b,
        }
    }
}

/// One bar of a chart: attribute value and number of employees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmployeeSummaryRequest {
    pub scope: BranchScope,
}

/// Response for the employee summary dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub scope: BranchScope,
    /// Employees in scope
    pub total: usize,
    /// Distinct departments present in scope
    pub department_count: usize,
    /// Distinct sectors present in scope
    pub sector_count: usize,
    /// Ranked by count descending, truncated to the configured top-N
    pub departments: Vec<CountEntry>,
    /// Ranked by count descending, truncated to the configured top-N
    pub sectors: Vec<CountEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_option() {
        assert_eq!(BranchScope::from_option(None), BranchScope::All);
        assert_eq!(BranchScope::from_option(Some("TODAS")), BranchScope::All);
        assert_eq!(
            BranchScope::from_option(Some(" curitiba ")),
            BranchScope::Branch("CURITIBA".into())
        );
    }

    #[test]
    fn test_scope_includes() {
        let scope = BranchScope::Branch("MATRIZ".into());
        assert!(scope.includes("MATRIZ"));
        assert!(!scope.includes("CURITIBA"));
        assert!(BranchScope::All.includes("CURITIBA"));
    }
}
