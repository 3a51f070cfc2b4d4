use anyhow::{Context, Result};
use contracts::domain::a002_reference_list::ReferenceKind;

use crate::shared::data::Database;

/// Какие коллекции были созданы при инициализации
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitializationReport {
    pub employees_seeded: bool,
    pub reference_lists_seeded: Vec<ReferenceKind>,
    pub admin_created: bool,
}

impl InitializationReport {
    pub fn is_noop(&self) -> bool {
        !self.employees_seeded && self.reference_lists_seeded.is_empty() && !self.admin_created
    }
}

/// Seed every absent collection with its defaults.
///
/// Existing keys are never overwritten, so running it again is harmless.
pub fn initialize_store(db: &Database) -> Result<InitializationReport> {
    let mut report = InitializationReport {
        employees_seeded: db
            .employees()
            .seed_defaults()
            .context("Failed to seed employees")?,
        ..Default::default()
    };

    for kind in ReferenceKind::ALL {
        let seeded = db
            .reference_list(kind)
            .seed_defaults()
            .with_context(|| format!("Failed to seed {}", kind.list_name()))?;
        if seeded {
            report.reference_lists_seeded.push(kind);
        }
    }

    report.admin_created = db.system_users().ensure_admin_user_exists()?;

    if report.is_noop() {
        tracing::info!("Store already initialized");
    } else {
        tracing::info!("Store initialized: {:?}", report);
    }
    Ok(report)
}
