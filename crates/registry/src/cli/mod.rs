//! Консольный интерфейс реестра (clap)
pub mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use contracts::domain::a001_employee::EmployeeField;
use contracts::domain::a002_reference_list::ReferenceKind;
use contracts::shared::list::{SortDirection, SortState};
use contracts::system::users::Role;

#[derive(Debug, Parser)]
#[command(name = "registry", version)]
#[command(about = "Employee registry and reporting console")]
#[command(
    after_help = "Environment:\n  REGISTRY_LOGIN      Login used for authentication\n  REGISTRY_PASSWORD   Password used for authentication\n  RUST_LOG            Log filter override"
)]
pub struct Cli {
    /// Path to registry.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage directory, overrides [storage] path
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Login of the console user
    #[arg(long, global = true, env = "REGISTRY_LOGIN")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "REGISTRY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed every collection that does not exist yet
    Init,
    /// Check credentials and show the current user
    Login,
    Employees {
        #[command(subcommand)]
        command: EmployeesCommand,
    },
    /// Branches, departments and sectors
    Refs {
        #[arg(value_enum)]
        kind: ReferenceKindArg,
        #[command(subcommand)]
        command: RefsCommand,
    },
    /// Console access accounts
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Employee counts by department and sector
    Dashboard {
        /// Branch name; all branches when omitted
        #[arg(long)]
        branch: Option<String>,
    },
    /// Staffing report of one branch
    Report {
        branch: String,
        #[command(flatten)]
        view: ListArgs,
        /// Also write the rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Employees referencing removed branches, departments or sectors
    Audit,
    Backup {
        #[command(subcommand)]
        command: BackupCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    List {
        #[command(flatten)]
        view: ListArgs,
    },
    Add(EmployeeArgs),
    /// Replace the fields given on the command line
    Update {
        id: String,
        #[command(flatten)]
        fields: EmployeeUpdateArgs,
    },
    Delete {
        id: String,
    },
    /// Remove every employee
    DeleteAll {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },
}

/// Search and sort of an employee table
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value = "full_name")]
    pub sort: EmployeeField,
    #[arg(long)]
    pub desc: bool,
}

impl ListArgs {
    pub fn sort_state(&self) -> SortState {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortState::new(self.sort, direction)
    }
}

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub number: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub branch: String,
    #[arg(long)]
    pub login: String,
    #[arg(long = "employee-password")]
    pub employee_password: Option<String>,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub sector: String,
}

#[derive(Debug, Args)]
pub struct EmployeeUpdateArgs {
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long = "new-login")]
    pub new_login: Option<String>,
    #[arg(long = "employee-password")]
    pub employee_password: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReferenceKindArg {
    Branches,
    Departments,
    Sectors,
}

impl From<ReferenceKindArg> for ReferenceKind {
    fn from(value: ReferenceKindArg) -> Self {
        match value {
            ReferenceKindArg::Branches => ReferenceKind::Branch,
            ReferenceKindArg::Departments => ReferenceKind::Department,
            ReferenceKindArg::Sectors => ReferenceKind::Sector,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum RefsCommand {
    List,
    Add { name: String },
    Remove { name: String },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    Add {
        #[arg(long = "user-login")]
        user_login: String,
        #[arg(long = "user-password")]
        user_password: String,
        #[arg(long, default_value = "")]
        display_name: String,
        #[arg(long, default_value = "guest")]
        role: Role,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    Export { path: PathBuf },
    Import { path: PathBuf },
}
