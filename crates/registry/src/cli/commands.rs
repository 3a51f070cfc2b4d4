use anyhow::{bail, Context, Result};
use contracts::dashboards::d400_employee_summary::{BranchScope, EmployeeSummaryRequest};
use contracts::dashboards::d401_branch_roster::BranchRosterRequest;
use contracts::domain::a001_employee::{Employee, EmployeeDto, EmployeeId};
use contracts::domain::a002_reference_list::ReferenceKind;
use contracts::system::auth::{LoginRequest, UserInfo};
use contracts::system::users::CreateSystemUserDto;

use super::render;
use super::{
    BackupCommand, Cli, Command, EmployeeArgs, EmployeeUpdateArgs, EmployeesCommand, ListArgs,
    RefsCommand, UsersCommand,
};
use crate::dashboards::{d400_employee_summary, d401_branch_roster, d402_reference_audit};
use crate::shared::config::Config;
use crate::shared::data::Database;
use crate::shared::list_utils::{filter_list, sort_list};
use crate::system::auth::authorize_modification;
use crate::system::initialization::initialize_store;
use crate::usecases::u501_backup::executor::BackupExecutor;

/// Who runs the command.
///
/// `Local` is used when the configuration disables login.
#[derive(Debug)]
pub enum Session {
    Local,
    User(UserInfo),
}

impl Session {
    /// Guests are read-only
    pub fn require_admin(&self, action: &str) -> Result<()> {
        match self {
            Session::Local => Ok(()),
            Session::User(user) => Ok(authorize_modification(user, action)?),
        }
    }
}

/// Execute one parsed command, printing its result to stdout
pub fn run(cli: Cli, config: &Config, db: &Database) -> Result<()> {
    if let Command::Init = cli.command {
        let report = initialize_store(db)?;
        if report.is_noop() {
            println!("Store already initialized");
        } else {
            println!("Store initialized");
            if report.employees_seeded {
                println!("  employees: default records created");
            }
            for kind in &report.reference_lists_seeded {
                println!("  {}: defaults created", kind.list_name());
            }
            if report.admin_created {
                println!("  system users: default administrator created");
            }
        }
        return Ok(());
    }

    let session = open_session(&cli, config, db)?;

    match cli.command {
        Command::Init => Ok(()),
        Command::Login => {
            match &session {
                Session::Local => println!("Login is disabled in the configuration"),
                Session::User(user) => {
                    println!("Logged in as {} ({})", user.display_name, user.role)
                }
            }
            Ok(())
        }
        Command::Employees { command } => run_employees(command, &session, db),
        Command::Refs { kind, command } => run_refs(kind.into(), command, &session, db),
        Command::Users { command } => run_users(command, &session, db),
        Command::Dashboard { branch } => {
            let request = EmployeeSummaryRequest {
                scope: BranchScope::from_option(branch.as_deref()),
            };
            let summary =
                d400_employee_summary::service::get_employee_summary(db, &request, &config.dashboard)?;
            println!("{}", render::summary(&summary));
            Ok(())
        }
        Command::Report { branch, view, csv } => {
            let request = BranchRosterRequest {
                branch,
                search: view.search.clone(),
                sort: view.sort_state(),
            };
            let roster = d401_branch_roster::service::get_branch_roster(db, &request)?;
            println!("Branch: {} ({} employees)", roster.branch, roster.branch_total);
            println!("{}", render::employees_table(&roster.rows, &roster.sort));
            if let Some(path) = csv {
                d401_branch_roster::service::export_roster_csv(&roster, &path)?;
                println!("Exported to {}", path.display());
            }
            Ok(())
        }
        Command::Audit => {
            let report = d402_reference_audit::service::run_reference_audit(db)?;
            println!("{}", render::audit(&report));
            Ok(())
        }
        Command::Backup { command } => run_backup(command, &session, db),
    }
}

fn open_session(cli: &Cli, config: &Config, db: &Database) -> Result<Session> {
    let wants_login = matches!(cli.command, Command::Login);
    if !config.auth.require_login && !wants_login {
        return Ok(Session::Local);
    }

    let (Some(login), Some(password)) = (cli.user.as_deref(), cli.password.as_deref()) else {
        if !config.auth.require_login {
            return Ok(Session::Local);
        }
        bail!("Login required: pass --user and --password or set REGISTRY_LOGIN and REGISTRY_PASSWORD");
    };

    let user = db.system_users().verify_credentials(&LoginRequest {
        login: login.to_string(),
        password: password.to_string(),
    })?;
    Ok(Session::User(user))
}

fn list_employees(db: &Database, view: &ListArgs) -> Result<Vec<Employee>> {
    let employees = db.employees().list_all()?;
    let mut rows = match view.search.as_deref() {
        Some(term) => filter_list(employees, term),
        None => employees,
    };
    let sort = view.sort_state();
    sort_list(&mut rows, sort.field, sort.direction);
    Ok(rows)
}

fn run_employees(command: EmployeesCommand, session: &Session, db: &Database) -> Result<()> {
    match command {
        EmployeesCommand::List { view } => {
            let rows = list_employees(db, &view)?;
            println!("{}", render::employees_table(&rows, &view.sort_state()));
            if !rows.is_empty() {
                println!("\n{}", render::employee_ids(&rows));
            }
        }
        EmployeesCommand::Add(args) => {
            session.require_admin("register employees")?;
            let outcome = db.employees().add(employee_dto(args))?;
            println!("{} (id {})", outcome.message, outcome.value.id);
        }
        EmployeesCommand::Update { id, fields } => {
            session.require_admin("update employees")?;
            let id = EmployeeId::new(id);
            let current = db
                .employees()
                .get_by_id(&id)?
                .with_context(|| format!("Employee not found: {}", id))?;
            let outcome = db.employees().update(apply_update(current, fields))?;
            println!("{}", outcome.message);
        }
        EmployeesCommand::Delete { id } => {
            session.require_admin("delete employees")?;
            let outcome = db.employees().delete(&EmployeeId::new(id))?;
            println!("{}", outcome.message);
        }
        EmployeesCommand::DeleteAll { yes } => {
            session.require_admin("delete employees")?;
            if !yes {
                bail!("Refusing to delete every employee without --yes");
            }
            let outcome = db.employees().delete_all()?;
            println!("{}", outcome.message);
        }
    }
    Ok(())
}

fn employee_dto(args: EmployeeArgs) -> EmployeeDto {
    EmployeeDto {
        number: args.number,
        full_name: args.name,
        branch: args.branch,
        login: args.login,
        password: args.employee_password,
        department: args.department,
        sector: args.sector,
    }
}

/// Full record for `update`: stored values overridden by the given flags
fn apply_update(mut employee: Employee, fields: EmployeeUpdateArgs) -> Employee {
    if let Some(v) = fields.number {
        employee.number = v;
    }
    if let Some(v) = fields.name {
        employee.full_name = v;
    }
    if let Some(v) = fields.branch {
        employee.branch = v;
    }
    if let Some(v) = fields.new_login {
        employee.login = v;
    }
    if let Some(v) = fields.employee_password {
        employee.password = Some(v);
    }
    if let Some(v) = fields.department {
        employee.department = v;
    }
    if let Some(v) = fields.sector {
        employee.sector = v;
    }
    employee
}

fn run_refs(
    kind: ReferenceKind,
    command: RefsCommand,
    session: &Session,
    db: &Database,
) -> Result<()> {
    let list = db.reference_list(kind);
    match command {
        RefsCommand::List => {
            println!("{}", render::reference_list(kind, &list.list()?));
        }
        RefsCommand::Add { name } => {
            session.require_admin(&format!("change {}", kind.list_name()))?;
            if list.add(&name)? {
                println!("{} added", kind.element_name());
            } else {
                println!("{} already registered or empty, nothing changed", kind.element_name());
            }
        }
        RefsCommand::Remove { name } => {
            session.require_admin(&format!("change {}", kind.list_name()))?;
            list.remove(&name)?;
            println!("{} removed", kind.element_name());
        }
    }
    Ok(())
}

fn run_users(command: UsersCommand, session: &Session, db: &Database) -> Result<()> {
    session.require_admin("manage system users")?;
    let users = db.system_users();
    match command {
        UsersCommand::List => println!("{}", render::users_table(&users.list_all()?)),
        UsersCommand::Add {
            user_login,
            user_password,
            display_name,
            role,
        } => {
            let user = users.create(CreateSystemUserDto {
                login: user_login,
                password: user_password,
                display_name,
                role,
            })?;
            println!("System user {} created (id {})", user.login, user.id);
        }
        UsersCommand::Delete { id } => {
            users.delete(&id)?;
            println!("System user deleted");
        }
    }
    Ok(())
}

fn run_backup(command: BackupCommand, session: &Session, db: &Database) -> Result<()> {
    let executor = BackupExecutor::new(db);
    match command {
        BackupCommand::Export { path } => {
            session.require_admin("export the store")?;
            let snapshot = executor.export_to_file(&path)?;
            println!(
                "Backup written to {} ({} employees)",
                path.display(),
                snapshot.employees.len()
            );
        }
        BackupCommand::Import { path } => {
            session.require_admin("import a backup")?;
            let summary = executor.import_from_file(&path)?;
            println!(
                "Imported {} employees, {} branches, {} departments, {} sectors, {} system users",
                summary.employees,
                summary.branches,
                summary.departments,
                summary.sectors,
                summary.system_users
            );
        }
    }
    Ok(())
}
