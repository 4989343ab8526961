//! Cartório front office command-line driver.
//!
//! Submits `key=value` forms to the core action handlers and lists stored
//! records, printing JSON on stdout.
//!
//! ```sh
//! # Schedule an appointment against the in-memory store
//! cartorio submit appointment tipo=CasamentoCivil data=2025-07-15 hora=10:00 \
//!     nomeSolicitantePrincipal="Ana Silva"
//!
//! # Persist to SQLite and list active clerks
//! cartorio --db ./cartorio.db users --role Escrevente --active true
//!
//! # Enforce the appointment status lifecycle
//! cartorio --strict-status appointment-status ag-exemplo-1 Pendente
//! ```

use cartorio_core::action::{
    change_appointment_status, delete_appointment, delete_user, save_user, submit_appointment,
    submit_registration,
};
use cartorio_core::db::open_db;
use cartorio_core::model::appointment::{Appointment, AppointmentFilter, AppointmentStatus};
use cartorio_core::model::registration::{
    BirthForm, CivilUnionForm, DeathForm, MarriageForm, Registration, RegistrationKind,
    StillbirthForm,
};
use cartorio_core::model::user::{User, UserFilter, UserRole};
use cartorio_core::{
    init_logging, AppointmentService, CoreConfig, FormData, MemoryProvider, RecordId,
    RegistrationService, RepositoryProvider, SqliteProvider, StatusPolicy, StorageConfig,
    UserService,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Cartório front office: submit forms and inspect records.
#[derive(Parser, Debug)]
#[command(name = "cartorio", version, about)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write rotating log files into this directory instead of stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Store records in this SQLite file instead of memory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Do not insert demo users and appointments into empty stores.
    #[arg(long, global = true)]
    no_seed: bool,

    /// Reject appointment status changes outside the lifecycle table.
    #[arg(long, global = true)]
    strict_status: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a form given as `key=value` pairs.
    Submit {
        kind: FormKind,
        /// Form fields such as `noivo1.nomeCompleto=Ana` or `filhosComuns[0].nomeCompleto=Caio`.
        fields: Vec<String>,
    },
    /// List users.
    Users {
        /// Case-insensitive part of the full name.
        #[arg(long)]
        name: Option<String>,
        /// Escrevente, Oficial or Admin.
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user by id.
    DeleteUser { id: String },
    /// List appointments.
    Appointments {
        /// Exact date, `YYYY-MM-DD`.
        #[arg(long)]
        date: Option<String>,
        /// Pendente, Confirmado, Cancelado or Realizado.
        #[arg(long)]
        status: Option<String>,
    },
    /// Change an appointment's status.
    AppointmentStatus { id: String, status: String },
    /// Delete an appointment by id.
    DeleteAppointment { id: String },
    /// List registrations of one kind.
    Registrations { kind: RegistrationArg },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormKind {
    User,
    Appointment,
    Marriage,
    Birth,
    Death,
    Stillbirth,
    CivilUnion,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RegistrationArg {
    Marriage,
    Birth,
    Death,
    Stillbirth,
    CivilUnion,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output.json);
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

struct Output {
    json: String,
    success: bool,
}

fn run(cli: Cli) -> CliResult<Output> {
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;
    debug!("event=cli_start module=cli status=ok command={:?}", cli.command);

    match &config.storage {
        StorageConfig::Memory => execute(&MemoryProvider, &config, cli.command),
        StorageConfig::Sqlite { path } => {
            let conn = open_db(path)?;
            execute(&SqliteProvider::new(&conn), &config, cli.command)
        }
    }
}

fn load_config(cli: &Cli) -> CliResult<CoreConfig> {
    let mut config = CoreConfig::from_env()?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.log_dir = Some(dir.clone());
    }
    if let Some(dir) = config.logging.log_dir.take() {
        config.logging.log_dir = Some(if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()?.join(dir)
        });
    }
    if let Some(path) = &cli.db {
        config.storage = StorageConfig::Sqlite { path: path.clone() };
    }
    if cli.no_seed {
        config.seed_demo_data = false;
    }
    if cli.strict_status {
        config.status_policy = StatusPolicy::Enforced;
    }

    Ok(config)
}

fn execute<P: RepositoryProvider>(
    provider: &P,
    config: &CoreConfig,
    command: Command,
) -> CliResult<Output> {
    match command {
        Command::Submit { kind, fields } => {
            let form = parse_fields(&fields)?;
            info!(
                "event=cli_submit module=cli status=start kind={kind:?} field_count={}",
                form.len()
            );
            match kind {
                FormKind::User => {
                    let mut service = users(provider, config)?;
                    let result = save_user(&mut service, None, &form);
                    render(&result, result.is_success())
                }
                FormKind::Appointment => {
                    let mut service = appointments(provider, config)?;
                    let result = submit_appointment(&mut service, None, &form);
                    render(&result, result.is_success())
                }
                FormKind::Marriage => submit::<MarriageForm, _>(provider, &form),
                FormKind::Birth => submit::<BirthForm, _>(provider, &form),
                FormKind::Death => submit::<DeathForm, _>(provider, &form),
                FormKind::Stillbirth => submit::<StillbirthForm, _>(provider, &form),
                FormKind::CivilUnion => submit::<CivilUnionForm, _>(provider, &form),
            }
        }
        Command::Users { name, role, active } => {
            let role = role
                .map(|role| role.parse::<UserRole>())
                .transpose()
                .map_err(|_| "role must be one of Escrevente, Oficial, Admin")?;
            let filter = UserFilter {
                name_contains: name,
                role,
                active,
            };
            render(&users(provider, config)?.list_users(&filter)?, true)
        }
        Command::DeleteUser { id } => {
            let result = delete_user(&mut users(provider, config)?, &RecordId::from(id));
            render(&result, result.is_success())
        }
        Command::Appointments { date, status } => {
            let filter = AppointmentFilter {
                date: date
                    .map(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d"))
                    .transpose()
                    .map_err(|_| "date must be YYYY-MM-DD")?,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            render(&appointments(provider, config)?.list_appointments(&filter)?, true)
        }
        Command::AppointmentStatus { id, status } => {
            let status = parse_status(&status)?;
            let mut service = appointments(provider, config)?;
            let result = change_appointment_status(&mut service, &RecordId::from(id), status);
            render(&result, result.is_success())
        }
        Command::DeleteAppointment { id } => {
            let result = delete_appointment(&mut appointments(provider, config)?, &RecordId::from(id));
            render(&result, result.is_success())
        }
        Command::Registrations { kind } => match kind {
            RegistrationArg::Marriage => list::<MarriageForm, _>(provider),
            RegistrationArg::Birth => list::<BirthForm, _>(provider),
            RegistrationArg::Death => list::<DeathForm, _>(provider),
            RegistrationArg::Stillbirth => list::<StillbirthForm, _>(provider),
            RegistrationArg::CivilUnion => list::<CivilUnionForm, _>(provider),
        },
    }
}

fn users<P: RepositoryProvider>(
    provider: &P,
    config: &CoreConfig,
) -> CliResult<UserService<P::Repo<User>>> {
    let mut service = UserService::new(provider.repository::<User>()?);
    if config.seed_demo_data {
        service.seed_demo_users()?;
    }
    Ok(service)
}

fn appointments<P: RepositoryProvider>(
    provider: &P,
    config: &CoreConfig,
) -> CliResult<AppointmentService<P::Repo<Appointment>>> {
    let mut service =
        AppointmentService::with_policy(provider.repository::<Appointment>()?, config.status_policy);
    if config.seed_demo_data {
        service.seed_demo_appointments()?;
    }
    Ok(service)
}

fn submit<T: RegistrationKind, P: RepositoryProvider>(
    provider: &P,
    form: &FormData,
) -> CliResult<Output> {
    let mut service = RegistrationService::<T, _>::new(provider.repository::<Registration<T>>()?);
    let result = submit_registration(&mut service, None, form);
    render(&result, result.is_success())
}

fn list<T: RegistrationKind, P: RepositoryProvider>(provider: &P) -> CliResult<Output> {
    let service = RegistrationService::<T, _>::new(provider.repository::<Registration<T>>()?);
    render(&service.list()?, true)
}

fn parse_fields(fields: &[String]) -> CliResult<FormData> {
    fields
        .iter()
        .map(|field| {
            field
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| Box::<dyn Error>::from(format!("expected key=value, got `{field}`")))
        })
        .collect()
}

fn parse_status(value: &str) -> CliResult<AppointmentStatus> {
    value
        .parse::<AppointmentStatus>()
        .map_err(|_| "status must be one of Pendente, Confirmado, Cancelado, Realizado".into())
}

fn render<T: Serialize>(value: &T, success: bool) -> CliResult<Output> {
    let json = serde_json::to_string_pretty(&serde_json::to_value(value)?)?;
    Ok(Output { json, success })
}

#[cfg(test)]
mod tests {
    use super::{parse_fields, Cli};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fields_split_on_first_equals_sign() {
        let form = parse_fields(&[
            "observacoes=a=b".to_string(),
            "documentosConvivente1Urls[]=x".to_string(),
        ])
        .unwrap();

        assert_eq!(form.get("observacoes"), Some("a=b"));
        assert_eq!(form.get("documentosConvivente1Urls[]"), Some("x"));
        assert!(parse_fields(&["broken".to_string()]).is_err());
    }
}
