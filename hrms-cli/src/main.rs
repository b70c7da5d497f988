///! HRMS CLI
///!
///! Command-line client for the HRMS backend. Sessions persist between
///! invocations and every command is checked against the same route
///! permissions as the web UI.

mod api;
mod commands;
mod config;
mod output;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::auth::AuthCommands;
use hrms_common::{AccessError, AuthPolicy};
use output::OutputFormat;
use session::FileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API server address (defaults to the config file value)
    #[arg(short, long, env = "HRMS_SERVER")]
    server: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<String>,

    /// Log requests and session handling to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthCommands),
    /// Browse and maintain employee records
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Show workforce statistics
    Dashboard,
    /// Manage login accounts (Admin only)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// List employees
    List {
        /// Match against name or employee code
        #[arg(short, long)]
        search: Option<String>,
        /// Department (team) filter
        #[arg(short, long)]
        department: Option<String>,
        /// Employment status filter
        #[arg(long, value_enum)]
        status: Option<commands::employee::StatusArg>,
    },
    /// Show the full record of one employee
    Show {
        /// Employee code
        code: String,
    },
    /// Add an employee from a JSON file of form fields
    Add {
        /// JSON object mapping field names to values
        #[arg(short, long)]
        file: String,
        /// Profile photo
        #[arg(long)]
        photo: Option<String>,
        /// CV document (pdf, doc, docx)
        #[arg(long)]
        cv: Option<String>,
    },
    /// Update an employee from a JSON file of form fields
    Update {
        /// Employee code
        code: String,
        #[arg(short, long)]
        file: String,
        #[arg(long)]
        photo: Option<String>,
        #[arg(long)]
        cv: Option<String>,
    },
    /// Import a spreadsheet of employees (.xlsx, .xls, .csv)
    Bulk {
        file: String,
    },
    /// Write the bulk upload template
    Template {
        /// Output path (defaults to the template file name)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List login accounts
    List,
    /// Create a login account
    Create {
        /// Username
        username: String,
        /// Password (will be prompted if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Role (Admin, HR, Management)
        #[arg(short, long, default_value = "HR")]
        role: String,
    },
    /// Delete a login account
    Delete {
        username: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Reset an account's password
    Passwd {
        username: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<AccessError>() {
            Some(AccessError::Unauthenticated) => {
                output::print_error("Not logged in. Use 'hrms login' first");
                std::process::exit(2);
            }
            Some(AccessError::Denied(denied)) => {
                output::print_error(&denied.to_string());
                std::process::exit(3);
            }
            None => {
                output::print_error(&format!("{:#}", err));
                std::process::exit(1);
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load().unwrap_or_else(|e| {
        output::print_warning(&format!("{:#}, using defaults", e));
        config::Config::default()
    });

    let server = cli.server.unwrap_or(config.server);
    let format = OutputFormat::from_str(cli.output.as_deref().unwrap_or(&config.output));

    let mut policy = AuthPolicy::restore(FileStore::open(config::Config::session_dir()));
    let api_client = api::ApiClient::new(&server);
    if let Some(token) = policy.token() {
        api_client.set_token(token.to_string()).await;
    }

    match cli.command {
        Commands::Auth(command) => {
            commands::auth::handle_auth_command(command, &api_client, &mut policy, format).await?
        }
        Commands::Employee { command } => {
            commands::employee::handle_employee_command(command, &api_client, &policy, format).await?
        }
        Commands::Dashboard => commands::dashboard::handle_dashboard_command(&api_client, &policy, format).await?,
        Commands::User { command } => {
            commands::user::handle_user_command(command, &api_client, &policy, format).await?
        }
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_top_level_auth_commands() {
        let cli = Cli::try_parse_from(["hrms", "login", "-u", "hr1"]).unwrap();
        assert!(matches!(cli.command, Commands::Auth(AuthCommands::Login { .. })));

        let cli = Cli::try_parse_from(["hrms", "whoami"]).unwrap();
        assert!(matches!(cli.command, Commands::Auth(AuthCommands::Whoami)));
    }

    #[test]
    fn test_user_create_defaults_to_hr() {
        let cli = Cli::try_parse_from(["hrms", "user", "create", "jdoe", "-p", "pw"]).unwrap();
        match cli.command {
            Commands::User { command: UserCommands::Create { role, .. } } => assert_eq!(role, "HR"),
            _ => panic!("expected user create"),
        }
    }

    #[test]
    fn test_employee_list_filters() {
        let cli = Cli::try_parse_from([
            "hrms", "-o", "json", "employee", "list", "--search", "jo", "--status", "exited",
        ])
        .unwrap();
        assert_eq!(cli.output.as_deref(), Some("json"));
        match cli.command {
            Commands::Employee { command: EmployeeCommands::List { search, status, department } } => {
                assert_eq!(search.as_deref(), Some("jo"));
                assert_eq!(status, Some(commands::employee::StatusArg::Exited));
                assert_eq!(department, None);
            }
            _ => panic!("expected employee list"),
        }
    }
}
