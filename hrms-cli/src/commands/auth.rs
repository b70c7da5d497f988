///! Session commands: login, logout, whoami

use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use crate::session::FileStore;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use hrms_common::nav::{visible_entries, SIDEBAR_ENTRIES};
use hrms_common::{AuthError, AuthPolicy, Identity};
use serde::Serialize;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in to the HRMS server
    Login {
        /// Username (will be prompted if not provided)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (will be prompted if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user and what they may access
    Whoami,
}

#[derive(Serialize)]
struct WhoamiReport<'a> {
    username: &'a str,
    role: &'a str,
    sections: Vec<&'static str>,
}

pub async fn handle_auth_command(
    command: AuthCommands,
    api: &ApiClient,
    policy: &mut AuthPolicy<FileStore>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        AuthCommands::Login { username, password } => {
            let username = match username {
                Some(name) => name,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Username")
                    .interact_text()?,
            };
            let password = match password {
                Some(pwd) => pwd,
                None => dialoguer::Password::new().with_prompt("Password").interact()?,
            };

            if username.trim().is_empty() || password.is_empty() {
                anyhow::bail!("Please enter both username and password");
            }

            let identity = match policy.login(api, username.trim(), &password).await {
                Ok(identity) => identity,
                Err(AuthError::InvalidCredentials) => anyhow::bail!("Invalid username or password"),
                Err(e) => return Err(e.into()),
            };

            if let Some(token) = policy.token() {
                api.set_token(token.to_string()).await;
            }

            output::print_success("Login successful");
            print_identity(&identity);
        }

        AuthCommands::Logout => {
            if !policy.is_authenticated() {
                output::print_info("Not logged in");
                return Ok(());
            }
            policy.logout();
            api.clear_token().await;
            output::print_success("Logged out successfully");
        }

        AuthCommands::Whoami => match policy.current_identity() {
            Some(identity) => {
                let report = WhoamiReport {
                    username: identity.username(),
                    role: identity.role().as_str(),
                    sections: sections(identity),
                };
                if !output::print_structured(&report, format)? {
                    print_identity(identity);
                }
            }
            None => {
                println!("Not authenticated");
                println!("Use 'hrms login' to authenticate");
            }
        },
    }

    Ok(())
}

/// Sidebar sections the identity can open
fn sections(identity: &Identity) -> Vec<&'static str> {
    visible_entries(SIDEBAR_ENTRIES, Some(identity))
        .into_iter()
        .map(|entry| entry.label)
        .collect()
}

fn print_identity(identity: &Identity) {
    println!("  Username: {}", identity.username().bold());
    println!("  Role:     {} ({})", identity.role(), identity.role().description().dimmed());
    println!("  Access:   {}", sections(identity).join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_common::Role;

    #[test]
    fn test_sections_follow_role() {
        assert_eq!(
            sections(&Identity::new("ceo", Role::Management)),
            vec!["Dashboard", "Employee List"]
        );
        assert_eq!(
            sections(&Identity::new("hr1", Role::Hr)),
            vec!["Dashboard", "Employee List", "Add Employee"]
        );
        assert_eq!(sections(&Identity::new("admin", Role::Admin)).len(), 4);
    }
}
