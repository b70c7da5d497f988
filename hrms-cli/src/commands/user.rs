use super::authorize_route;
use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use crate::session::FileStore;
use crate::UserCommands;
use anyhow::Result;
use hrms_common::routes;
use hrms_common::users::{CreateUserRequest, PasswordUpdate, UserAccount};
use hrms_common::{AuthPolicy, Identity, Role};
use tabled::Tabled;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "ACCESS")]
    access: String,
}

impl From<UserAccount> for UserRow {
    fn from(user: UserAccount) -> Self {
        Self {
            username: user.username,
            role: user.role.to_string(),
            access: user.role.description().to_string(),
        }
    }
}

pub async fn handle_user_command(
    command: UserCommands,
    api: &ApiClient,
    policy: &AuthPolicy<FileStore>,
    format: OutputFormat,
) -> Result<()> {
    let current = authorize_route(policy, routes::MANAGE_USERS)?;

    match command {
        UserCommands::List => {
            let users: Vec<UserAccount> = api.get("/api/users").await?;
            output::print_list::<_, UserRow>(users, format)?;
        }

        UserCommands::Create { username, password, role } => {
            let role: Role = role.parse()?;
            let password = match password {
                Some(pwd) => pwd,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?,
            };

            let mut request = CreateUserRequest::new(username.trim(), password);
            request.role = role;
            request.validate().map_err(anyhow::Error::msg)?;

            if let Err(e) = api.post_empty("/api/users", &request).await {
                tracing::debug!(error = %e, "create user failed");
                anyhow::bail!("Failed to create user. Username might already exist.");
            }
            output::print_success(&format!("User '{}' created successfully!", request.username));
        }

        UserCommands::Delete { username, yes } => {
            ensure_deletable(&username, current)?;

            let confirmed = yes
                || dialoguer::Confirm::new()
                    .with_prompt(format!("Are you sure you want to delete user '{}'?", username))
                    .default(false)
                    .interact()?;
            if !confirmed {
                output::print_info("Cancelled");
                return Ok(());
            }

            api.delete(&user_api_path(&username)).await?;
            output::print_deleted("User", &username);
        }

        UserCommands::Passwd { username } => {
            let new_password = dialoguer::Password::new()
                .with_prompt(format!("Enter new password for {}", username))
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;

            let body = PasswordUpdate { new_password };
            api.put_empty(&format!("{}/password", user_api_path(&username)), &body)
                .await?;
            output::print_success("Password updated successfully!");
        }
    }
    Ok(())
}

fn user_api_path(username: &str) -> String {
    format!("/api/users/{}", urlencoding::encode(username))
}

fn ensure_deletable(username: &str, current: &Identity) -> Result<()> {
    let target = UserAccount {
        username: username.to_string(),
        // deletability only depends on the name
        role: current.role(),
    };
    if !target.can_be_deleted_by(current) {
        anyhow::bail!("You cannot delete the account you are logged in with");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_delete_self() {
        let admin = Identity::new("admin", Role::Admin);
        assert!(ensure_deletable("admin", &admin).is_err());
        assert!(ensure_deletable("hr1", &admin).is_ok());
    }

    #[test]
    fn test_user_api_path_encodes_username() {
        assert_eq!(user_api_path("a b"), "/api/users/a%20b");
    }

    #[test]
    fn test_user_row_shows_role_description() {
        let row = UserRow::from(UserAccount {
            username: "ceo".to_string(),
            role: Role::Management,
        });
        assert_eq!(row.role, "Management");
        assert_eq!(row.access, Role::Management.description());
    }
}
