use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{clear_session, save_session, StoredSession};
use crate::cli::utils::{output_success, resolve_password};
use crate::cli::OutputFormat;
use crate::client::JoblyClient;
use crate::schemas::UserRegister;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show the current user's profile")]
    Whoami,

    #[command(about = "Register a new account")]
    Register {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },
}

pub async fn handle(
    cmd: AuthCommands,
    output_format: OutputFormat,
    client: &mut JoblyClient,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = resolve_password(password)?;
            let token = client
                .login(&username, &password)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            save_session(&StoredSession::with_token(token))?;

            // Logging in loads the full user record for the session.
            let user = client
                .get_user(&username)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!(
                    "Logged in as {} {} ({})",
                    user.user.first_name, user.user.last_name, user.user.username
                ),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Logout => {
            clear_session()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = client.session();
            match session.username() {
                Some(username) => output_success(
                    &output_format,
                    &format!("Authenticated as {}", username),
                    Some(json!({ "username": username })),
                ),
                None => output_success(&output_format, "Not authenticated", None),
            }
        }
        AuthCommands::Whoami => {
            let username = client
                .session()
                .username()
                .ok_or_else(|| anyhow::anyhow!("Not authenticated"))?;
            let user = client
                .get_user(&username)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!(
                    "{} {} <{}>{}",
                    user.user.first_name,
                    user.user.last_name,
                    user.user.email,
                    if user.user.is_admin { " [admin]" } else { "" }
                ),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Register {
            username,
            email,
            first_name,
            last_name,
            password,
        } => {
            let password = resolve_password(password)?;
            let data = UserRegister {
                username: username.clone(),
                password,
                first_name,
                last_name,
                email,
            };
            let token = client
                .register(&data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            save_session(&StoredSession::with_token(token))?;
            output_success(
                &output_format,
                &format!("Registered and logged in as {}", username),
                None,
            )
        }
    }
}
