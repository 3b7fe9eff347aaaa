use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_payload, output_success, resolve_password};
use crate::cli::OutputFormat;
use crate::client::JoblyClient;
use crate::schemas::UserUpdate;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Show a user's profile and applications")]
    Get {
        #[arg(help = "Username")]
        username: String,
    },

    #[command(about = "Update a user's profile")]
    Update {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "New first name")]
        first_name: Option<String>,
        #[arg(long, help = "New last name")]
        last_name: Option<String>,
        #[arg(long, help = "New email")]
        email: Option<String>,
        #[arg(long, help = "Change password (will prompt)")]
        change_password: bool,
    },
}

pub async fn handle(
    cmd: UserCommands,
    output_format: OutputFormat,
    client: &JoblyClient,
) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Get { username } => {
            let user = client
                .get_user(&username)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_payload(&output_format, &json!({ "user": user }), |_| {
                println!(
                    "{} {} <{}>{}",
                    user.user.first_name,
                    user.user.last_name,
                    user.user.email,
                    if user.user.is_admin { " [admin]" } else { "" }
                );
                if !user.applications.is_empty() {
                    let ids: Vec<String> =
                        user.applications.iter().map(|id| format!("#{}", id)).collect();
                    println!("Applications: {}", ids.join(", "));
                }
            })
        }
        UserCommands::Update {
            username,
            first_name,
            last_name,
            email,
            change_password,
        } => {
            let password = if change_password {
                Some(resolve_password(None)?)
            } else {
                None
            };
            let data = UserUpdate {
                password,
                first_name,
                last_name,
                email,
            };
            let user = client
                .save_profile(&username, &data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Updated profile for {}", user.username),
                Some(json!({ "user": user })),
            )
        }
    }
}
