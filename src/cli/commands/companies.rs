use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_payload, output_success};
use crate::cli::OutputFormat;
use crate::client::JoblyClient;
use crate::filter::CompanyFilter;
use crate::schemas::{CompanyNew, CompanyUpdate};

#[derive(Subcommand)]
pub enum CompanyCommands {
    #[command(about = "List companies, with optional search filters")]
    List {
        #[arg(long, help = "Case-insensitive name substring")]
        name_like: Option<String>,
        #[arg(long, help = "Minimum employee count")]
        min_employees: Option<i32>,
        #[arg(long, help = "Maximum employee count")]
        max_employees: Option<i32>,
    },

    #[command(about = "Show one company with its jobs")]
    Get {
        #[arg(help = "Company handle")]
        handle: String,
    },

    #[command(about = "Create a company (admin)")]
    Create {
        #[arg(help = "Company handle (URL-safe slug)")]
        handle: String,
        #[arg(help = "Company name")]
        name: String,
        #[arg(long, default_value = "", help = "Description")]
        description: String,
        #[arg(long, help = "Employee count")]
        num_employees: Option<i32>,
        #[arg(long, help = "Logo URL")]
        logo_url: Option<String>,
    },

    #[command(about = "Update a company (admin)")]
    Update {
        #[arg(help = "Company handle")]
        handle: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
        #[arg(long, help = "New employee count")]
        num_employees: Option<i32>,
        #[arg(long, help = "New logo URL")]
        logo_url: Option<String>,
    },

    #[command(about = "Delete a company (admin)")]
    Delete {
        #[arg(help = "Company handle")]
        handle: String,
    },
}

pub async fn handle(
    cmd: CompanyCommands,
    output_format: OutputFormat,
    client: &JoblyClient,
) -> anyhow::Result<()> {
    match cmd {
        CompanyCommands::List {
            name_like,
            min_employees,
            max_employees,
        } => {
            let filter = CompanyFilter {
                min_employees,
                max_employees,
                name_like,
            };
            let companies = client
                .get_companies(&filter)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_payload(&output_format, &json!({ "companies": companies }), |_| {
                if companies.is_empty() {
                    println!("No companies found");
                }
                for company in &companies {
                    match company.num_employees {
                        Some(n) => println!("{:<20} {} ({} employees)", company.handle, company.name, n),
                        None => println!("{:<20} {}", company.handle, company.name),
                    }
                }
            })
        }
        CompanyCommands::Get { handle } => {
            let company = client
                .get_company(&handle)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_payload(&output_format, &json!({ "company": company }), |_| {
                println!("{} ({})", company.company.name, company.company.handle);
                if !company.company.description.is_empty() {
                    println!("{}", company.company.description);
                }
                println!("Jobs:");
                if company.jobs.is_empty() {
                    println!("  (none)");
                }
                for job in &company.jobs {
                    println!("  #{} {}", job.id, job.title);
                }
            })
        }
        CompanyCommands::Create {
            handle,
            name,
            description,
            num_employees,
            logo_url,
        } => {
            let data = CompanyNew {
                handle,
                name,
                description,
                num_employees,
                logo_url,
            };
            let company = client
                .create_company(&data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Created company {}", company.handle),
                Some(json!({ "company": company })),
            )
        }
        CompanyCommands::Update {
            handle,
            name,
            description,
            num_employees,
            logo_url,
        } => {
            let data = CompanyUpdate {
                name,
                description,
                num_employees,
                logo_url,
            };
            let company = client
                .update_company(&handle, &data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Updated company {}", company.handle),
                Some(json!({ "company": company })),
            )
        }
        CompanyCommands::Delete { handle } => {
            let deleted = client
                .delete_company(&handle)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Deleted company {}", deleted),
                Some(json!({ "deleted": deleted })),
            )
        }
    }
}
