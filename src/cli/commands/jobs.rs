use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;

use crate::cli::utils::{output_payload, output_success};
use crate::cli::OutputFormat;
use crate::client::JoblyClient;
use crate::filter::JobFilter;
use crate::schemas::{JobNew, JobUpdate};

#[derive(Subcommand)]
pub enum JobCommands {
    #[command(about = "List jobs, with optional search filters")]
    List {
        #[arg(long, help = "Case-insensitive title substring")]
        title: Option<String>,
        #[arg(long, help = "Minimum salary")]
        min_salary: Option<i32>,
        #[arg(long, help = "Only jobs offering equity")]
        has_equity: bool,
    },

    #[command(about = "Show one job")]
    Get {
        #[arg(help = "Job id")]
        id: i32,
    },

    #[command(about = "Create a job (admin)")]
    Create {
        #[arg(help = "Job title")]
        title: String,
        #[arg(help = "Company handle")]
        company_handle: String,
        #[arg(long, help = "Salary")]
        salary: Option<i32>,
        #[arg(long, help = "Equity fraction in [0, 1]")]
        equity: Option<Decimal>,
    },

    #[command(about = "Update a job (admin)")]
    Update {
        #[arg(help = "Job id")]
        id: i32,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New salary")]
        salary: Option<i32>,
        #[arg(long, help = "New equity fraction")]
        equity: Option<Decimal>,
    },

    #[command(about = "Apply the logged-in user to a job")]
    Apply {
        #[arg(help = "Job id")]
        id: i32,
    },
}

pub async fn handle(
    cmd: JobCommands,
    output_format: OutputFormat,
    client: &JoblyClient,
) -> anyhow::Result<()> {
    match cmd {
        JobCommands::List {
            title,
            min_salary,
            has_equity,
        } => {
            let filter = JobFilter {
                title,
                min_salary,
                has_equity: has_equity.then_some(true),
            };
            let jobs = client
                .get_jobs(&filter)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_payload(&output_format, &json!({ "jobs": jobs }), |_| {
                if jobs.is_empty() {
                    println!("No jobs found");
                }
                for job in &jobs {
                    let salary = job
                        .salary
                        .map(|s| format!(" ${}", s))
                        .unwrap_or_default();
                    println!("#{:<6} {:<30} {}{}", job.id, job.title, job.company_handle, salary);
                }
            })
        }
        JobCommands::Get { id } => {
            let job = client
                .get_job(id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_payload(&output_format, &json!({ "job": job }), |_| {
                println!("#{} {} at {}", job.id, job.title, job.company_handle);
                if let Some(salary) = job.salary {
                    println!("Salary: {}", salary);
                }
                if let Some(equity) = job.equity {
                    println!("Equity: {}", equity);
                }
            })
        }
        JobCommands::Create {
            title,
            company_handle,
            salary,
            equity,
        } => {
            let data = JobNew {
                title,
                salary,
                equity,
                company_handle,
            };
            let job = client
                .create_job(&data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Created job #{} {}", job.id, job.title),
                Some(json!({ "job": job })),
            )
        }
        JobCommands::Update {
            id,
            title,
            salary,
            equity,
        } => {
            let data = JobUpdate {
                title,
                salary,
                equity,
            };
            let job = client
                .update_job(id, &data)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Updated job #{}", job.id),
                Some(json!({ "job": job })),
            )
        }
        JobCommands::Apply { id } => {
            let username = client
                .session()
                .username()
                .ok_or_else(|| anyhow::anyhow!("Not authenticated"))?;
            let applied = client
                .apply_to_job(&username, id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            output_success(
                &output_format,
                &format!("Applied to job #{}", applied),
                Some(json!({ "applied": applied })),
            )
        }
    }
}
