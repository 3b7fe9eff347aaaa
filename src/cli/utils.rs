use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                response.as_object_mut().unwrap().extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a payload: pretty JSON in JSON mode, caller-rendered text
/// lines otherwise.
pub fn output_payload(
    output_format: &OutputFormat,
    payload: &Value,
    render_text: impl Fn(&Value),
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
        OutputFormat::Text => render_text(payload),
    }
    Ok(())
}

/// Read a password from the flag or interactively from stdin.
pub fn resolve_password(provided: Option<String>) -> anyhow::Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => {
            use std::io::Write;
            print!("Password: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line.trim_end().to_string())
        }
    }
}
