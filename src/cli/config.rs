use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Session state persisted between CLI invocations: the bearer token
/// plus when it was saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn with_token(token: String) -> Self {
        Self {
            token: Some(token),
            saved_at: Some(Utc::now()),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("JOBLY_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("jobly")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn session_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}

pub fn load_session() -> anyhow::Result<StoredSession> {
    let path = session_file()?;

    if !path.exists() {
        return Ok(StoredSession::default());
    }

    let content = fs::read_to_string(path)?;
    let session: StoredSession = serde_json::from_str(&content)?;
    Ok(session)
}

pub fn save_session(session: &StoredSession) -> anyhow::Result<()> {
    let path = session_file()?;
    let content = serde_json::to_string_pretty(session)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn clear_session() -> anyhow::Result<()> {
    let path = session_file()?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("jobly-cli-test-{}", std::process::id()));
        std::env::set_var("JOBLY_CLI_CONFIG_DIR", &dir);

        let session = StoredSession::with_token("tok123".to_string());
        save_session(&session).unwrap();

        let loaded = load_session().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("tok123"));

        clear_session().unwrap();
        assert!(load_session().unwrap().token.is_none());

        let _ = std::fs::remove_dir_all(dir);
    }
}
