use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const ADMIN_USERNAME: &str = "testadmin";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/jobly-api");
        cmd.env("APP_ENV", "test")
            .env("PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // The test process shares the server's database config
    let _ = dotenvy::dotenv();
    std::env::set_var("APP_ENV", "test");

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Provision (or refresh) the admin account directly in the test
/// database, then log in through the API for a real token.
pub async fn admin_token(server: &TestServer) -> Result<String> {
    ensure_admin_user().await?;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/auth/token", server.base_url))
        .json(&serde_json::json!({
            "username": ADMIN_USERNAME,
            "password": ADMIN_PASSWORD,
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "admin login failed: {}",
        res.status()
    );

    let payload = res.json::<serde_json::Value>().await?;
    payload["token"]
        .as_str()
        .map(ToString::to_string)
        .context("no token in login response")
}

async fn ensure_admin_user() -> Result<()> {
    use sqlx::postgres::PgConnectOptions;
    use sqlx::{ConnectOptions, Connection};
    use std::str::FromStr;

    let hash = jobly_api::auth::password::hash(ADMIN_PASSWORD.to_string()).await?;

    // Open a fresh, runtime-local connection instead of the process-global
    // DatabaseManager pool: each `#[tokio::test]` runs on its own short-lived
    // runtime, and a pool cached on an earlier test's (now dropped) runtime
    // would make this query block forever.
    let base = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let db_name = jobly_api::config::config().database.name.clone();
    let mut conn = PgConnectOptions::from_str(&base)
        .context("invalid DATABASE_URL")?
        .database(&db_name)
        .connect()
        .await?;

    sqlx::query(
        "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
         VALUES ($1, $2, 'Test', 'Admin', 'admin@jobly.test', TRUE) \
         ON CONFLICT (username) \
         DO UPDATE SET password = EXCLUDED.password, is_admin = TRUE",
    )
    .bind(ADMIN_USERNAME)
    .bind(&hash)
    .execute(&mut conn)
    .await?;

    conn.close().await?;
    Ok(())
}

/// Unique, slug-safe identifier so tests can share a database without
/// colliding.
pub fn unique(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    // Short enough to stay within username/handle length limits
    format!("{}-{:07x}", prefix, nanos % 0xfff_ffff)
}
