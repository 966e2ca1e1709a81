use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    // Upload dir lives as long as the server; dropping it would delete files
    // the static file routes still serve.
    _uploads_dir: tempfile::TempDir,
    _child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let uploads_dir = tempfile::tempdir().context("failed to create uploads tempdir")?;

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_coleccion-api"));
        cmd.env("COLECCION_API_PORT", port.to_string())
            .env("UPLOADS_DIR", uploads_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Without a database the server still boots for the endpoints that
        // don't touch Postgres (root, upload, static files); DB-backed tests
        // are skipped in that case.
        if std::env::var("DATABASE_URL").is_err() {
            cmd.env("COLECCION_SKIP_DB_CHECK", "1");
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            _uploads_dir: uploads_dir,
            _child: child,
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
                // Ready on liveness regardless of database state
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
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// True when the spawned server has a real database behind it.
pub fn has_database() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}
