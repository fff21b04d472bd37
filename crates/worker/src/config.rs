/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Queue polling interval in milliseconds (default: `1000`).
    pub poll_interval_ms: u64,
    /// Directory rendered artifacts are written to (default: `uploads`).
    pub artifact_dir: String,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default   |
    /// |--------------------------|-----------|
    /// | `WORKER_POLL_INTERVAL_MS`| `1000`    |
    /// | `ARTIFACT_DIR`           | `uploads` |
    pub fn from_env() -> Self {
        let poll_interval_ms: u64 = std::env::var("WORKER_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("WORKER_POLL_INTERVAL_MS must be a valid u64");

        let artifact_dir =
            std::env::var("ARTIFACT_DIR").unwrap_or_else(|_| "uploads".into());

        Self {
            poll_interval_ms,
            artifact_dir,
        }
    }
}
