use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL. When unset the server keeps all data in memory.
    #[arg(long, env = "SOCIAL_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "SOCIAL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "SOCIAL_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for liveness and readiness probes
    #[arg(long, env = "SOCIAL_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests on shutdown
    #[arg(long, env = "SOCIAL_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    #[arg(long, env = "SOCIAL_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Connection attempts at startup before giving up
    #[arg(long, env = "SOCIAL_DB_CONNECT_MAX_RETRIES", default_value_t = 5)]
    pub connect_max_retries: usize,

    /// Timeout for the readiness probe query
    #[arg(long, env = "SOCIAL_DB_HEALTH_TIMEOUT_MS", default_value_t = 2000)]
    pub health_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "SOCIAL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint for traces and metrics (e.g. http://localhost:4317)
    #[arg(long, env = "SOCIAL_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                mgmt_port: 9090,
                shutdown_timeout_secs: 10,
            },
            database: DatabaseConfig { max_connections: 10, connect_max_retries: 5, health_timeout_ms: 2000 },
            telemetry: TelemetryConfig { log_format: LogFormat::Text, otlp_endpoint: None },
        }
    }
}
