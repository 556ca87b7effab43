use std::path::PathBuf;

use axum::http::HeaderValue;

/// How the server accepts connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenType {
    /// TCP on `host:port`.
    Port,
    /// Unix domain socket at the given path.
    Socket(PathBuf),
}

/// Output format of the tracing fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("cannot resolve the executable directory for the default socket path")]
    ExecutableDir(#[source] std::io::Error),
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `10000`).
    pub port: u16,
    /// TCP or unix socket, from `LISTEN_TYPE` / `SOCKET_PATH`.
    pub listen: ListenType,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `15`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Upper bound of the connection pool (default: `20`).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `10000`                          |
    /// | `LISTEN_TYPE`           | `port` (or `sock`)               |
    /// | `SOCKET_PATH`           | `app.sock` next to the binary    |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `15`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`          | required                         |
    /// | `DB_MAX_CONNECTIONS`    | `20`                             |
    /// | `LOG_FORMAT`            | `pretty` (or `json`)             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_var("PORT", var("PORT", "10000"))?;

        let listen = match var("LISTEN_TYPE", "port").as_str() {
            "port" => ListenType::Port,
            "sock" => {
                let path = match lookup("SOCKET_PATH") {
                    Some(path) => PathBuf::from(path),
                    None => default_socket_path()?,
                };
                ListenType::Socket(path)
            }
            other => {
                return Err(ConfigError::Invalid {
                    var: "LISTEN_TYPE",
                    value: other.to_string(),
                })
            }
        };

        let cors_origins = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs =
            parse_var("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS", "15"))?;
        let shutdown_timeout_secs =
            parse_var("SHUTDOWN_TIMEOUT_SECS", var("SHUTDOWN_TIMEOUT_SECS", "30"))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let db_max_connections =
            parse_var("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS", "20"))?;

        let log_format = match var("LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            listen,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            db_max_connections,
            log_format,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn default_socket_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
    let dir = exe.parent().map(PathBuf::from).unwrap_or_default();
    Ok(dir.join("app.sock"))
}
