//! Daemon settings.
//!
//! Read from `citas.toml` in the working directory when it exists, then
//! overlaid with `CITAS_*` environment variables. A variable whose value
//! cannot be used is an error, not a silent fallback.
//!
//! ```toml
//! [http]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [database]
//! url = "sqlite:citas.db?mode=rwc"
//!
//! [log]
//! filter = "citas=info,tower_http=debug"
//! ```

use std::path::Path;

use serde::Deserialize;

const CONFIG_FILE: &str = "citas.toml";

/// Fully resolved daemon settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// Where the HTTP listener binds.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL; `?mode=rwc` creates the file on first start.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:citas.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "citas=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Resolve settings from `citas.toml` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable or malformed, an
    /// environment override cannot be parsed, or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(Path::new(CONFIG_FILE), |var| std::env::var(var).ok())
    }

    fn resolve(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.overlay_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// `CITAS_BIND` (`host:port`) goes first so `CITAS_HOST` and `CITAS_PORT`
    /// can refine it. `CITAS_LOG` wins over `RUST_LOG`.
    fn overlay_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bind) = env("CITAS_BIND") {
            let (host, port) = split_bind(&bind).ok_or_else(|| ConfigError::Env {
                var: "CITAS_BIND",
                value: bind.clone(),
            })?;
            self.http.host = host;
            self.http.port = port;
        }
        if let Some(host) = env("CITAS_HOST") {
            self.http.host = host;
        }
        if let Some(port) = env("CITAS_PORT") {
            self.http.port = port.trim().parse().map_err(|_| ConfigError::Env {
                var: "CITAS_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(url) = env("CITAS_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = env("CITAS_LOG").or_else(|| env("RUST_LOG")) {
            self.log.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty"));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty"));
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log.filter must not be empty"));
        }
        Ok(())
    }

    /// `host:port` for [`tokio::net::TcpListener::bind`].
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}

fn split_bind(raw: &str) -> Option<(String, u16)> {
    let (host, port) = raw.trim().rsplit_once(':')?;
    if host.is_empty() {
        return None;
    }
    Some((host.to_string(), port.parse().ok()?))
}

/// Why the daemon could not resolve its settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file")]
    Parse(#[from] toml::de::Error),
    #[error("{var} has an unusable value `{value}`")]
    Env { var: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var: &str| {
            pairs
                .iter()
                .find(|(key, _)| *key == var)
                .map(|(_, value)| (*value).to_string())
        }
    }

    fn overlaid(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        Config::resolve(Path::new("does-not-exist/citas.toml"), vars(pairs))
    }

    #[test]
    fn should_use_defaults_when_file_and_env_absent() {
        let config = overlaid(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.database.url, "sqlite:citas.db?mode=rwc");
        assert_eq!(config.log.filter, "citas=info,tower_http=debug");
    }

    #[test]
    fn should_fill_missing_sections_with_defaults() {
        let config: Config = toml::from_str("[http]\nport = 8080").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "sqlite:citas.db?mode=rwc");
    }

    #[test]
    fn should_reject_unknown_keys_in_file() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 8080");
        assert!(result.is_err());
    }

    #[test]
    fn should_read_settings_from_file() {
        let path = std::env::temp_dir().join(format!("citas-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[http]\nhost = '127.0.0.1'\nport = 9090\n[database]\nurl = 'sqlite:test.db'\n[log]\nfilter = 'debug'\n",
        )
        .unwrap();

        let config = Config::resolve(&path, vars(&[]));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn should_report_malformed_file() {
        let path = std::env::temp_dir().join(format!("citas-broken-{}.toml", std::process::id()));
        std::fs::write(&path, "[http\nport = ").unwrap();

        let result = Config::resolve(&path, vars(&[]));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_override_port_and_database_from_env() {
        let config = overlaid(&[
            ("CITAS_PORT", "8081"),
            ("CITAS_DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn should_fail_when_port_env_not_a_number() {
        let result = overlaid(&[("CITAS_PORT", "cinco mil")]);
        assert!(matches!(
            result,
            Err(ConfigError::Env {
                var: "CITAS_PORT",
                ..
            })
        ));
    }

    #[test]
    fn should_split_bind_then_let_host_and_port_refine_it() {
        let config = overlaid(&[("CITAS_BIND", "127.0.0.1:7000")]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:7000");

        let config = overlaid(&[("CITAS_BIND", "127.0.0.1:7000"), ("CITAS_PORT", "7001")]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:7001");
    }

    #[test]
    fn should_fail_when_bind_env_malformed() {
        for bad in ["localhost", ":8080", "localhost:http"] {
            let result = overlaid(&[("CITAS_BIND", bad)]);
            assert!(
                matches!(result, Err(ConfigError::Env { var: "CITAS_BIND", .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn should_prefer_citas_log_over_rust_log() {
        let config = overlaid(&[("RUST_LOG", "warn")]).unwrap();
        assert_eq!(config.log.filter, "warn");

        let config = overlaid(&[("RUST_LOG", "warn"), ("CITAS_LOG", "citas=trace")]).unwrap();
        assert_eq!(config.log.filter, "citas=trace");
    }

    #[test]
    fn should_reject_zero_port() {
        let result = overlaid(&[("CITAS_PORT", "0")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_empty_database_url() {
        let result = overlaid(&[("CITAS_DATABASE_URL", "  ")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
