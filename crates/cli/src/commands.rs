//! Command-line surface: one subcommand per client operation.

use clap::{Args, Parser, Subcommand};
use config_client::{ClientSettings, ConfigClient};
use config_model::{ApiResult, ClientError, ConfigCoordinate, HealthStatus};
use serde_json::Value;
use tracing::warn;

use crate::telemetry::LogFormat;

/// Query the configuration service.
#[derive(Debug, Parser)]
#[command(name = "cfgctl", version, about)]
pub struct Cli {
    /// Base URL of the configuration service.
    ///
    /// Defaults to `$CONFIG_API_BASE_URL`, then `http://localhost:8888`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Format of log lines written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Application, profile, and optional label.
#[derive(Debug, Clone, Args)]
pub struct CoordinateArgs {
    /// Application name (e.g. `orders-svc`).
    pub application: String,
    /// Profile (e.g. `prod`).
    pub profile: String,
    /// Label (branch) to read from.
    #[arg(long, short, default_value = config_model::DEFAULT_LABEL)]
    pub label: String,
}

impl CoordinateArgs {
    fn coordinate(&self) -> Result<ConfigCoordinate, ClientError> {
        ConfigCoordinate::from_parts(&self.application, &self.profile, Some(&self.label))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the merged configuration document.
    Get(CoordinateArgs),
    /// List the sources contributing to the merged configuration.
    Sources(CoordinateArgs),
    /// Resolve a single key.
    Value {
        #[command(flatten)]
        coordinate: CoordinateArgs,
        /// Property key (e.g. `db.url`).
        key: String,
    },
    /// Search properties by keyword.
    Search {
        #[command(flatten)]
        coordinate: CoordinateArgs,
        /// Text matched against property keys and values.
        keyword: String,
    },
    /// Invalidate the service-side configuration cache.
    Refresh,
    /// Report service health.
    Health,
    /// Fetch the native YAML rendering.
    Yaml(CoordinateArgs),
    /// Fetch the native Properties rendering.
    Properties(CoordinateArgs),
    /// Fetch the native JSON rendering.
    Json(CoordinateArgs),
}

/// What a command produced, ready for stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl Output {
    /// JSON is pretty-printed with a trailing newline; text is written verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Json(value) => {
                let mut rendered =
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                rendered.push('\n');
                rendered
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Resolves settings: an explicit `--base-url` wins over the environment.
pub fn settings(base_url: Option<&str>) -> Result<ClientSettings, ClientError> {
    match base_url {
        Some(url) => ClientSettings::with_base_url(url),
        None => ClientSettings::from_env(),
    }
}

/// Returns `true` when a health body is a successful envelope carrying an
/// `UP` report.
fn reports_up(body: &Value) -> bool {
    ApiResult::<HealthStatus>::from_value(body.clone())
        .and_then(ApiResult::into_data)
        .is_ok_and(|data| data.is_some_and(|health| health.is_up()))
}

/// Runs one command against `client`.
pub async fn execute(client: &ConfigClient, command: &Command) -> Result<Output, ClientError> {
    let config = client.config();
    let server = client.server();
    let output = match command {
        Command::Get(args) => Output::Json(config.get_config(&args.coordinate()?).await?),
        Command::Sources(args) => {
            Output::Json(config.get_config_sources(&args.coordinate()?).await?)
        }
        Command::Value { coordinate, key } => Output::Json(
            config
                .get_config_value(&coordinate.coordinate()?, key)
                .await?,
        ),
        Command::Search {
            coordinate,
            keyword,
        } => Output::Json(
            config
                .search_config(&coordinate.coordinate()?, keyword)
                .await?,
        ),
        Command::Refresh => Output::Json(config.refresh_config().await?),
        Command::Health => {
            let body = config.health().await?;
            if !reports_up(&body) {
                warn!(body = %body, "configuration service does not report UP");
            }
            Output::Json(body)
        }
        Command::Yaml(args) => Output::Text(server.get_config_yaml(&args.coordinate()?).await?),
        Command::Properties(args) => {
            Output::Text(server.get_config_properties(&args.coordinate()?).await?)
        }
        Command::Json(args) => Output::Json(server.get_config_json(&args.coordinate()?).await?),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn value_command_parses_coordinate_and_key() {
        let cli = Cli::try_parse_from(["cfgctl", "value", "orders-svc", "prod", "db.url"]).unwrap();
        match cli.command {
            Command::Value { coordinate, key } => {
                assert_eq!(coordinate.application, "orders-svc");
                assert_eq!(coordinate.profile, "prod");
                assert_eq!(coordinate.label, "main");
                assert_eq!(key, "db.url");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cfgctl",
            "yaml",
            "orders-svc",
            "prod",
            "--label",
            "release-2",
            "--base-url",
            "http://config.internal:8888",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://config.internal:8888"));
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::Yaml(args) => {
                assert_eq!(args.coordinate().unwrap().to_string(), "orders-svc/prod/release-2")
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn explicit_base_url_is_validated() {
        assert!(settings(Some("http://config.internal:8888")).is_ok());
        assert!(matches!(
            settings(Some("not a url")),
            Err(ClientError::Configuration { .. })
        ));
    }

    #[test]
    fn render_keeps_text_verbatim_and_pretty_prints_json() {
        assert_eq!(
            Output::Text("server:\n  port: 8080\n".into()).render(),
            "server:\n  port: 8080\n"
        );
        assert_eq!(
            Output::Json(json!({"value": "jdbc:..."})).render(),
            "{\n  \"value\": \"jdbc:...\"\n}\n"
        );
    }

    #[test]
    fn health_body_must_be_successful_up_report() {
        assert!(reports_up(&json!({
            "code": 200,
            "message": "success",
            "data": {"status": "UP", "service": "config-management", "timestamp": 1_700_000_000_000_i64}
        })));
        assert!(!reports_up(&json!({"code": 200, "data": {"status": "DOWN"}})));
        assert!(!reports_up(&json!({"code": 500, "message": "boom"})));
        assert!(!reports_up(&json!("not an envelope")));
    }

    #[test]
    fn search_keyword_has_help_text() {
        let command = Cli::command();
        let search = command.find_subcommand("search").unwrap();
        let keyword = search
            .get_arguments()
            .find(|arg| arg.get_id() == "keyword")
            .unwrap();
        assert!(keyword.get_help().is_some());
    }
}
