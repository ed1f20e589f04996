use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// ERP API the dashboard reads its orders from
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub open_orders_path: String,
    pub tentative_orders_path: String,
    pub quoted_orders_path: String,
    pub confirmed_orders_path: String,
    pub monthly_chart_path: String,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[upstream]
base_url = "http://localhost:8080"
timeout_secs = 30
open_orders_path = "/api/dashboard/open-orders"
tentative_orders_path = "/api/dashboard/tentative-orders"
quoted_orders_path = "/api/dashboard/quoted-orders"
confirmed_orders_path = "/api/dashboard/confirmed-orders"
monthly_chart_path = "/api/dashboard/monthly-chart"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Parse and sanity-check a TOML document
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.upstream.base_url = config.upstream.base_url.trim_end_matches('/').to_string();
    if config.upstream.base_url.is_empty() {
        anyhow::bail!("upstream.base_url must not be empty");
    }
    Ok(config)
}
