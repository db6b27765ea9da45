use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use triage_core::RuleThresholds;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub rules: RuleThresholds,
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_output_dir() -> PathBuf { PathBuf::from("reports") }
fn default_file_prefix() -> String { "orders_type_A".to_string() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureConfig {
    #[serde(default = "default_orders_path")]
    pub orders_path: PathBuf,
    #[serde(default = "default_lookup_path")]
    pub lookup_path: PathBuf,
}

fn default_orders_path() -> PathBuf { PathBuf::from("fixtures/orders.json") }
fn default_lookup_path() -> PathBuf { PathBuf::from("fixtures/lookup.json") }

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            orders_path: default_orders_path(),
            lookup_path: default_lookup_path(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Shipped defaults; every key also has a serde default
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // TRIAGE_REPORT__OUTPUT_DIR=/tmp/out sets report.output_dir
            .add_source(config::Environment::with_prefix("TRIAGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
