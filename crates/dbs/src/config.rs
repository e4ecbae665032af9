//! Layered configuration.
//!
//! Precedence, lowest to highest:
//! 1. Bundled defaults (`include_str!` of `dbs.toml`)
//! 2. `~/.config/dbs/dbs.toml`
//! 3. `./dbs.toml`
//! 4. Environment: `OBS_HOST`, `OBS_PORT`, `OBS_PASSWORD`, `GEMINI_API_KEY`

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use dbs_error::ConfigError;
use dbs_models::GeminiConfig;
use dbs_obs::SceneTemplate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../dbs.toml");

/// Scripture API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScriptureSettings {
    /// Translation endpoint, e.g. `https://bible.helloao.org/api/BSB`
    base_url: String,
}

/// OBS connection and scene layout settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ObsSettings {
    /// obs-websocket host
    host: String,
    /// obs-websocket port
    port: u16,
    /// obs-websocket password
    #[serde(default)]
    password: Option<String>,
    /// Base-layer text source showing the section title
    title_source: String,
    /// Base-layer text source showing the reference
    reference_source: String,
    /// Verse text line width; 0 disables wrapping
    max_chars_per_line: usize,
    /// Layout copied for each verse
    text_template: SceneTemplate,
    /// Layout copied for each illustration
    image_template: SceneTemplate,
}

impl std::fmt::Debug for ObsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("title_source", &self.title_source)
            .field("reference_source", &self.reference_source)
            .field("max_chars_per_line", &self.max_chars_per_line)
            .field("text_template", &self.text_template)
            .field("image_template", &self.image_template)
            .finish()
    }
}

/// Where generated images are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OutputSettings {
    /// Root directory; relative paths resolve against the working directory
    root: PathBuf,
}

/// Study plan location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct PlanSettings {
    /// Plan file; `None` means `~/.dbs-initiator/study_plan.json`
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Complete dbs configuration.
///
/// # Examples
///
/// ```
/// use dbs::DbsConfig;
///
/// let config = DbsConfig::from_sources(&[], |_| None).unwrap();
/// assert_eq!(*config.obs().port(), 4455);
/// assert_eq!(config.obs().text_template().scene_name(), "Scripture-Template");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct DbsConfig {
    /// Scripture API
    scripture: ScriptureSettings,
    /// Gemini models and credentials
    gemini: GeminiConfig,
    /// OBS connection and templates
    obs: ObsSettings,
    /// Generated image output
    output: OutputSettings,
    /// Study plan file
    #[serde(default)]
    plan: PlanSettings,
}

impl DbsConfig {
    /// Load configuration from the standard locations and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut files = Vec::new();
        if let Some(home) = dirs::home_dir() {
            files.push(home.join(".config/dbs/dbs.toml"));
        }
        files.push(PathBuf::from("dbs.toml"));

        Self::from_sources(&files, |key| std::env::var(key).ok())
    }

    /// Load bundled defaults, then each optional file in order, then `env` overrides.
    pub fn from_sources(
        files: &[PathBuf],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }
        builder = apply_env_overrides(builder, env)?;

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Plan file to use.
    pub fn plan_path(&self) -> Result<PathBuf, dbs_error::PlanError> {
        match &self.plan.path {
            Some(path) => Ok(path.clone()),
            None => dbs_planner::default_plan_path(),
        }
    }
}

fn apply_env_overrides(
    builder: ConfigBuilder<DefaultState>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    let port = var("OBS_PORT")
        .map(|raw| {
            raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::new(format!("OBS_PORT '{}' is not a valid port: {}", raw, e))
            })
        })
        .transpose()?;

    let overrides = [
        ("obs.host", var("OBS_HOST").map(config::Value::from)),
        ("obs.port", port.map(|p| config::Value::from(i64::from(p)))),
        ("obs.password", var("OBS_PASSWORD").map(config::Value::from)),
        ("gemini.api_key", var("GEMINI_API_KEY").map(config::Value::from)),
    ];

    overrides
        .into_iter()
        .filter(|(_, value)| value.is_some())
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_override_option(key, value)
                .map_err(|e| ConfigError::new(format!("Invalid override for {}: {}", key, e)))
        })
}
