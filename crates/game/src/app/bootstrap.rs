use std::env;
use std::path::PathBuf;

use engine::{builtin_world, load_world_file, EngineConfig, World, WorldError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) const WORLD_ENV_VAR: &str = "ADVENTURE_WORLD";
pub(crate) const TICKS_PER_STEP_ENV_VAR: &str = "ADVENTURE_TICKS_PER_STEP";
const DEFAULT_TICKS_PER_STEP: u32 = 10;
const DEFAULT_TARGET_TPS: u32 = 60;

#[derive(Debug, Error)]
pub(crate) enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidTicksPerStep { var: &'static str, value: String },
    #[error("failed to load world from {path}: {source}")]
    WorldFile {
        path: PathBuf,
        #[source]
        source: WorldError,
    },
    #[error("built-in world is invalid: {0}")]
    BuiltinWorld(#[source] WorldError),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HostConfig {
    pub(crate) world_path: Option<PathBuf>,
    pub(crate) ticks_per_step: u32,
    pub(crate) target_tps: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            world_path: None,
            ticks_per_step: DEFAULT_TICKS_PER_STEP,
            target_tps: DEFAULT_TARGET_TPS,
        }
    }
}

impl HostConfig {
    pub(crate) fn from_env() -> Result<Self, StartupError> {
        let world = read_env(WORLD_ENV_VAR)?;
        let ticks = read_env(TICKS_PER_STEP_ENV_VAR)?;
        Self::from_raw(world.as_deref(), ticks.as_deref())
    }

    fn from_raw(world: Option<&str>, ticks_per_step: Option<&str>) -> Result<Self, StartupError> {
        let world_path = world
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let ticks_per_step = match ticks_per_step.map(str::trim) {
            None | Some("") => DEFAULT_TICKS_PER_STEP,
            Some(value) => parse_positive(value).ok_or_else(|| {
                StartupError::InvalidTicksPerStep {
                    var: TICKS_PER_STEP_ENV_VAR,
                    value: value.to_string(),
                }
            })?,
        };

        Ok(Self {
            world_path,
            ticks_per_step,
            ..Self::default()
        })
    }

    pub(crate) fn frame_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_tps.max(1))
    }
}

pub(crate) struct AppWiring {
    pub(crate) host_config: HostConfig,
    pub(crate) engine_config: EngineConfig,
    pub(crate) world: World,
}

pub(crate) fn build_app() -> Result<AppWiring, StartupError> {
    init_tracing();
    info!("=== Adventure Startup ===");

    let host_config = HostConfig::from_env()?;
    let world = load_world(&host_config)?;
    info!(
        world = host_config
            .world_path
            .as_ref()
            .map_or_else(|| "<builtin>".to_string(), |path| path.display().to_string()),
        ticks_per_step = host_config.ticks_per_step,
        target_tps = host_config.target_tps,
        "host_configured"
    );

    Ok(AppWiring {
        host_config,
        engine_config: EngineConfig::default(),
        world,
    })
}

pub(crate) fn load_world(config: &HostConfig) -> Result<World, StartupError> {
    match &config.world_path {
        Some(path) => load_world_file(path).map_err(|source| StartupError::WorldFile {
            path: path.clone(),
            source,
        }),
        None => builtin_world().map_err(StartupError::BuiltinWorld),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn read_env(var: &'static str) -> Result<Option<String>, StartupError> {
    match env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(StartupError::EnvVar { var, source }),
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|value| *value > 0)
}
