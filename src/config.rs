use std::error::Error;
use std::fs;
use std::path::Path;

use ambler_walkmesh::WalkParams;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AmblerConfig {
    #[serde(default)]
    pub walk: WalkParams,
    #[serde(default)]
    pub walker: WalkerConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WalkerConfig {
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    #[serde(default = "default_forward")]
    pub forward: [f32; 3],
}

fn default_speed() -> f32 {
    5.0
}
fn default_spawn() -> [f32; 3] {
    [0.0, 0.0, 2.0]
}
fn default_forward() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            spawn: default_spawn(),
            forward: default_forward(),
        }
    }
}

pub fn parse_config(s: &str) -> Result<AmblerConfig, toml::de::Error> {
    toml::from_str(s)
}

/// Read `path`, or fall back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<AmblerConfig, Box<dyn Error>> {
    if !path.exists() {
        log::info!("no config at {}; using defaults", path.display());
        return Ok(AmblerConfig::default());
    }
    let s = fs::read_to_string(path)?;
    let cfg = parse_config(&s).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::info!("loaded config {}", path.display());
    Ok(cfg)
}
