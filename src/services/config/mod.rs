use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{self, Error as SerdeError};

use crate::models::config::BoardConfig;

/// Load the widget config, falling back to defaults when no file exists.
pub fn load_config(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &BoardConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize config from {}",
        path.display()
    ))
}
