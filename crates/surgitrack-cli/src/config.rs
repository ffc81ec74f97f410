use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgitrackConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Where patient and calculation records are kept.
    pub data_dir: PathBuf,
    pub created_at: jiff::Timestamp,
}

impl SurgitrackConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir,
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.surgitrack.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("surgitrack"))
}

/// Load the config at `path`, or defaults when no file exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<SurgitrackConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(SurgitrackConfig::new(default_data_dir()?))
    }
}

pub fn load_config(path: &Path) -> eyre::Result<SurgitrackConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SurgitrackConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update SurgiTrack."
        ));
    }

    // v0 → v1: data_dir and created_at became required
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if !obj.contains_key("data_dir") {
            let data_dir = default_data_dir()?;
            obj.insert(
                "data_dir".to_string(),
                serde_json::Value::String(data_dir.display().to_string()),
            );
        }
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added data_dir, created_at)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &SurgitrackConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Patient data location; keep it private on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_versions_are_refused() {
        let json = serde_json::json!({ "config_version": 9 });
        assert!(migrate(json, 9).is_err());
    }

    #[test]
    fn v0_keeps_existing_data_dir() {
        let json = serde_json::json!({ "data_dir": "/srv/surgitrack" });
        let migrated = migrate(json, 0).unwrap();
        assert_eq!(migrated["data_dir"], "/srv/surgitrack");
        assert_eq!(migrated["config_version"], 1);
        let config: SurgitrackConfig = serde_json::from_value(migrated).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/surgitrack"));
    }
}
