use crate::{AppConfig, CompareError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "srccmp.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    pub exists: bool,
    pub portable: bool,
}

pub fn load_config(prefer_portable: bool) -> Result<LoadedConfig, CompareError> {
    let (path, portable) = resolve_config_path(prefer_portable)?;
    let mut loaded = load_config_from(&path)?;
    loaded.config.portable_mode = portable;
    loaded.portable = portable;
    Ok(loaded)
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig, CompareError> {
    let exists = path.exists();
    let config = if exists {
        let data = fs::read_to_string(path)?;
        toml::from_str(&data).map_err(|e| CompareError::Serialization(e.to_string()))?
    } else {
        AppConfig::default()
    };

    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        exists,
        portable: false,
    })
}

pub fn ensure_config(prefer_portable: bool) -> Result<LoadedConfig, CompareError> {
    let loaded = load_config(prefer_portable)?;
    if !loaded.exists {
        save_config(&loaded.path, &loaded.config)?;
    }
    Ok(loaded)
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), CompareError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(config)
        .map_err(|e| CompareError::Serialization(e.to_string()))?;
    fs::write(path, data)?;
    Ok(())
}

/// Parse a `;` separated extension list such as `*.h;*.cpp`
pub fn parse_extensions(list: &str) -> Result<Vec<String>, CompareError> {
    list.split(';').map(normalize_extension).collect()
}

/// Normalize each extension of a list read from the config file
pub fn normalize_extensions(list: &[String]) -> Result<Vec<String>, CompareError> {
    list.iter().map(|ext| normalize_extension(ext)).collect()
}

/// Lower-case an extension and strip wildcards; it must start with a dot
/// and name at least one character after it.
pub fn normalize_extension(ext: &str) -> Result<String, CompareError> {
    let ext = ext.trim().to_lowercase().replace('*', "");
    if ext.len() < 2 || !ext.starts_with('.') {
        return Err(CompareError::Config(format!("invalid file extension: {}", ext)));
    }
    Ok(ext)
}

fn resolve_config_path(prefer_portable: bool) -> Result<(PathBuf, bool), CompareError> {
    if let Some(portable_path) = portable_config_path() {
        if prefer_portable || portable_path.exists() {
            return Ok((portable_path, true));
        }
    }

    let dirs = ProjectDirs::from("", "", "srccmp")
        .ok_or_else(|| CompareError::Config("Unable to determine config directory".to_string()))?;
    Ok((dirs.config_dir().join(CONFIG_FILE_NAME), false))
}

fn portable_config_path() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
}
