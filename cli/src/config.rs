use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Looked up next to the input file when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "markright.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Preamble and rendering options.
    pub latex: latex::Options,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Toml { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "cannot read config '{}': {}", path.display(), message)
            }
            ConfigError::Toml { path, message } => {
                write!(f, "invalid config '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load `explicit` if given, else `markright.toml` beside `input` if present,
/// else the defaults.
pub fn load(explicit: Option<&Path>, input: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read(path);
    }

    let candidate = input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        read(&candidate)
    } else {
        Ok(Config::default())
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "loading config");
    toml::from_str(&text).map_err(|e| ConfigError::Toml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(None, &dir.path().join("doc.mr")).unwrap();
        assert_eq!(config.latex, latex::Options::default());
    }

    #[test]
    fn discovers_config_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[latex]\ntheme = \"Madrid\"\nforce_slides = true\n",
        )
        .unwrap();
        let config = load(None, &dir.path().join("doc.mr")).unwrap();
        assert_eq!(config.latex.theme, "Madrid");
        assert!(config.latex.force_slides);
        assert_eq!(config.latex.paper, "a4paper");
    }

    #[test]
    fn explicit_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[latex]\npaper = \"a5paper\"\n").unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[latex]\npaper = \"b5paper\"\n").unwrap();
        let config = load(Some(&explicit), &dir.path().join("doc.mr")).unwrap();
        assert_eq!(config.latex.paper, "b5paper");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.toml")), Path::new("doc.mr")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[latex]\nfontsize = 12\n").unwrap();
        let err = load(Some(&path), Path::new("doc.mr")).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().starts_with("invalid config"));
    }
}
