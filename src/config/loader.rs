use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::CouplingConfig;
use super::validation::validate_config;
use super::CONFIG_FILE_NAME;
use crate::core::{Error, Result};

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CouplingConfig> {
    let config = toml::from_str::<CouplingConfig>(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load an explicitly requested config file. Every failure is reported.
pub fn load_config_from(path: &Path) -> Result<CouplingConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered path, falling back on failure
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CouplingConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn find_config(start: PathBuf) -> Option<CouplingConfig> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
}

pub fn load_config() -> CouplingConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return CouplingConfig::default();
        }
    };

    find_config(current).unwrap_or_else(|| {
        log::debug!("No {} found. Using default config.", CONFIG_FILE_NAME);
        CouplingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CouplingKind;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            indoc! {r#"
                [metrics]
                compiled = ["call"]
                source = []
            "#},
        )
        .unwrap();
        let nested = root.path().join("sub").join("dir");
        fs::create_dir_all(&nested).unwrap();

        let config = find_config(nested).unwrap();
        assert_eq!(config.metrics.compiled, vec![CouplingKind::Call]);
        assert!(config.metrics.source.is_empty());
    }

    #[test]
    fn test_invalid_discovered_config_is_skipped() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[metrics]\ncompiled = []\nsource = []\n",
        )
        .unwrap();
        assert!(try_load_config_from_path(&root.path().join(CONFIG_FILE_NAME)).is_none());
    }

    #[test]
    fn test_load_config_from_reports_errors() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        fs::write(&path, "[metrics]\ncompiled = []\nsource = []\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.is_configuration());

        let missing = load_config_from(&root.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_parse_error_is_toml_error() {
        let err = parse_and_validate_config("[scope\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
