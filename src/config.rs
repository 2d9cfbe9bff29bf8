use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavigatorConfig {
    pub database: Option<String>,
    pub backend_url: Option<String>,
    pub page_size: Option<usize>,
    pub progress_interval: Option<usize>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("cdmnav.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".cdmnav").join("fields.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<NavigatorConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: NavigatorConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &NavigatorConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cdmnav.toml");

        let config = NavigatorConfig {
            database: Some("fields.db".to_string()),
            backend_url: Some("http://localhost:9000/api".to_string()),
            page_size: Some(25),
            progress_interval: Some(500),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("fields.db"));
        assert_eq!(loaded.page_size, Some(25));
        assert_eq!(loaded.progress_interval, Some(500));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cdmnav.toml");

        write_config(&path, &NavigatorConfig::default(), false).unwrap();
        assert!(write_config(&path, &NavigatorConfig::default(), false).is_err());
        write_config(&path, &NavigatorConfig::default(), true).unwrap();
    }
}
