//! Planner configuration file support.
//!
//! Settings are read from a TOML file, with every field optional, and can be
//! overridden from the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::placement::GridGeometry;
use crate::search::DEFAULT_PAGE_SIZE;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("No planner.toml found in standard locations")]
    NotFound,
    #[error("Invalid value for {name}: {message}")]
    InvalidEnv { name: String, message: String },
}

/// Planner configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Pixel geometry of the schedule grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    #[serde(default = "default_time_column_width")]
    pub time_column_width: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
}

/// Search dialog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Where the catalog documents live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_majors_file")]
    pub majors_file: String,
    #[serde(default = "default_liberal_arts_file")]
    pub liberal_arts_file: String,
}

fn default_cell_width() -> f64 {
    80.0
}

fn default_cell_height() -> f64 {
    30.0
}

fn default_time_column_width() -> f64 {
    120.0
}

fn default_header_height() -> f64 {
    40.0
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_majors_file() -> String {
    "schedules-majors.json".to_string()
}

fn default_liberal_arts_file() -> String {
    "schedules-liberal-arts.json".to_string()
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            time_column_width: default_time_column_width(),
            header_height: default_header_height(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            majors_file: default_majors_file(),
            liberal_arts_file: default_liberal_arts_file(),
        }
    }
}

impl GridSettings {
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            time_column_width: self.time_column_width,
            header_height: self.header_height,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `planner.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("planner.toml"),
            PathBuf::from("backend/planner.toml"),
            PathBuf::from("../planner.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location config if present, built-in defaults otherwise, then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => Self::default(),
            Err(e) => return Err(e),
        };
        config.with_env_overrides()
    }

    /// Apply environment overrides.
    ///
    /// # Environment Variables
    /// - `PLANNER_DATA_DIR` (optional): directory holding the catalog documents
    /// - `PLANNER_PAGE_SIZE` (optional): search results revealed per page
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(dir) = env::var("PLANNER_DATA_DIR") {
            self.catalog.data_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = env::var("PLANNER_PAGE_SIZE") {
            self.search.page_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| ConfigError::InvalidEnv {
                    name: "PLANNER_PAGE_SIZE".to_string(),
                    message: format!("'{}' is not a positive integer", raw),
                })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PlannerConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.grid.geometry(), GridGeometry::default());
        assert_eq!(config.search.page_size, 100);
        assert_eq!(config.catalog.majors_file, "schedules-majors.json");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[grid]
cell_width = 100.0

[search]
page_size = 25

[catalog]
data_dir = "/srv/catalog"
"#;

        let config: PlannerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.grid.cell_width, 100.0);
        assert_eq!(config.grid.cell_height, 30.0);
        assert_eq!(config.search.page_size, 25);
        assert_eq!(config.catalog.data_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(config.catalog.liberal_arts_file, "schedules-liberal-arts.json");
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[search]\npage_size = \"many\"").unwrap();

        let result = PlannerConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));

        let missing = PlannerConfig::from_file("/nonexistent/planner.toml");
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
