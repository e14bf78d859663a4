//! Configuration loading and environment overrides.

mod support;

use std::path::PathBuf;

use support::with_scoped_env;
use tempfile::TempDir;
use timetable_planner::config::{ConfigError, PlannerConfig};

#[test]
fn test_env_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planner.toml");
    std::fs::write(
        &path,
        "[catalog]\ndata_dir = \"from-file\"\n\n[search]\npage_size = 20\n",
    )
    .unwrap();

    let config = with_scoped_env(
        &[("PLANNER_DATA_DIR", Some("/tmp/catalog")), ("PLANNER_PAGE_SIZE", None)],
        || PlannerConfig::from_file(&path).unwrap().with_env_overrides(),
    )
    .unwrap();

    assert_eq!(config.catalog.data_dir, PathBuf::from("/tmp/catalog"));
    assert_eq!(config.search.page_size, 20);
}

#[test]
fn test_invalid_page_size_env() {
    for raw in ["lots", "0", "-5"] {
        let result = with_scoped_env(&[("PLANNER_PAGE_SIZE", Some(raw))], || {
            PlannerConfig::default().with_env_overrides()
        });

        match result {
            Err(ConfigError::InvalidEnv { name, .. }) => assert_eq!(name, "PLANNER_PAGE_SIZE"),
            other => panic!("expected InvalidEnv for '{}', got {:?}", raw, other),
        }
    }

    let config = with_scoped_env(&[("PLANNER_PAGE_SIZE", Some("25"))], || {
        PlannerConfig::default().with_env_overrides()
    })
    .unwrap();
    assert_eq!(config.search.page_size, 25);
}

#[test]
fn test_repository_config_file_parses() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("planner.toml");
    let config = PlannerConfig::from_file(path).unwrap();

    assert_eq!(config.grid.cell_width, 80.0);
    assert_eq!(config.search.page_size, 100);
    assert_eq!(config.catalog.majors_file, "schedules-majors.json");
}
