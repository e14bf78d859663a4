//! Catalog sources.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{CatalogError, CatalogResult};
use crate::config::CatalogSettings;
use crate::models::Lecture;

/// Identifies one independently fetched catalog document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKey {
    Majors,
    LiberalArts,
}

impl CacheKey {
    pub const ALL: [CacheKey; 2] = [CacheKey::Majors, CacheKey::LiberalArts];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheKey::Majors => "majors",
            CacheKey::LiberalArts => "liberal_arts",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "majors" => Ok(Self::Majors),
            "liberal_arts" | "liberalarts" | "liberal-arts" => Ok(Self::LiberalArts),
            _ => Err(format!("Unknown catalog key: {}", s)),
        }
    }
}

/// Anything that can produce the lecture list for a key.
#[async_trait]
pub trait LectureSource: Send + Sync {
    async fn fetch(&self, key: CacheKey) -> CatalogResult<Vec<Lecture>>;
}

/// Reads catalog documents from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
    majors_file: String,
    liberal_arts_file: String,
}

impl FileSource {
    /// Source using the default file names in `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_settings(&CatalogSettings {
            data_dir: data_dir.into(),
            ..CatalogSettings::default()
        })
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        Self {
            data_dir: settings.data_dir.clone(),
            majors_file: settings.majors_file.clone(),
            liberal_arts_file: settings.liberal_arts_file.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, key: CacheKey) -> PathBuf {
        let file = match key {
            CacheKey::Majors => &self.majors_file,
            CacheKey::LiberalArts => &self.liberal_arts_file,
        };
        self.data_dir.join(file)
    }
}

#[async_trait]
impl LectureSource for FileSource {
    async fn fetch(&self, key: CacheKey) -> CatalogResult<Vec<Lecture>> {
        let path = self.path_for(key);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CatalogError::Io {
                key,
                message: format!("{}: {}", path.display(), e),
            })?;

        serde_json::from_str(&content).map_err(|e| CatalogError::Decode {
            key,
            message: format!("{}: {}", path.display(), e),
        })
    }
}

/// In-memory documents, for tests and embedded catalogs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<CacheKey, Vec<Lecture>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: CacheKey, lectures: Vec<Lecture>) -> Self {
        self.documents.insert(key, lectures);
        self
    }
}

#[async_trait]
impl LectureSource for StaticSource {
    async fn fetch(&self, key: CacheKey) -> CatalogResult<Vec<Lecture>> {
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::Unavailable {
                key,
                message: "document not registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_cache_key_round_trip() {
        for key in CacheKey::ALL {
            assert_eq!(key.as_str().parse::<CacheKey>().unwrap(), key);
        }
        assert_eq!("liberalArts".parse::<CacheKey>().unwrap(), CacheKey::LiberalArts);
        assert!("electives".parse::<CacheKey>().is_err());
    }

    #[tokio::test]
    async fn test_file_source_reads_and_decodes() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("schedules-majors.json")).unwrap();
        write!(
            file,
            r#"[{{"id": "1", "title": "A", "credits": "3", "grade": 1,
                 "major": "m", "schedule": "월1"}}]"#
        )
        .unwrap();
        std::fs::write(dir.path().join("schedules-liberal-arts.json"), "{not json").unwrap();

        let source = FileSource::new(dir.path());
        let majors = source.fetch(CacheKey::Majors).await.unwrap();
        assert_eq!(majors.len(), 1);
        assert_eq!(majors[0].credits, Some(3));

        let broken = source.fetch(CacheKey::LiberalArts).await;
        assert!(matches!(broken, Err(CatalogError::Decode { key: CacheKey::LiberalArts, .. })));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());

        let err = source.fetch(CacheKey::Majors).await.unwrap_err();
        assert_eq!(err.key(), CacheKey::Majors);
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
