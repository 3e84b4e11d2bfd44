use crate::models::CatalogData;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read side of the persistence layer: returns the complete current catalog.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<CatalogData>;
}

/// Catalog stored as a single JSON document `{ "movies", "users", "ratings" }`.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load(&self) -> Result<CatalogData> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog {}", self.path.display()))?;

        let data: CatalogData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog {}", self.path.display()))?;

        info!(
            "Loaded catalog from {}: {} movies, {} users, {} ratings",
            self.path.display(),
            data.movies.len(),
            data.users.len(),
            data.ratings.len()
        );
        Ok(data)
    }
}

/// Fixed catalog held in memory; replaceable for refresh scenarios.
#[derive(Debug, Default)]
pub struct InMemoryCatalogSource {
    data: parking_lot::RwLock<CatalogData>,
}

impl InMemoryCatalogSource {
    pub fn new(data: CatalogData) -> Self {
        Self {
            data: parking_lot::RwLock::new(data),
        }
    }

    pub fn replace(&self, data: CatalogData) {
        *self.data.write() = data;
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load(&self) -> Result<CatalogData> {
        Ok(self.data.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;

    #[tokio::test]
    async fn test_json_source_round_trip() {
        let path = std::env::temp_dir().join(format!("cinerec-catalog-{}.json", std::process::id()));
        let data = CatalogData {
            movies: vec![Movie::new(1, "Heat").with_genres(["Crime"])],
            users: vec![User::new(1, "ann")],
            ratings: vec![Rating::new(1, 1, 5)],
        };
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let loaded = JsonCatalogSource::new(&path).load().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.movies, data.movies);
        assert_eq!(loaded.ratings, data.ratings);
    }

    #[tokio::test]
    async fn test_json_source_missing_file() {
        let err = JsonCatalogSource::new("no/such/catalog.json").load().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }

    #[test]
    fn test_in_memory_source_replace() {
        let source = InMemoryCatalogSource::default();
        source.replace(CatalogData {
            movies: vec![Movie::new(5, "Ran")],
            ..Default::default()
        });
        let loaded = tokio_test::block_on(source.load()).unwrap();
        assert_eq!(loaded.movies.len(), 1);
    }
}
