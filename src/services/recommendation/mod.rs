use crate::algorithms::{RecommendationItem, Recommender};
use crate::config::Config;
use crate::models::*;
use crate::services::catalog::CatalogSource;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderStats {
    pub movies: usize,
    pub users: usize,
    pub ratings: usize,
    pub vocabulary_size: usize,
    pub rated_cells: usize,
}

/// Holds the live [`Recommender`] and rebuilds it from the catalog source
/// on demand. Readers always see one complete recommender: a refresh builds
/// the replacement first and then swaps the shared handle.
pub struct RecommendationService {
    source: Arc<dyn CatalogSource>,
    config: Arc<Config>,
    current: RwLock<Arc<Recommender>>,
}

impl RecommendationService {
    pub async fn new(source: Arc<dyn CatalogSource>, config: Arc<Config>) -> Result<Self> {
        let recommender = Self::build(source.as_ref(), &config).await?;
        Ok(Self {
            source,
            config,
            current: RwLock::new(Arc::new(recommender)),
        })
    }

    async fn build(source: &dyn CatalogSource, config: &Config) -> Result<Recommender> {
        let data = source.load().await?;
        let snapshot = data
            .into_snapshot(config.recommendation.rating_scale())
            .context("Catalog snapshot is invalid")?;

        let recommender = tokio::task::spawn_blocking(move || Recommender::new(snapshot))
            .await
            .context("Recommender build task failed")?;
        Ok(recommender)
    }

    /// Reloads the catalog and replaces the live recommender. On failure the
    /// previous recommender stays in place.
    pub async fn refresh(&self) -> Result<()> {
        let started = Instant::now();
        let recommender = Self::build(self.source.as_ref(), &self.config).await?;
        *self.current.write() = Arc::new(recommender);
        info!("Recommender refreshed in {:?}", started.elapsed());
        Ok(())
    }

    pub fn recommender(&self) -> Arc<Recommender> {
        self.current.read().clone()
    }

    pub fn stats(&self) -> RecommenderStats {
        let recommender = self.recommender();
        let snapshot = recommender.snapshot();
        RecommenderStats {
            movies: snapshot.movies().len(),
            users: snapshot.users().len(),
            ratings: snapshot.ratings().len(),
            vocabulary_size: recommender.content_index().vocabulary_size(),
            rated_cells: recommender.rating_matrix().rated_count(),
        }
    }

    fn count(&self, count: Option<usize>) -> usize {
        count.unwrap_or(self.config.recommendation.default_count)
    }

    pub fn content_based(&self, movie_id: MovieId, count: Option<usize>) -> Vec<RecommendationItem> {
        self.recommender()
            .content_based_scored(movie_id, self.count(count))
    }

    pub fn collaborative(&self, user_id: UserId, count: Option<usize>) -> Vec<RecommendationItem> {
        self.recommender()
            .collaborative_scored(user_id, self.count(count))
    }

    pub fn hybrid(
        &self,
        user_id: UserId,
        movie_id: Option<MovieId>,
        count: Option<usize>,
    ) -> Vec<RecommendationItem> {
        self.recommender()
            .hybrid_scored(user_id, movie_id, self.count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::InMemoryCatalogSource;

    fn data() -> CatalogData {
        CatalogData {
            movies: vec![
                Movie::new(1, "X").with_genres(["Drama"]),
                Movie::new(2, "Y").with_genres(["Drama"]),
            ],
            users: vec![User::new(1, "a"), User::new(2, "b")],
            ratings: vec![Rating::new(1, 1, 5), Rating::new(1, 2, 4), Rating::new(2, 1, 5)],
        }
    }

    #[tokio::test]
    async fn test_defaults_and_refresh() {
        let source = Arc::new(InMemoryCatalogSource::new(data()));
        let service = RecommendationService::new(source.clone(), Arc::new(Config::default()))
            .await
            .unwrap();

        assert_eq!(service.collaborative(2, None).len(), 1);
        let before = service.recommender();

        source.replace(CatalogData::default());
        service.refresh().await.unwrap();

        assert!(service.collaborative(2, None).is_empty());
        assert_eq!(service.stats().movies, 0);
        // handles taken before the refresh keep their snapshot
        assert_eq!(before.collaborative_recommendations(2, 10).len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_snapshot_keeps_previous() {
        let source = Arc::new(InMemoryCatalogSource::new(data()));
        let service = RecommendationService::new(source.clone(), Arc::new(Config::default()))
            .await
            .unwrap();

        let mut bad = data();
        bad.ratings.push(Rating::new(2, 1, 3));
        source.replace(bad);

        let err = service.refresh().await.unwrap_err();
        assert!(err.to_string().contains("invalid"));
        assert_eq!(service.stats().ratings, 3);
    }

    #[tokio::test]
    async fn test_stats() {
        let source = Arc::new(InMemoryCatalogSource::new(data()));
        let service = RecommendationService::new(source, Arc::new(Config::default()))
            .await
            .unwrap();
        let stats = service.stats();
        assert_eq!(stats.movies, 2);
        assert_eq!(stats.rated_cells, 3);
        assert_eq!(stats.vocabulary_size, 1);
    }
}
