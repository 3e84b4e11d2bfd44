pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use algorithms::{RecommendationItem, RecommendationSource, Recommender};
pub use config::Config;
pub use error::SnapshotError;
pub use models::*;

use anyhow::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recommendation_service: Arc<services::recommendation::RecommendationService>,
}

impl AppState {
    /// Loads the catalog named in `config` and builds the first recommender.
    pub async fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let source = Arc::new(services::catalog::JsonCatalogSource::new(
            config.catalog.path.clone(),
        ));

        let recommendation_service = Arc::new(
            services::recommendation::RecommendationService::new(source, config.clone()).await?,
        );

        Ok(Self {
            config,
            recommendation_service,
        })
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Sizes the global rayon pool used for similarity matrix construction.
/// Only the first call in a process takes effect.
pub fn configure_threads(threads: usize) {
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build_global()
    {
        tracing::warn!("Thread pool already configured: {}", e);
    }
}
