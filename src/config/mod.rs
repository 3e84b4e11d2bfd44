use crate::models::RatingScale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
    pub compute: ComputeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_count: usize,
    pub rating_min: i32,
    pub rating_max: i32,
}

impl RecommendationConfig {
    pub fn rating_scale(&self) -> RatingScale {
        RatingScale {
            min: self.rating_min,
            max: self.rating_max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeConfig {
    /// Worker threads used when building similarity matrices.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                path: PathBuf::from("data/catalog.json"),
            },
            recommendation: RecommendationConfig {
                default_count: 10,
                rating_min: 1,
                rating_max: 5,
            },
            compute: ComputeConfig {
                threads: num_cpus::get(),
            },
        }
    }
}

impl Config {
    /// Reads a config file, then applies `CINEREC_*` environment
    /// variables (`CINEREC_RECOMMENDATION__DEFAULT_COUNT=5`) over the file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("CINEREC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Reads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!("Config file {} not found, using default configuration", path);
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::{const_mutex, Mutex};

    // Tests that read `CINEREC_*` variables must not overlap.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    const SAMPLE: &str = r#"
[catalog]
path = "fixtures/catalog.json"

[recommendation]
default_count = 4
rating_min = 0
rating_max = 10

[compute]
threads = 2
"#;

    fn write_sample(name: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("cinerec-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.recommendation.default_count, 10);
        assert_eq!(config.recommendation.rating_scale(), RatingScale::default());
        assert!(config.compute.threads >= 1);
    }

    #[test]
    fn test_from_file() {
        let _guard = ENV_LOCK.lock();
        let path = write_sample("config");

        let config = Config::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.catalog.path, PathBuf::from("fixtures/catalog.json"));
        assert_eq!(config.recommendation.default_count, 4);
        assert_eq!(config.recommendation.rating_scale(), RatingScale { min: 0, max: 10 });
        assert_eq!(config.compute.threads, 2);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock();
        let path = write_sample("env");

        std::env::set_var("CINEREC_RECOMMENDATION__DEFAULT_COUNT", "7");
        std::env::set_var("CINEREC_CATALOG__PATH", "other/catalog.json");
        let config = Config::from_file(path.to_str().unwrap());
        std::env::remove_var("CINEREC_RECOMMENDATION__DEFAULT_COUNT");
        std::env::remove_var("CINEREC_CATALOG__PATH");
        std::fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.recommendation.default_count, 7);
        assert_eq!(config.catalog.path, PathBuf::from("other/catalog.json"));
        // untouched keys keep the file's values
        assert_eq!(config.recommendation.rating_max, 10);
        assert_eq!(config.compute.threads, 2);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.recommendation.default_count, 10);
    }
}
