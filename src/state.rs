use crate::coach::Coach;
use crate::config::Config;
use crate::types::log::FitnessLog;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct AppState {
    cache: Arc<DashMap<String, CachedLog>>,
    config: Arc<Config>,
    coach: Arc<Coach>,
}

struct CachedLog {
    log: Arc<FitnessLog>,
    inserted_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let coach = Coach::new(&config.coach);
        Self {
            cache: Arc::new(DashMap::new()),
            config: Arc::new(config),
            coach: Arc::new(coach),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    pub fn insert(&self, file_id: String, log: FitnessLog) -> Arc<FitnessLog> {
        let log = Arc::new(log);
        self.cache.insert(
            file_id,
            CachedLog {
                log: Arc::clone(&log),
                inserted_at: Instant::now(),
            },
        );
        log
    }

    pub fn get(&self, file_id: &str) -> Option<Arc<FitnessLog>> {
        self.cache.get(file_id).map(|entry| Arc::clone(&entry.log))
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.cache.retain(|_, cached| {
            now.duration_since(cached.inserted_at) < ttl
        });
        tracing::info!("Cache eviction complete. Current size: {}", self.cache.len());
    }
}
