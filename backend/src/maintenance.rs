use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, error};
use shared::models::RegistryStats;
use crate::error::ApiError;
use crate::rate_limiter::RateLimiter;
use crate::store::{lock, RegistryStore};

pub fn sweep(registry: &RegistryStore, limiter: &RateLimiter) -> Result<RegistryStats, ApiError> {
    let pruned = limiter.prune_expired();
    if pruned > 0 {
        info!("🗑️ Pruned {} expired rate limit windows", pruned);
    }

    let stats = lock(registry)?.stats();
    info!(
        "📊 Registry: {} users, {} candidates, {} proposals, {} votes",
        stats.users, stats.candidates, stats.proposals, stats.votes
    );
    Ok(stats)
}

pub async fn run_maintenance_task(registry: Arc<RegistryStore>, limiter: Arc<RateLimiter>, period: Duration) {
    let mut interval = interval(period);
    info!("🧹 Maintenance service started");

    loop {
        interval.tick().await;
        if let Err(e) = sweep(&registry, &limiter) {
            error!("Maintenance sweep failed: {}", e);
        }
    }
}
