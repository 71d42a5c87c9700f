use backend::{
    build_rocket,
    config::AppConfig,
    maintenance::run_maintenance_task,
    routes::AppState,
};
use tokio::time::Duration;
use tracing::info;

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting registry server");

    let config = AppConfig::from_lookup(|key| secret_store.get(key));
    info!("📋 Configuration loaded: {:?}", config);

    let state = AppState::new(config);

    tokio::spawn(run_maintenance_task(
        state.registry.clone(),
        state.mutation_limiter.clone(),
        Duration::from_secs(state.config.maintenance_interval_secs),
    ));

    Ok(build_rocket(state).into())
}
